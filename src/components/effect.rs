//! Effect components.
//!
//! Effects act on `ctx.targets` (players, threats, cards) or on ambient
//! state such as the acting player's play area and the cards trashed earlier
//! in the same attempt. Amounts are read through `ctx.boosted` so synergy
//! bonuses apply without touching the card definition.
//!
//! Defeat is narrated, never resolved here: removing threats and ending the
//! game belong to the caller.

use log::debug;

use super::{ComponentKind, ComponentOutcome, DamageLabel, Resource, TargetPrompt, TargetRequest};
use crate::cards::{CardType, InstanceId};
use crate::core::{Pile, PlayerId};
use crate::execution::{ExecEnv, ExecutionContext, Target};
use crate::zones::{move_card_to_zone, Zone};

fn player_targets(ctx: &ExecutionContext) -> Vec<PlayerId> {
    ctx.targets.iter().filter_map(|t| t.as_player()).collect()
}

/// Player targets, or the acting player when there are none.
fn player_targets_or_self(ctx: &ExecutionContext) -> Vec<PlayerId> {
    let players = player_targets(ctx);
    if players.is_empty() {
        vec![ctx.player]
    } else {
        players
    }
}

fn as_count(amount: i64) -> usize {
    usize::try_from(amount).unwrap_or(0)
}

pub(super) fn gain_credits(amount: i64, ctx: &mut ExecutionContext, env: &mut ExecEnv<'_>) -> ComponentOutcome {
    let amount = ctx.boosted(ComponentKind::GainCredits, amount);
    for id in player_targets(ctx) {
        if let Some(player) = env.game.player_mut(id) {
            player.credits += amount;
            let message = format!("{} gains {} credits", player.name, amount);
            env.say(message);
        }
    }
    ComponentOutcome::Continue
}

pub(super) fn gain_action(amount: i64, ctx: &mut ExecutionContext, env: &mut ExecEnv<'_>) -> ComponentOutcome {
    let amount = ctx.boosted(ComponentKind::GainAction, amount);
    for id in player_targets(ctx) {
        if let Some(player) = env.game.player_mut(id) {
            player.actions += amount;
            let message = format!("{} gains {} action(s)", player.name, amount);
            env.say(message);
        }
    }
    ComponentOutcome::Continue
}

pub(super) fn deal_damage(
    amount: i64,
    label: DamageLabel,
    ctx: &mut ExecutionContext,
    env: &mut ExecEnv<'_>,
) -> ComponentOutcome {
    let amount = ctx.boosted(ComponentKind::DealDamage, amount);
    for target in ctx.targets.clone() {
        match target {
            Target::Player(id) => {
                let Some(player) = env.game.player_mut(id) else { continue };
                let dealt = player.take_damage(amount);
                let mut message = format!("{} takes {} {} damage", player.name, dealt, label);
                if player.is_defeated() {
                    message.push_str(&format!(". {} has flatlined", player.name));
                }
                env.say(message);
            }
            Target::Threat(id) => {
                let Some(threat) = env.game.threat_mut(id) else { continue };
                threat.health -= amount;
                let mut message = format!("{} takes {} {} damage", threat.name, amount, label);
                if threat.is_defeated() {
                    message.push_str(&format!(". {} is destroyed", threat.name));
                }
                env.say(message);
            }
            Target::Card(_) => {}
        }
    }
    ComponentOutcome::Continue
}

pub(super) fn prevent_damage(amount: i64, ctx: &mut ExecutionContext, env: &mut ExecEnv<'_>) -> ComponentOutcome {
    let amount = ctx.boosted(ComponentKind::PreventDamage, amount);
    for id in player_targets(ctx) {
        if let Some(player) = env.game.player_mut(id) {
            player.shield += amount;
            let message = format!("{} will prevent the next {} damage", player.name, amount);
            env.say(message);
        }
    }
    ComponentOutcome::Continue
}

pub(super) fn draw_cards(amount: i64, ctx: &mut ExecutionContext, env: &mut ExecEnv<'_>) -> ComponentOutcome {
    let count = as_count(ctx.boosted(ComponentKind::DrawCards, amount));
    for id in player_targets_or_self(ctx) {
        let drawn = env.game.draw_cards(id, count, &mut *env.rng);
        env.say(format!("{} draws {} card(s)", id, drawn));
    }
    ComponentOutcome::Continue
}

pub(super) fn discard_cards(
    amount: i64,
    random: bool,
    ctx: &mut ExecutionContext,
    env: &mut ExecEnv<'_>,
) -> ComponentOutcome {
    let count = as_count(ctx.boosted(ComponentKind::DiscardCards, amount));
    let players = player_targets_or_self(ctx);
    let acting = ctx.player;

    let chosen: Vec<InstanceId> = match env.game.player(acting) {
        Some(player) => ctx
            .targets
            .iter()
            .filter_map(|t| t.as_card())
            .filter(|id| player.find_in(Pile::Hand, *id).is_some())
            .take(count)
            .collect(),
        None => Vec::new(),
    };

    // AI seats are prompted too; their driver answers through `candidates`.
    let manual = env.game.player(acting).is_some_and(|p| !p.hand.is_empty());
    if !random && manual && players.contains(&acting) && chosen.is_empty() && !ctx.answered() {
        return ComponentOutcome::AwaitTargets(TargetPrompt::new(
            format!("Choose {} card(s) to discard", count),
            TargetRequest::DiscardFromHand { count },
        ));
    }

    for id in players {
        let discarded: Vec<InstanceId> = if random {
            env.game.force_discard(id, count, &mut *env.rng)
        } else if id == acting && manual {
            chosen.iter().copied().filter(|c| env.game.discard_from_hand(id, *c)).collect()
        } else {
            let front: Vec<InstanceId> = env
                .game
                .player(id)
                .map(|p| p.hand.iter().take(count).map(|c| c.instance_id).collect())
                .unwrap_or_default();
            front.into_iter().filter(|c| env.game.discard_from_hand(id, *c)).collect()
        };
        env.say(format!("{} discards {} card(s)", id, discarded.len()));
    }
    ComponentOutcome::Continue
}

pub(super) fn recycle_gain(
    resource: Resource,
    per_card: i64,
    ctx: &mut ExecutionContext,
    env: &mut ExecEnv<'_>,
) -> ComponentOutcome {
    let trashed = ctx.recently_trashed.len() as i64;
    if trashed == 0 {
        env.say(format!("{}: nothing was trashed to recycle", ctx.card().name()));
        return ComponentOutcome::Continue;
    }
    let total = per_card * trashed + ctx.bonus(ComponentKind::RecycleGain);
    grant(env, ctx.player, resource, total);
    ComponentOutcome::Continue
}

pub(super) fn risk_reward(
    risk: (Resource, i64),
    reward: (Resource, i64),
    chance_percent: u32,
    ctx: &mut ExecutionContext,
    env: &mut ExecEnv<'_>,
) -> ComponentOutcome {
    let roll = env.rng.roll_percent();
    debug!("{} rolled {} against {}%", ctx.card().name(), roll, chance_percent);

    if roll <= chance_percent {
        env.say(format!("{}: rolled {}, success", ctx.card().name(), roll));
        let amount = ctx.boosted(ComponentKind::RiskReward, reward.1);
        grant(env, ctx.player, reward.0, amount);
    } else {
        env.say(format!("{}: rolled {}, failure", ctx.card().name(), roll));
        forfeit(env, ctx.player, risk.0, risk.1);
    }
    ComponentOutcome::Continue
}

/// Hand a resource to `player`.
fn grant(env: &mut ExecEnv<'_>, id: PlayerId, resource: Resource, amount: i64) {
    if resource == Resource::Cards {
        let drawn = env.game.draw_cards(id, as_count(amount), &mut *env.rng);
        env.say(format!("{} draws {} card(s)", id, drawn));
        return;
    }
    let Some(player) = env.game.player_mut(id) else { return };
    match resource {
        Resource::Credits => player.credits += amount,
        Resource::Actions => player.actions += amount,
        Resource::Health => player.health += amount,
        Resource::Cards => {}
    }
    let message = format!("{} gains {} {}", player.name, amount, resource);
    env.say(message);
}

/// Take exactly `amount` of a resource from `player`. Credits and actions
/// may go negative.
fn forfeit(env: &mut ExecEnv<'_>, id: PlayerId, resource: Resource, amount: i64) {
    if resource == Resource::Cards {
        let lost = env.game.force_discard(id, as_count(amount), &mut *env.rng);
        env.say(format!("{} discards {} card(s) at random", id, lost.len()));
        return;
    }
    let Some(player) = env.game.player_mut(id) else { return };
    let field = match resource {
        Resource::Credits => &mut player.credits,
        Resource::Actions => &mut player.actions,
        Resource::Health => &mut player.health,
        Resource::Cards => return,
    };
    *field -= amount;
    let message = format!("{} loses {} {}", player.name, amount, resource);
    env.say(message);
}

pub(super) fn keyword_synergy(
    keyword: &str,
    boosts: ComponentKind,
    bonus: i64,
    ctx: &mut ExecutionContext,
    env: &mut ExecEnv<'_>,
) -> ComponentOutcome {
    let own = ctx.card().instance_id;
    let found = env
        .game
        .player(ctx.player)
        .is_some_and(|p| p.in_play.iter().any(|c| c.instance_id != own && c.card.has_keyword(keyword)));
    if found {
        ctx.add_bonus(boosts, bonus);
        env.say(format!("{}: {} synergy, +{}", ctx.card().name(), keyword, bonus));
    }
    ComponentOutcome::Continue
}

pub(super) fn combo(
    card_type: CardType,
    boosts: ComponentKind,
    bonus: i64,
    ctx: &mut ExecutionContext,
    env: &mut ExecEnv<'_>,
) -> ComponentOutcome {
    let own = ctx.card().instance_id;
    let found = env
        .game
        .player(ctx.player)
        .is_some_and(|p| p.in_play.iter().any(|c| c.instance_id != own && c.card.card_type == card_type));
    if found {
        ctx.add_bonus(boosts, bonus);
        env.say(format!("{}: {} combo, +{}", ctx.card().name(), card_type, bonus));
    }
    ComponentOutcome::Continue
}

pub(super) fn pause_queue(message: &str, ctx: &mut ExecutionContext, _env: &mut ExecEnv<'_>) -> ComponentOutcome {
    if ctx.answered() {
        return ComponentOutcome::Continue;
    }
    let message = if message.is_empty() {
        format!("{} is waiting for confirmation", ctx.card().name())
    } else {
        message.to_string()
    };
    ComponentOutcome::AwaitTargets(TargetPrompt::new(message, TargetRequest::Acknowledge))
}

pub(super) fn cancel_card(ctx: &mut ExecutionContext, env: &mut ExecEnv<'_>) -> ComponentOutcome {
    for instance in ctx.targets.iter().filter_map(|t| t.as_card()) {
        let Some(owner) = env.game.in_play_owner(instance) else { continue };
        let Some(player) = env.game.player_mut(owner) else { continue };
        let Some(card) = player.take_from(Pile::Play, instance) else { continue };
        let canceled = move_card_to_zone(&card, Zone::Play, Zone::Discard);
        let message = format!("{} was canceled", canceled.name());
        player.discard.push_back(canceled);
        env.say(message);
    }
    ComponentOutcome::Continue
}

pub(super) fn reveal_cards(count: usize, ctx: &mut ExecutionContext, env: &mut ExecEnv<'_>) -> ComponentOutcome {
    for id in player_targets_or_self(ctx) {
        let Some(player) = env.game.player(id) else { continue };
        let top: Vec<_> = player.deck.iter().take(count).collect();
        let message = if top.is_empty() {
            format!("{} has nothing to reveal", player.name)
        } else {
            let names: Vec<&str> = top.iter().map(|c| c.name()).collect();
            format!("{} reveals {}", player.name, names.join(", "))
        };
        ctx.revealed.extend(top.iter().map(|c| c.instance_id));
        env.say(message);
    }
    ComponentOutcome::Continue
}

pub(super) fn scan(ctx: &mut ExecutionContext, env: &mut ExecEnv<'_>) -> ComponentOutcome {
    for target in ctx.targets.clone() {
        let report = match target {
            Target::Player(id) => env.game.player(id).map(|p| {
                format!("{}: {} health, {} credits, {} actions", p.name, p.health, p.credits, p.actions)
            }),
            Target::Threat(id) => env
                .game
                .threats()
                .iter()
                .find(|t| t.id == id)
                .map(|t| format!("{}: {} health, {} danger", t.name, t.health, t.danger)),
            Target::Card(id) => env
                .game
                .find_card(id)
                .map(|c| format!("{}: {}, cost {}", c.name(), c.card.card_type, c.card.cost)),
        };
        if let Some(report) = report {
            ctx.scanned.push(target);
            env.say(report);
        }
    }
    ComponentOutcome::Continue
}
