//! Cost and requirement components.
//!
//! Costs deduct from the acting player or refuse with a `HardFail`. A
//! failed cost leaves the player untouched; costs paid earlier in the same
//! pipeline stay paid.

use log::trace;

use super::{ComponentOutcome, DamageLabel, FailureReason, KeywordPool, TargetPrompt, TargetRequest, TrashTarget};
use crate::cards::{CardId, EnhancedCard, InstanceId};
use crate::core::{Pile, Player};
use crate::execution::{ExecEnv, ExecutionContext};
use crate::zones::{move_card_to_zone, Zone};

pub(super) fn can_pay_health(player: &Player, amount: i64) -> bool {
    player.health >= amount
}

/// Cards in `pool` tagged with `keyword`.
pub(super) fn count_keyword(player: &Player, keyword: &str, pool: KeywordPool) -> usize {
    player.pile(pool.pile()).iter().filter(|c| c.card.has_keyword(keyword)).count()
}

pub(super) fn pay_credits(amount: i64, ctx: &mut ExecutionContext, env: &mut ExecEnv<'_>) -> ComponentOutcome {
    let Some(player) = env.game.player_mut(ctx.player) else {
        return ComponentOutcome::HardFail(FailureReason::UnknownPlayer(ctx.player));
    };
    if player.credits < amount {
        return ComponentOutcome::HardFail(FailureReason::InsufficientCredits {
            needed: amount,
            available: player.credits,
        });
    }
    player.credits -= amount;
    trace!("{} paid {} credits", ctx.player, amount);
    ComponentOutcome::Continue
}

pub(super) fn pay_actions(amount: i64, ctx: &mut ExecutionContext, env: &mut ExecEnv<'_>) -> ComponentOutcome {
    let Some(player) = env.game.player_mut(ctx.player) else {
        return ComponentOutcome::HardFail(FailureReason::UnknownPlayer(ctx.player));
    };
    if player.actions < amount {
        return ComponentOutcome::HardFail(FailureReason::InsufficientActions {
            needed: amount,
            available: player.actions,
        });
    }
    player.actions -= amount;
    trace!("{} spent {} action(s)", ctx.player, amount);
    ComponentOutcome::Continue
}

pub(super) fn pay_health(
    amount: i64,
    label: DamageLabel,
    ctx: &mut ExecutionContext,
    env: &mut ExecEnv<'_>,
) -> ComponentOutcome {
    let Some(player) = env.game.player_mut(ctx.player) else {
        return ComponentOutcome::HardFail(FailureReason::UnknownPlayer(ctx.player));
    };
    if !can_pay_health(player, amount) {
        return ComponentOutcome::HardFail(FailureReason::InsufficientHealth {
            needed: amount,
            available: player.health,
            label,
        });
    }
    player.health -= amount;
    let message = format!("{} takes {} {} damage to play {}", player.name, amount, label, ctx.card().name());
    env.say(message);
    ComponentOutcome::Continue
}

pub(super) fn require_keyword(
    keyword: &str,
    count: usize,
    location: KeywordPool,
    ctx: &mut ExecutionContext,
    env: &mut ExecEnv<'_>,
) -> ComponentOutcome {
    let Some(player) = env.game.player(ctx.player) else {
        return ComponentOutcome::HardFail(FailureReason::UnknownPlayer(ctx.player));
    };
    let found = count_keyword(player, keyword, location);
    if found < count {
        return ComponentOutcome::HardFail(FailureReason::MissingKeyword {
            keyword: keyword.to_string(),
            needed: count,
            found,
            pool: location,
        });
    }
    ComponentOutcome::Continue
}

pub(super) fn pay_trash(
    target: &TrashTarget,
    specific_card: Option<CardId>,
    specific_keyword: Option<&str>,
    ctx: &mut ExecutionContext,
    env: &mut ExecEnv<'_>,
) -> ComponentOutcome {
    if *target == TrashTarget::This {
        let own = ctx.card().instance_id;
        return match trash_from_play(ctx, env, own) {
            Some(_) => ComponentOutcome::Continue,
            None => ComponentOutcome::HardFail(FailureReason::NotInPlay {
                card: ctx.card().name().to_string(),
            }),
        };
    }

    let Some(instance) = ctx.targets.first().and_then(|t| t.as_card()) else {
        if ctx.answered() {
            return ComponentOutcome::HardFail(FailureReason::NoTrashChoice);
        }
        let message = match specific_keyword {
            Some(keyword) => format!("Choose a {} card in play to trash", keyword),
            None => "Choose a card in play to trash".to_string(),
        };
        return ComponentOutcome::AwaitTargets(TargetPrompt::new(
            message,
            TargetRequest::TrashCard {
                target: target.clone(),
                keyword: specific_keyword.map(str::to_string),
            },
        ));
    };

    let Some(player) = env.game.player(ctx.player) else {
        return ComponentOutcome::HardFail(FailureReason::UnknownPlayer(ctx.player));
    };
    let Some(index) = player.find_in(Pile::Play, instance) else {
        return ComponentOutcome::HardFail(FailureReason::NotInPlay {
            card: format!("Card {}", instance),
        });
    };
    let chosen = &player.in_play[index];
    if let Some(reason) = check_trash_choice(chosen, target, specific_card, specific_keyword) {
        return ComponentOutcome::HardFail(reason);
    }

    if trash_from_play(ctx, env, instance).is_none() {
        return ComponentOutcome::HardFail(FailureReason::NotInPlay {
            card: format!("Card {}", instance),
        });
    }
    // The chosen card paid the cost; later components pick their own targets.
    ctx.targets.clear();
    ComponentOutcome::Continue
}

fn check_trash_choice(
    chosen: &EnhancedCard,
    target: &TrashTarget,
    specific_card: Option<CardId>,
    specific_keyword: Option<&str>,
) -> Option<FailureReason> {
    if let TrashTarget::OfType(expected) = target {
        if chosen.card.card_type != *expected {
            return Some(FailureReason::WrongCardType {
                card: chosen.name().to_string(),
                expected: *expected,
                found: chosen.card.card_type,
            });
        }
    }
    if let Some(expected) = specific_card {
        if chosen.card.id != expected {
            return Some(FailureReason::WrongCard {
                card: chosen.name().to_string(),
                expected,
            });
        }
    }
    if let Some(keyword) = specific_keyword {
        if !chosen.card.has_keyword(keyword) {
            return Some(FailureReason::MissingTrashKeyword {
                card: chosen.name().to_string(),
                keyword: keyword.to_string(),
            });
        }
    }
    None
}

/// Move `instance` from the acting player's play area to their discard.
fn trash_from_play(ctx: &mut ExecutionContext, env: &mut ExecEnv<'_>, instance: InstanceId) -> Option<()> {
    let player = env.game.player_mut(ctx.player)?;
    let card = player.take_from(Pile::Play, instance)?;
    let trashed = move_card_to_zone(&card, Zone::Play, Zone::Discard);
    player.discard.push_back(trashed.clone());

    let message = format!("{} trashed {} to pay for {}", player.name, trashed.name(), ctx.card().name());
    ctx.recently_trashed.push(trashed);
    env.say(message);
    Some(())
}
