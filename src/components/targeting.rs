//! Targeting components.
//!
//! Targeting fills `ctx.targets`. It either picks automatically from the
//! game state or suspends with a prompt describing what the caller may
//! choose. A context that already holds targets, or whose prompt was just
//! answered, is left alone.

use super::{ComponentOutcome, SingleTarget, TargetFilter, TargetPool, TargetPrompt, TargetRequest, TrashTarget};
use crate::core::GameState;
use crate::execution::{ExecEnv, ExecutionContext, Target, TargetList};

impl TargetFilter {
    /// Whether `target` passes this filter.
    #[must_use]
    pub fn matches(&self, target: Target, ctx: &ExecutionContext, game: &GameState) -> bool {
        match self {
            TargetFilter::Keyword(keyword) => card_of(target, game).is_some_and(|c| c.card.has_keyword(keyword)),
            TargetFilter::CardType(card_type) => card_of(target, game).is_some_and(|c| c.card.card_type == *card_type),
            TargetFilter::MinHealth(min) => health_of(target, game).is_some_and(|h| h >= *min),
            TargetFilter::MaxHealth(max) => health_of(target, game).is_some_and(|h| h <= *max),
            TargetFilter::NotSource => target != Target::Card(ctx.card().instance_id),
        }
    }
}

fn card_of(target: Target, game: &GameState) -> Option<&crate::cards::EnhancedCard> {
    game.find_card(target.as_card()?)
}

fn health_of(target: Target, game: &GameState) -> Option<i64> {
    match target {
        Target::Player(p) => game.player(p).map(|p| p.health),
        Target::Threat(t) => game.threats().iter().find(|th| th.id == t).map(|th| th.health),
        Target::Card(_) => None,
    }
}

fn passes(filter: Option<&TargetFilter>, target: Target, ctx: &ExecutionContext, game: &GameState) -> bool {
    filter.is_none_or(|f| f.matches(target, ctx, game))
}

fn live_threats(game: &GameState) -> impl Iterator<Item = Target> + '_ {
    game.threats().iter().filter(|t| !t.is_defeated()).map(|t| Target::Threat(t.id))
}

fn own_cards_in_play(ctx: &ExecutionContext, game: &GameState) -> Vec<Target> {
    game.player(ctx.player)
        .map(|p| p.in_play.iter().map(|c| Target::Card(c.instance_id)).collect())
        .unwrap_or_default()
}

fn pool_members(pool: TargetPool, ctx: &ExecutionContext, game: &GameState) -> Vec<Target> {
    match pool {
        TargetPool::Players => std::iter::once(ctx.player)
            .chain(ctx.opponents.iter().copied())
            .map(Target::Player)
            .collect(),
        TargetPool::Opponents => ctx.opponents.iter().copied().map(Target::Player).collect(),
        TargetPool::Threats => live_threats(game).collect(),
        TargetPool::Cards => own_cards_in_play(ctx, game),
    }
}

fn single_members(target: SingleTarget, ctx: &ExecutionContext, game: &GameState) -> Vec<Target> {
    match target {
        SingleTarget::Player => pool_members(TargetPool::Players, ctx, game),
        SingleTarget::Opponent => pool_members(TargetPool::Opponents, ctx, game),
        SingleTarget::Threat => pool_members(TargetPool::Threats, ctx, game),
        SingleTarget::Card => pool_members(TargetPool::Cards, ctx, game),
    }
}

/// Legal answers to a prompt, in the order an automatic pick would use.
///
/// Useful to AI players and to callers that want to validate a selection.
/// An `Acknowledge` prompt has no candidates.
#[must_use]
pub fn candidates(request: &TargetRequest, ctx: &ExecutionContext, game: &GameState) -> TargetList {
    let members = match request {
        TargetRequest::Entity { target, filter } => single_members(*target, ctx, game)
            .into_iter()
            .filter(|t| passes(filter.as_ref(), *t, ctx, game))
            .collect(),
        TargetRequest::UpTo { pool, filter, .. } => pool_members(*pool, ctx, game)
            .into_iter()
            .filter(|t| passes(filter.as_ref(), *t, ctx, game))
            .collect(),
        TargetRequest::TrashCard { target, keyword } => game
            .player(ctx.player)
            .map(|p| {
                p.in_play
                    .iter()
                    .filter(|c| match target {
                        TrashTarget::This => c.instance_id == ctx.card().instance_id,
                        TrashTarget::OfType(t) => c.card.card_type == *t,
                        TrashTarget::Any => true,
                    })
                    .filter(|c| keyword.as_deref().is_none_or(|k| c.card.has_keyword(k)))
                    .map(|c| Target::Card(c.instance_id))
                    .collect()
            })
            .unwrap_or_default(),
        TargetRequest::DiscardFromHand { .. } => game
            .player(ctx.player)
            .map(|p| p.hand.iter().map(|c| Target::Card(c.instance_id)).collect())
            .unwrap_or_default(),
        TargetRequest::Acknowledge => Vec::new(),
    };
    members.into_iter().collect()
}

fn already_targeted(ctx: &ExecutionContext) -> bool {
    !ctx.targets.is_empty() || ctx.answered()
}

pub(super) fn single(
    target: SingleTarget,
    allow_selection: bool,
    filter: Option<&TargetFilter>,
    ctx: &mut ExecutionContext,
    env: &mut ExecEnv<'_>,
) -> ComponentOutcome {
    if already_targeted(ctx) {
        return ComponentOutcome::Continue;
    }

    if allow_selection {
        let noun = match target {
            SingleTarget::Player => "a player",
            SingleTarget::Opponent => "an opponent",
            SingleTarget::Threat => "a threat",
            SingleTarget::Card => "a card",
        };
        return ComponentOutcome::AwaitTargets(TargetPrompt::new(
            format!("Select {} for {}", noun, ctx.card().name()),
            TargetRequest::Entity {
                target,
                filter: filter.cloned(),
            },
        ));
    }

    let game = &*env.game;
    let matching: Vec<Target> = single_members(target, ctx, game)
        .into_iter()
        .filter(|t| passes(filter, *t, ctx, game))
        .collect();

    let chosen: TargetList = match target {
        SingleTarget::Player => std::iter::once(Target::Player(ctx.player))
            .filter(|t| passes(filter, *t, ctx, game))
            .collect(),
        // Every matching card in play, not only the first.
        SingleTarget::Card => matching.into_iter().collect(),
        SingleTarget::Opponent | SingleTarget::Threat => matching.into_iter().take(1).collect(),
    };

    if chosen.is_empty() {
        let message = format!("{}: no valid target", ctx.card().name());
        env.say(message);
    }
    ctx.targets = chosen;
    ComponentOutcome::Continue
}

pub(super) fn multi(
    pool: TargetPool,
    max_targets: usize,
    allow_selection: bool,
    filter: Option<&TargetFilter>,
    ctx: &mut ExecutionContext,
    env: &mut ExecEnv<'_>,
) -> ComponentOutcome {
    if already_targeted(ctx) {
        return ComponentOutcome::Continue;
    }

    if allow_selection {
        return ComponentOutcome::AwaitTargets(TargetPrompt::new(
            format!("Select up to {} target(s) for {}", max_targets, ctx.card().name()),
            TargetRequest::UpTo {
                pool,
                max: max_targets,
                filter: filter.cloned(),
            },
        ));
    }

    let game = &*env.game;
    let chosen: TargetList = pool_members(pool, ctx, game)
        .into_iter()
        .filter(|t| passes(filter, *t, ctx, game))
        .take(max_targets)
        .collect();

    if chosen.is_empty() {
        let message = format!("{}: no valid target", ctx.card().name());
        env.say(message);
    }
    ctx.targets = chosen;
    ComponentOutcome::Continue
}

pub(super) fn self_target(ctx: &mut ExecutionContext) -> ComponentOutcome {
    ctx.targets.clear();
    ctx.targets.push(Target::Player(ctx.player));
    ComponentOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, CardType, EnhancedCard, InstanceId};
    use crate::components::Component;
    use crate::core::{EngineConfig, GameRng, Location, PlayerId, Threat, ThreatId};
    use crate::zones::Zone;

    fn game() -> GameState {
        let mut game = GameState::new(&EngineConfig::new().with_players(3));
        game.location = Some(
            Location::new("Arcology")
                .with_threat(Threat::new(1, "Sentry", 0, 1))
                .with_threat(Threat::new(2, "Hound", 5, 2))
                .with_threat(Threat::new(3, "Wisp", 2, 1)),
        );
        game
    }

    fn put_in_play(game: &mut GameState, name: &str, keywords: &[&str]) -> InstanceId {
        let id = game.alloc_instance();
        let card = EnhancedCard::new(
            Card::new(CardId::new(id.0 as u32), name, CardType::Program).with_keywords(keywords.iter().copied()),
            [Component::marker(Zone::Play)],
        )
        .with_instance(id);
        game.active_mut().in_play.push_back(card);
        id
    }

    fn ctx(game: &GameState) -> ExecutionContext {
        let card = EnhancedCard::new(Card::new(CardId::new(50), "Tracer", CardType::Event), [])
            .with_instance(InstanceId(500));
        ExecutionContext::new(card, game)
    }

    #[test]
    fn test_auto_threat_skips_defeated() {
        let mut game = game();
        let mut log: Vec<String> = Vec::new();
        let mut rng = GameRng::new(3);
        let mut ctx = ctx(&game);
        let mut env = ExecEnv::new(&mut game, &mut log, &mut rng);

        assert_eq!(single(SingleTarget::Threat, false, None, &mut ctx, &mut env), ComponentOutcome::Continue);
        assert_eq!(ctx.targets.as_slice(), &[Target::Threat(ThreatId(2))]);
    }

    #[test]
    fn test_auto_threat_with_filter() {
        let mut game = game();
        let mut log: Vec<String> = Vec::new();
        let mut rng = GameRng::new(3);
        let mut ctx = ctx(&game);
        let mut env = ExecEnv::new(&mut game, &mut log, &mut rng);

        single(SingleTarget::Threat, false, Some(&TargetFilter::MaxHealth(3)), &mut ctx, &mut env);
        assert_eq!(ctx.targets.as_slice(), &[Target::Threat(ThreatId(3))]);
    }

    #[test]
    fn test_auto_card_selects_every_match() {
        let mut game = game();
        let a = put_in_play(&mut game, "Worm", &["virus"]);
        put_in_play(&mut game, "Rig", &[]);
        let b = put_in_play(&mut game, "Leech", &["virus"]);
        let mut log: Vec<String> = Vec::new();
        let mut rng = GameRng::new(3);
        let mut ctx = ctx(&game);
        let mut env = ExecEnv::new(&mut game, &mut log, &mut rng);

        let filter = TargetFilter::Keyword("virus".into());
        single(SingleTarget::Card, false, Some(&filter), &mut ctx, &mut env);
        assert_eq!(ctx.targets.as_slice(), &[Target::Card(a), Target::Card(b)]);
    }

    #[test]
    fn test_existing_targets_short_circuit() {
        let mut game = game();
        let mut log: Vec<String> = Vec::new();
        let mut rng = GameRng::new(3);
        let mut ctx = ctx(&game);
        ctx.targets.push(Target::Player(PlayerId::new(2)));
        let mut env = ExecEnv::new(&mut game, &mut log, &mut rng);

        assert_eq!(single(SingleTarget::Threat, true, None, &mut ctx, &mut env), ComponentOutcome::Continue);
        assert_eq!(multi(TargetPool::Threats, 2, true, None, &mut ctx, &mut env), ComponentOutcome::Continue);
        assert_eq!(ctx.targets.as_slice(), &[Target::Player(PlayerId::new(2))]);
    }

    #[test]
    fn test_selection_suspends() {
        let mut game = game();
        let mut log: Vec<String> = Vec::new();
        let mut rng = GameRng::new(3);
        let mut ctx = ctx(&game);
        let mut env = ExecEnv::new(&mut game, &mut log, &mut rng);

        match multi(TargetPool::Opponents, 1, true, None, &mut ctx, &mut env) {
            ComponentOutcome::AwaitTargets(prompt) => {
                assert_eq!(prompt.message, "Select up to 1 target(s) for Tracer");
            }
            other => panic!("expected suspension, got {:?}", other),
        }
    }

    #[test]
    fn test_multi_players_pool_order_and_cap() {
        let mut game = game();
        let mut log: Vec<String> = Vec::new();
        let mut rng = GameRng::new(3);
        let mut ctx = ctx(&game);
        let mut env = ExecEnv::new(&mut game, &mut log, &mut rng);

        multi(TargetPool::Players, 2, false, None, &mut ctx, &mut env);
        assert_eq!(
            ctx.targets.as_slice(),
            &[Target::Player(PlayerId::new(0)), Target::Player(PlayerId::new(1))]
        );
    }

    #[test]
    fn test_self_target_replaces() {
        let game = game();
        let mut ctx = ctx(&game);
        ctx.targets.push(Target::Threat(ThreatId(2)));

        self_target(&mut ctx);
        assert_eq!(ctx.targets.as_slice(), &[Target::Player(PlayerId::new(0))]);
    }

    #[test]
    fn test_candidates_for_trash_prompt() {
        let mut game = game();
        let worm = put_in_play(&mut game, "Worm", &["virus"]);
        put_in_play(&mut game, "Rig", &[]);
        let ctx = ctx(&game);

        let request = TargetRequest::TrashCard {
            target: TrashTarget::Any,
            keyword: Some("virus".into()),
        };
        assert_eq!(candidates(&request, &ctx, &game).as_slice(), &[Target::Card(worm)]);
        assert!(candidates(&TargetRequest::Acknowledge, &ctx, &game).is_empty());
    }

    #[test]
    fn test_not_source_filter() {
        let game = game();
        let ctx = ctx(&game);
        assert!(!TargetFilter::NotSource.matches(Target::Card(InstanceId(500)), &ctx, &game));
        assert!(TargetFilter::NotSource.matches(Target::Card(InstanceId(501)), &ctx, &game));
    }
}
