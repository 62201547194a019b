//! End-to-end scenarios for the execution queue.
//!
//! Each test builds a small game, queues hand-made cards and checks the
//! player state, queue state and narration afterwards.

use runner_ccg::cards::{Card, CardId, CardType, EnhancedCard};
use runner_ccg::components::{Component, DamageLabel, Resource, SingleTarget, TrashTarget};
use runner_ccg::core::{EngineConfig, GameState, Location, PlayerId, ScriptedRng, Threat, ThreatId};
use runner_ccg::execution::{ExecutionQueue, PauseKind, QueueState, QueueStep, Target};
use runner_ccg::zones::Zone;

fn card(id: u32, name: &str, components: Vec<Component>) -> EnhancedCard {
    EnhancedCard::new(Card::new(CardId::new(id), name, CardType::Event), components)
}

/// Put a fresh instance of `template` into the active player's play area.
fn play(game: &mut GameState, template: &EnhancedCard) -> EnhancedCard {
    let instance = template
        .clone()
        .with_instance(game.alloc_instance())
        .with_component(Component::marker(Zone::Play));
    game.active_mut().in_play.push_back(instance.clone());
    instance
}

fn game_with_threat() -> GameState {
    let mut game = GameState::new(&EngineConfig::default());
    game.location = Some(Location::new("Corporate Plaza").with_threat(Threat::new(1, "Security Drone", 6, 2)));
    game
}

// =============================================================================
// Basic Scenarios
// =============================================================================

/// A self-targeted credit card spends its action and pays out.
#[test]
fn test_gain_credits_card_drains_queue() {
    let mut game = GameState::new(&EngineConfig::default());
    game.active_mut().actions = 1;
    game.active_mut().credits = 0;
    let mut queue = ExecutionQueue::new();
    let mut log: Vec<String> = Vec::new();

    let card_a = card(
        1,
        "Card A",
        vec![Component::self_target(), Component::action_cost(1), Component::gain_credits(3)],
    );
    let instance = play(&mut game, &card_a);
    queue.enqueue(&instance);

    let step = queue.execute_all(&mut game, &mut log);

    assert_eq!(step, QueueStep::QueueComplete);
    assert_eq!(game.active().actions, 0);
    assert_eq!(game.active().credits, 3);
    assert!(queue.is_empty());
    assert_eq!(queue.cursor(), 0);
    assert_eq!(queue.state(), QueueState::Idle);
    // Completion moves the card out of play
    assert!(game.active().in_play.is_empty());
    assert_eq!(game.active().discard.len(), 1);
    assert_eq!(game.active().discard[0].zone(), Some(Zone::Discard));
}

/// Selection halts the pipeline before any later cost runs.
#[test]
fn test_threat_selection_halts_before_cost() {
    let mut game = game_with_threat();
    let mut queue = ExecutionQueue::new();
    let mut log: Vec<String> = Vec::new();
    let credits = game.active().credits;

    let card_b = card(
        2,
        "Card B",
        vec![
            Component::select_one(SingleTarget::Threat),
            Component::credit_cost(5),
            Component::deal_damage(2, DamageLabel::Plain),
        ],
    );
    queue.enqueue(&play(&mut game, &card_b));

    let step = queue.execute_all(&mut game, &mut log);

    assert_eq!(step, QueueStep::Paused(PauseKind::AwaitingTargets));
    assert!(queue.is_awaiting_target_selection());
    assert!(queue.is_paused());
    assert_eq!(game.active().credits, credits);
    assert_eq!(game.threats()[0].health, 6);
    assert!(log.iter().any(|l| l == "Waiting for target selection"));
}

/// Trashing a card that is not in play refuses and leaves discard alone.
#[test]
fn test_trash_self_not_in_play_refuses() {
    let mut game = GameState::new(&EngineConfig::default());
    let mut queue = ExecutionQueue::new();
    let mut log: Vec<String> = Vec::new();

    // Queued without ever entering play
    let sacrifice = card(3, "Sacrifice", vec![Component::trash(TrashTarget::This), Component::gain_credits(4)]);
    queue.enqueue(&sacrifice.with_instance(game.alloc_instance()));

    let step = queue.execute_next(&mut game, &mut log);

    assert_eq!(step, QueueStep::Paused(PauseKind::HardFail));
    assert!(game.active().discard.is_empty());
    assert!(!queue.is_awaiting_target_selection());
    assert!(log.iter().any(|l| l.contains("not in play")));
}

/// Trashing itself while in play pays and the card still resolves.
#[test]
fn test_trash_self_in_play_pays() {
    let mut game = GameState::new(&EngineConfig::default());
    let mut queue = ExecutionQueue::new();
    let mut log: Vec<String> = Vec::new();

    let sacrifice = card(
        3,
        "Sacrifice",
        vec![
            Component::trash(TrashTarget::This),
            Component::RecycleGain {
                resource: Resource::Credits,
                per_card: 4,
            },
        ],
    );
    queue.enqueue(&play(&mut game, &sacrifice));

    assert_eq!(queue.execute_all(&mut game, &mut log), QueueStep::QueueComplete);
    assert_eq!(game.active().credits, 9);
    assert!(game.active().in_play.is_empty());
    assert_eq!(game.active().discard.len(), 1);
}

// =============================================================================
// Pause / Resume
// =============================================================================

/// Damage lands only after the caller picks the target.
#[test]
fn test_pause_resume_round_trip() {
    let mut game = game_with_threat();
    let mut queue = ExecutionQueue::new();
    let mut log: Vec<String> = Vec::new();

    let spike = card(
        4,
        "Spike",
        vec![Component::select_one(SingleTarget::Threat), Component::deal_damage(4, DamageLabel::Net)],
    );
    queue.enqueue(&play(&mut game, &spike));

    assert_eq!(
        queue.execute_next(&mut game, &mut log),
        QueueStep::Paused(PauseKind::AwaitingTargets)
    );
    assert!(queue.is_awaiting_target_selection());
    assert_eq!(game.threats()[0].health, 6);

    let step = queue.provide_targets([Target::Threat(ThreatId(1))], &mut game, &mut log);

    assert_eq!(step, QueueStep::QueueComplete);
    assert_eq!(game.threats()[0].health, 2);
    assert!(!queue.is_paused());
    assert_eq!(queue.cursor(), 0);
}

/// Resuming continues at the suspending component, so earlier costs are
/// not charged twice.
#[test]
fn test_resume_does_not_recharge_earlier_costs() {
    let mut game = game_with_threat();
    let mut queue = ExecutionQueue::new();
    let mut log: Vec<String> = Vec::new();

    let strike = card(
        5,
        "Strike",
        vec![
            Component::action_cost(1),
            Component::select_one(SingleTarget::Threat),
            Component::deal_damage(1, DamageLabel::Meat),
        ],
    );
    queue.enqueue(&play(&mut game, &strike));

    queue.execute_next(&mut game, &mut log);
    assert_eq!(game.active().actions, 2);

    queue.provide_targets([Target::Threat(ThreatId(1))], &mut game, &mut log);
    assert_eq!(game.active().actions, 2);
    assert_eq!(game.threats()[0].health, 5);
}

/// After resuming, the rest of the queue runs too.
#[test]
fn test_resume_continues_with_remaining_cards() {
    let mut game = game_with_threat();
    let mut queue = ExecutionQueue::new();
    let mut log: Vec<String> = Vec::new();
    game.active_mut().credits = 0;

    let spike = card(
        4,
        "Spike",
        vec![Component::select_one(SingleTarget::Threat), Component::deal_damage(1, DamageLabel::Net)],
    );
    let payday = card(6, "Payday", vec![Component::self_target(), Component::gain_credits(2)]);
    queue.enqueue(&play(&mut game, &spike));
    queue.enqueue(&play(&mut game, &payday));
    queue.enqueue(&play(&mut game, &payday));

    assert_eq!(
        queue.execute_all(&mut game, &mut log),
        QueueStep::Paused(PauseKind::AwaitingTargets)
    );
    assert_eq!(game.active().credits, 0);

    let step = queue.provide_targets([Target::Threat(ThreatId(1))], &mut game, &mut log);

    assert_eq!(step, QueueStep::QueueComplete);
    assert_eq!(game.active().credits, 4);
    assert!(game.active().in_play.is_empty());
}

/// A hard fail keeps the card and cursor; supplying targets does not
/// resume it.
#[test]
fn test_hard_fail_is_not_resumable_by_targets() {
    let mut game = GameState::new(&EngineConfig::default());
    let mut queue = ExecutionQueue::new();
    let mut log: Vec<String> = Vec::new();

    let gamble = card(7, "Overdraft", vec![Component::action_cost(5), Component::gain_credits(9)]);
    queue.enqueue(&play(&mut game, &gamble));

    assert_eq!(queue.execute_next(&mut game, &mut log), QueueStep::Paused(PauseKind::HardFail));
    assert_eq!(queue.state(), QueueState::PausedHardFail);
    assert!(queue.context().and_then(|c| c.failure()).is_some());

    let step = queue.provide_targets([Target::Player(PlayerId::new(0))], &mut game, &mut log);
    assert_eq!(step, QueueStep::Idle);
    assert_eq!(queue.state(), QueueState::PausedHardFail);
    assert_eq!(game.active().credits, 5);
    assert_eq!(log.last().map(String::as_str), Some("No card is waiting for targets."));
}

/// Costs paid before a failing cost stay paid.
#[test]
fn test_no_rollback_on_partial_payment() {
    let mut game = GameState::new(&EngineConfig::default());
    let mut queue = ExecutionQueue::new();
    let mut log: Vec<String> = Vec::new();

    let risky = card(
        8,
        "Burnout",
        vec![
            Component::health_cost(2, DamageLabel::Brain),
            Component::action_cost(9),
            Component::gain_credits(5),
        ],
    );
    queue.enqueue(&play(&mut game, &risky));
    queue.execute_next(&mut game, &mut log);

    assert_eq!(game.active().health, 8);
    assert_eq!(game.active().actions, 3);
    assert_eq!(game.active().credits, 5);
}

// =============================================================================
// Idempotence
// =============================================================================

/// Running the queue again after it drained does nothing.
#[test]
fn test_execute_next_after_completion_is_noop() {
    let mut game = GameState::new(&EngineConfig::default());
    let mut queue = ExecutionQueue::new();
    let mut log: Vec<String> = Vec::new();

    let payday = card(6, "Payday", vec![Component::self_target(), Component::gain_credits(2)]);
    queue.enqueue(&play(&mut game, &payday));

    assert_eq!(queue.execute_next(&mut game, &mut log), QueueStep::QueueComplete);
    assert_eq!(queue.execute_next(&mut game, &mut log), QueueStep::Idle);
    assert_eq!(queue.execute_next(&mut game, &mut log), QueueStep::Idle);
    assert_eq!(game.active().credits, 7);
}

/// An empty card is narrated and counts as resolved.
#[test]
fn test_empty_card_resolves() {
    let mut game = GameState::new(&EngineConfig::default());
    let mut queue = ExecutionQueue::new();
    let mut log: Vec<String> = Vec::new();

    queue.enqueue(&card(9, "Blank", vec![]));

    assert_eq!(queue.execute_all(&mut game, &mut log), QueueStep::QueueComplete);
    assert!(log.iter().any(|l| l.contains("nothing to execute")));
}

// =============================================================================
// Risk / Reward
// =============================================================================

fn gamble() -> EnhancedCard {
    card(
        10,
        "Gamble",
        vec![Component::risk_reward((Resource::Credits, 3), (Resource::Credits, 7), 40)],
    )
}

/// Rolling exactly the chance wins the reward and nothing else.
#[test]
fn test_risk_reward_success_boundary() {
    let mut game = GameState::new(&EngineConfig::default());
    let mut queue = ExecutionQueue::new().with_random_source(ScriptedRng::always(40));
    let mut log: Vec<String> = Vec::new();

    queue.enqueue(&play(&mut game, &gamble()));
    queue.execute_all(&mut game, &mut log);

    assert_eq!(game.active().credits, 5 + 7);
}

/// Rolling one above the chance costs the risk and nothing else.
#[test]
fn test_risk_reward_failure_boundary() {
    let mut game = GameState::new(&EngineConfig::default());
    let mut queue = ExecutionQueue::new().with_random_source(ScriptedRng::always(41));
    let mut log: Vec<String> = Vec::new();

    queue.enqueue(&play(&mut game, &gamble()));
    queue.execute_all(&mut game, &mut log);

    assert_eq!(game.active().credits, 5 - 3);
}

/// A failed gamble takes the whole risk even when the player is short.
#[test]
fn test_risk_reward_failure_exceeds_balance() {
    let mut game = GameState::new(&EngineConfig::default().with_starting_credits(1));
    let mut queue = ExecutionQueue::new().with_random_source(ScriptedRng::always(100));
    let mut log: Vec<String> = Vec::new();

    queue.enqueue(&play(&mut game, &gamble()));
    queue.execute_all(&mut game, &mut log);

    assert_eq!(game.active().credits, 1 - 3);
    assert!(log.iter().any(|l| l.contains("loses 3 credits")));
}
