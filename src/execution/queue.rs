//! The execution queue: an ordered run of played cards with explicit
//! suspension.
//!
//! ## State machine
//!
//! ```text
//! Idle --enqueue--> Running --hard fail--> PausedHardFail
//!                      |    --needs input--> PausedAwaitingTargets
//!                      |                          |
//!                      |<------provide_targets-----+
//!                      +--last card done--> Idle
//! ```
//!
//! The queue drives one card at a time. A card that suspends keeps its
//! `ExecutionContext` on the queue so the same attempt resumes once the
//! caller answers. Completing the last card resets the queue to empty.
//!
//! Nothing here blocks or schedules: every transition is a method call.

use log::{debug, error, info};

use super::context::{ExecEnv, ExecutionContext, PipelineOutcome};
use super::target::{Target, TargetList};
use crate::cards::EnhancedCard;
use crate::components::TargetPrompt;
use crate::core::{GameRng, GameState, LogSink, Pile, RandomSource};
use crate::zones::{move_card_to_zone, move_with_position, Zone};

/// One-shot callback run with the targets passed to `provide_targets`.
pub type ResumeCallback = Box<dyn FnOnce(&[Target])>;

/// Why the queue is paused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PauseKind {
    /// A precondition failed. Supplying targets does not resume it.
    HardFail,
    AwaitingTargets,
}

/// Result of one `execute_next` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueueStep {
    /// Nothing to run.
    Idle,
    /// The card at the cursor is (still) suspended.
    Paused(PauseKind),
    /// A card finished and more remain.
    CardComplete { remaining: usize },
    /// The last card finished; the queue is empty again.
    QueueComplete,
}

impl QueueStep {
    /// Whether a card finished during this step.
    #[must_use]
    pub fn advanced(self) -> bool {
        matches!(self, QueueStep::CardComplete { .. } | QueueStep::QueueComplete)
    }
}

/// Observable queue state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueueState {
    Idle,
    /// Cards are waiting to run.
    Running,
    PausedHardFail,
    PausedAwaitingTargets,
}

/// Misuse of the queue surgery operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueueError {
    IndexOutOfRange { index: usize, len: usize },
    /// The card is the suspended one at the cursor.
    CardSuspended { index: usize },
    /// The card already resolved.
    AlreadyResolved { index: usize },
}

impl std::fmt::Display for QueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueError::IndexOutOfRange { index, len } => {
                write!(f, "Queue index {} out of range (length {})", index, len)
            }
            QueueError::CardSuspended { index } => {
                write!(f, "Card at {} is suspended; cancel it first", index)
            }
            QueueError::AlreadyResolved { index } => write!(f, "Card at {} already resolved", index),
        }
    }
}

impl std::error::Error for QueueError {}

/// Ordered played cards plus the driver state.
pub struct ExecutionQueue {
    cards: Vec<EnhancedCard>,
    cursor: usize,
    paused: bool,
    awaiting_targets: bool,
    last_targets: TargetList,
    context: Option<ExecutionContext>,
    on_resume: Option<ResumeCallback>,
    rng: Box<dyn RandomSource>,
}

impl Default for ExecutionQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExecutionQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionQueue")
            .field("cards", &self.cards.iter().map(EnhancedCard::name).collect::<Vec<_>>())
            .field("cursor", &self.cursor)
            .field("paused", &self.paused)
            .field("awaiting_targets", &self.awaiting_targets)
            .field("has_context", &self.context.is_some())
            .field("has_callback", &self.on_resume.is_some())
            .finish()
    }
}

impl ExecutionQueue {
    /// Empty queue with a fixed-seed RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            cards: Vec::new(),
            cursor: 0,
            paused: false,
            awaiting_targets: false,
            last_targets: TargetList::new(),
            context: None,
            on_resume: None,
            rng: Box::new(GameRng::new(seed)),
        }
    }

    /// Replace the random source (builder pattern).
    #[must_use]
    pub fn with_random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn set_random_source(&mut self, rng: Box<dyn RandomSource>) {
        self.rng = rng;
    }

    pub fn rng_mut(&mut self) -> &mut dyn RandomSource {
        &mut *self.rng
    }

    // === Queries ===

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_awaiting_target_selection(&self) -> bool {
        self.awaiting_targets
    }

    #[must_use]
    pub fn state(&self) -> QueueState {
        match (self.paused, self.awaiting_targets) {
            (true, true) => QueueState::PausedAwaitingTargets,
            (true, false) => QueueState::PausedHardFail,
            _ if self.cursor < self.cards.len() => QueueState::Running,
            _ => QueueState::Idle,
        }
    }

    /// The retained context of the suspended card.
    #[must_use]
    pub fn context(&self) -> Option<&ExecutionContext> {
        self.context.as_ref()
    }

    /// The prompt the caller has to answer, if any.
    #[must_use]
    pub fn pending_prompt(&self) -> Option<&TargetPrompt> {
        self.context.as_ref().and_then(ExecutionContext::prompt)
    }

    /// All queued cards, resolved ones included.
    #[must_use]
    pub fn queue(&self) -> &[EnhancedCard] {
        &self.cards
    }

    /// Index of the next card to run.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The card at the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&EnhancedCard> {
        self.cards.get(self.cursor)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Targets passed to the most recent `provide_targets`.
    #[must_use]
    pub fn last_targets(&self) -> &[Target] {
        &self.last_targets
    }

    // === Queue surgery ===

    /// Append a queue-marked copy of `card`. Returns its index.
    ///
    /// The copy loses its credit costs: credits are paid when a card is
    /// bought, not when it runs.
    pub fn enqueue(&mut self, card: &EnhancedCard) -> usize {
        let index = self.cards.len();
        let from = card.zone().unwrap_or(Zone::Play);
        self.cards.push(move_with_position(card, from, Zone::Queue, Some(index)));
        debug!("enqueued {} at {}", card.name(), index);
        index
    }

    /// Remove the card at `index`.
    ///
    /// Removing an already-resolved card shifts the cursor back so it keeps
    /// pointing at the same pending card. The suspended card cannot be
    /// removed until its execution is canceled.
    pub fn remove_at(&mut self, index: usize) -> Result<EnhancedCard, QueueError> {
        if index >= self.cards.len() {
            return Err(QueueError::IndexOutOfRange {
                index,
                len: self.cards.len(),
            });
        }
        if self.paused && index == self.cursor {
            return Err(QueueError::CardSuspended { index });
        }

        let removed = self.cards.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.cards.len() {
            self.reset_state();
        } else {
            self.restamp();
        }
        Ok(removed)
    }

    /// Move a pending card from `from` to `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), QueueError> {
        let len = self.cards.len();
        for index in [from, to] {
            if index >= len {
                return Err(QueueError::IndexOutOfRange { index, len });
            }
            if index < self.cursor {
                return Err(QueueError::AlreadyResolved { index });
            }
            if self.paused && index == self.cursor {
                return Err(QueueError::CardSuspended { index });
            }
        }

        let card = self.cards.remove(from);
        self.cards.insert(to, card);
        self.restamp();
        Ok(())
    }

    fn restamp(&mut self) {
        for (index, card) in self.cards.iter_mut().enumerate() {
            *card = move_with_position(card, Zone::Queue, Zone::Queue, Some(index));
        }
    }

    // === Driving ===

    /// Run the card at the cursor.
    ///
    /// Does nothing when the queue is drained or paused. A fresh context
    /// is built unless a suspended one is retained.
    pub fn execute_next(&mut self, game: &mut GameState, log: &mut dyn LogSink) -> QueueStep {
        if self.cursor >= self.cards.len() {
            return QueueStep::Idle;
        }
        if self.paused {
            return QueueStep::Paused(self.pause_kind());
        }

        let mut ctx = match self.context.take() {
            Some(ctx) => ctx,
            None => ExecutionContext::new(self.cards[self.cursor].clone(), game),
        };

        let outcome = {
            let mut env = ExecEnv::new(game, log, &mut *self.rng);
            ctx.run(&mut env)
        };

        match outcome {
            PipelineOutcome::Completed => self.finish_card(&ctx, game, log),
            PipelineOutcome::HardFailed(reason) => {
                info!("queue paused at {}: {}", self.cursor, reason);
                self.paused = true;
                self.awaiting_targets = false;
                self.context = Some(ctx);
                QueueStep::Paused(PauseKind::HardFail)
            }
            PipelineOutcome::AwaitingTargets(_) => {
                debug!("queue waiting for targets at {}", self.cursor);
                log.log("Waiting for target selection");
                self.paused = true;
                self.awaiting_targets = true;
                self.context = Some(ctx);
                QueueStep::Paused(PauseKind::AwaitingTargets)
            }
        }
    }

    /// Run cards until the queue drains or a card suspends.
    pub fn execute_all(&mut self, game: &mut GameState, log: &mut dyn LogSink) -> QueueStep {
        loop {
            let step = self.execute_next(game, log);
            if !matches!(step, QueueStep::CardComplete { .. }) {
                return step;
            }
        }
    }

    /// Answer the pending target prompt and resume.
    ///
    /// The suspended card continues from the component that asked; if it
    /// completes, the rest of the queue runs too. A registered resume
    /// callback fires afterwards with `targets`. Without a card waiting for
    /// targets this logs the misuse and returns `Idle`.
    pub fn provide_targets(
        &mut self,
        targets: impl IntoIterator<Item = Target>,
        game: &mut GameState,
        log: &mut dyn LogSink,
    ) -> QueueStep {
        let targets: TargetList = targets.into_iter().collect();

        let Some(ctx) = self.context.as_mut().filter(|_| self.awaiting_targets) else {
            error!("provide_targets called with no card waiting for targets");
            log.log("No card is waiting for targets.");
            return QueueStep::Idle;
        };
        ctx.supply_targets(targets.clone());

        self.last_targets = targets.clone();
        self.paused = false;
        self.awaiting_targets = false;
        let callback = self.on_resume.take();

        let mut step = self.execute_next(game, log);
        if matches!(step, QueueStep::CardComplete { .. }) {
            step = self.execute_all(game, log);
        }

        if let Some(callback) = callback {
            callback(&targets);
        }
        step
    }

    /// Register a one-shot callback for the next `provide_targets`.
    pub fn on_resume(&mut self, callback: impl FnOnce(&[Target]) + 'static) {
        self.on_resume = Some(Box::new(callback));
    }

    /// Stop waiting on the suspended card.
    ///
    /// The card stays at the cursor; the next `execute_next` runs it again
    /// from its first component with a fresh context.
    pub fn cancel_execution(&mut self) {
        if self.paused {
            debug!("canceled suspended card at {}", self.cursor);
        }
        self.paused = false;
        self.awaiting_targets = false;
        self.context = None;
        self.on_resume = None;
    }

    /// Drop every card and all driver state. The random source is kept.
    pub fn reset_state(&mut self) {
        self.cards.clear();
        self.cursor = 0;
        self.paused = false;
        self.awaiting_targets = false;
        self.last_targets.clear();
        self.context = None;
        self.on_resume = None;
    }

    fn pause_kind(&self) -> PauseKind {
        if self.awaiting_targets {
            PauseKind::AwaitingTargets
        } else {
            PauseKind::HardFail
        }
    }

    /// Move the finished card to its player's discard and advance.
    fn finish_card(&mut self, ctx: &ExecutionContext, game: &mut GameState, log: &mut dyn LogSink) -> QueueStep {
        let instance = ctx.card().instance_id;
        if let Some(owner) = game.player_mut(ctx.player) {
            if let Some(card) = owner.take_from(Pile::Play, instance) {
                owner.discard.push_back(move_card_to_zone(&card, Zone::Play, Zone::Discard));
            }
        }
        log.log(&format!("{} resolved", ctx.card().name()));

        self.cursor += 1;
        if self.cursor >= self.cards.len() {
            self.reset_state();
            QueueStep::QueueComplete
        } else {
            QueueStep::CardComplete {
                remaining: self.cards.len() - self.cursor,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, CardType};
    use crate::components::{Component, ComponentKind, SingleTarget};
    use crate::core::{EngineConfig, PlayerId};

    fn card(name: &str, components: Vec<Component>) -> EnhancedCard {
        EnhancedCard::new(Card::new(CardId::new(1), name, CardType::Event), components)
    }

    #[test]
    fn test_enqueue_strips_credit_cost_and_stamps_position() {
        let mut queue = ExecutionQueue::new();
        queue.enqueue(&card("A", vec![Component::credit_cost(2), Component::gain_credits(1)]));
        queue.enqueue(&card("B", vec![]));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.queue()[0].count_kind(ComponentKind::CreditCost), 0);
        assert!(matches!(
            queue.queue()[1].components.last(),
            Some(Component::ZoneMarker { zone: Zone::Queue, position: Some(1) })
        ));
        assert_eq!(queue.state(), QueueState::Running);
    }

    #[test]
    fn test_execute_next_on_empty_is_idle() {
        let mut queue = ExecutionQueue::new();
        let mut game = GameState::new(&EngineConfig::default());
        let mut log: Vec<String> = Vec::new();

        assert_eq!(queue.execute_next(&mut game, &mut log), QueueStep::Idle);
        assert_eq!(queue.state(), QueueState::Idle);
    }

    #[test]
    fn test_paused_queue_does_not_advance() {
        let mut queue = ExecutionQueue::new();
        let mut game = GameState::new(&EngineConfig::default());
        let mut log: Vec<String> = Vec::new();
        queue.enqueue(&card("Probe", vec![Component::select_one(SingleTarget::Threat)]));

        let step = queue.execute_next(&mut game, &mut log);
        assert_eq!(step, QueueStep::Paused(PauseKind::AwaitingTargets));
        assert_eq!(queue.execute_next(&mut game, &mut log), step);
        assert_eq!(queue.cursor(), 0);
        assert!(queue.pending_prompt().is_some());
    }

    #[test]
    fn test_provide_targets_without_pause_is_logged() {
        let mut queue = ExecutionQueue::new();
        let mut game = GameState::new(&EngineConfig::default());
        let mut log: Vec<String> = Vec::new();

        let step = queue.provide_targets([Target::Player(PlayerId::new(0))], &mut game, &mut log);
        assert_eq!(step, QueueStep::Idle);
        assert_eq!(log, vec!["No card is waiting for targets.".to_string()]);
    }

    #[test]
    fn test_remove_before_cursor_shifts_cursor() {
        let mut queue = ExecutionQueue::new();
        let mut game = GameState::new(&EngineConfig::default());
        let mut log: Vec<String> = Vec::new();
        queue.enqueue(&card("A", vec![]));
        queue.enqueue(&card("B", vec![]));
        queue.enqueue(&card("C", vec![]));

        queue.execute_next(&mut game, &mut log);
        assert_eq!(queue.cursor(), 1);

        let removed = queue.remove_at(0).unwrap();
        assert_eq!(removed.name(), "A");
        assert_eq!(queue.cursor(), 0);
        assert_eq!(queue.current().map(EnhancedCard::name), Some("B"));
    }

    #[test]
    fn test_remove_last_pending_resets() {
        let mut queue = ExecutionQueue::new();
        let mut game = GameState::new(&EngineConfig::default());
        let mut log: Vec<String> = Vec::new();
        queue.enqueue(&card("A", vec![]));
        queue.enqueue(&card("B", vec![]));
        queue.execute_next(&mut game, &mut log);

        queue.remove_at(1).unwrap();
        assert!(queue.is_empty());
        assert_eq!(queue.cursor(), 0);
    }

    #[test]
    fn test_surgery_errors() {
        let mut queue = ExecutionQueue::new();
        let mut game = GameState::new(&EngineConfig::default());
        let mut log: Vec<String> = Vec::new();
        queue.enqueue(&card("Probe", vec![Component::select_one(SingleTarget::Threat)]));
        queue.enqueue(&card("B", vec![]));
        queue.execute_next(&mut game, &mut log);

        assert_eq!(queue.remove_at(5).unwrap_err(), QueueError::IndexOutOfRange { index: 5, len: 2 });
        assert_eq!(queue.remove_at(0).unwrap_err(), QueueError::CardSuspended { index: 0 });
        assert_eq!(queue.reorder(1, 0).unwrap_err(), QueueError::CardSuspended { index: 0 });
    }

    #[test]
    fn test_reorder_restamps_positions() {
        let mut queue = ExecutionQueue::new();
        queue.enqueue(&card("A", vec![]));
        queue.enqueue(&card("B", vec![]));
        queue.enqueue(&card("C", vec![]));

        queue.reorder(2, 0).unwrap();
        let names: Vec<_> = queue.queue().iter().map(EnhancedCard::name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert!(matches!(
            queue.queue()[0].components.last(),
            Some(Component::ZoneMarker { zone: Zone::Queue, position: Some(0) })
        ));
        assert!(queue.queue().iter().all(|c| c.zone_marker_count() == 1));
    }

    #[test]
    fn test_cancel_keeps_card_at_cursor() {
        let mut queue = ExecutionQueue::new();
        let mut game = GameState::new(&EngineConfig::default());
        let mut log: Vec<String> = Vec::new();
        queue.enqueue(&card("Probe", vec![Component::select_one(SingleTarget::Threat)]));
        queue.execute_next(&mut game, &mut log);

        queue.cancel_execution();
        assert!(!queue.is_paused());
        assert!(queue.context().is_none());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.cursor(), 0);

        // Runs again from scratch and asks again
        assert_eq!(
            queue.execute_next(&mut game, &mut log),
            QueueStep::Paused(PauseKind::AwaitingTargets)
        );
    }
}
