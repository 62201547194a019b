//! Per-card execution state and the component pipeline.
//!
//! An [`ExecutionContext`] lives for one execution attempt of one card. It
//! is built fresh when the queue reaches the card and retained by the queue
//! while the card is suspended, so a resume continues the same attempt.
//!
//! The mutable world (game state, narration sink, random source) is not
//! stored on the context. It is lent to each run through [`ExecEnv`].

use log::{debug, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::target::TargetList;
use crate::cards::{EnhancedCard, InstanceId};
use crate::components::{ComponentKind, ComponentOutcome, FailureReason, TargetPrompt};
use crate::core::{GameState, LogSink, PlayerId, RandomSource};
use crate::execution::Target;

/// Borrowed world a pipeline run acts on.
pub struct ExecEnv<'a> {
    pub game: &'a mut GameState,
    pub log: &'a mut dyn LogSink,
    pub rng: &'a mut dyn RandomSource,
}

impl<'a> ExecEnv<'a> {
    pub fn new(game: &'a mut GameState, log: &'a mut dyn LogSink, rng: &'a mut dyn RandomSource) -> Self {
        Self { game, log, rng }
    }

    /// Write one narration line.
    pub fn say(&mut self, message: impl AsRef<str>) {
        self.log.log(message.as_ref());
    }
}

/// Where an execution attempt currently stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ContextStatus {
    #[default]
    Running,
    HardFailed(FailureReason),
    AwaitingTargets(TargetPrompt),
}

/// How a pipeline run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Every component ran.
    Completed,
    HardFailed(FailureReason),
    AwaitingTargets(TargetPrompt),
}

/// State of one execution attempt.
#[derive(Clone, Debug)]
pub struct ExecutionContext {
    card: EnhancedCard,
    /// Player whose card this is.
    pub player: PlayerId,
    /// Everyone else, in seat order after `player`.
    pub opponents: SmallVec<[PlayerId; 4]>,
    /// Resolved targets. Empty until a targeting component runs.
    pub targets: TargetList,
    /// Cards trashed to pay costs during this attempt.
    pub recently_trashed: Vec<EnhancedCard>,
    /// Deck cards revealed during this attempt.
    pub revealed: Vec<InstanceId>,
    /// Entities scanned during this attempt.
    pub scanned: Vec<Target>,
    bonuses: FxHashMap<ComponentKind, i64>,
    status: ContextStatus,
    targets_confirmed: bool,
    next_component: usize,
    answered_component: Option<usize>,
}

impl ExecutionContext {
    /// Context for the active player.
    #[must_use]
    pub fn new(card: EnhancedCard, game: &GameState) -> Self {
        Self::for_player(card, game.active_player, game)
    }

    /// Context for an explicit acting player.
    #[must_use]
    pub fn for_player(card: EnhancedCard, player: PlayerId, game: &GameState) -> Self {
        Self {
            card,
            player,
            opponents: game.opponents_of(player).into_iter().collect(),
            targets: TargetList::new(),
            recently_trashed: Vec::new(),
            revealed: Vec::new(),
            scanned: Vec::new(),
            bonuses: FxHashMap::default(),
            status: ContextStatus::Running,
            targets_confirmed: false,
            next_component: 0,
            answered_component: None,
        }
    }

    /// The card being executed.
    #[must_use]
    pub fn card(&self) -> &EnhancedCard {
        &self.card
    }

    // === Control flags ===

    #[must_use]
    pub fn status(&self) -> &ContextStatus {
        &self.status
    }

    /// Hard-failed or waiting for targets.
    #[must_use]
    pub fn execution_paused(&self) -> bool {
        !matches!(self.status, ContextStatus::Running)
    }

    #[must_use]
    pub fn awaiting_target_selection(&self) -> bool {
        matches!(self.status, ContextStatus::AwaitingTargets(_))
    }

    /// Whether the caller has supplied targets during this attempt.
    #[must_use]
    pub fn targets_confirmed(&self) -> bool {
        self.targets_confirmed
    }

    /// The pending prompt, while waiting for targets.
    #[must_use]
    pub fn prompt(&self) -> Option<&TargetPrompt> {
        match &self.status {
            ContextStatus::AwaitingTargets(prompt) => Some(prompt),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&FailureReason> {
        match &self.status {
            ContextStatus::HardFailed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Index of the component the next run starts at.
    #[must_use]
    pub fn next_component(&self) -> usize {
        self.next_component
    }

    /// True while re-applying the component whose prompt was just answered.
    #[must_use]
    pub fn answered(&self) -> bool {
        self.answered_component == Some(self.next_component)
    }

    // === Bonuses ===

    #[must_use]
    pub fn bonus(&self, kind: ComponentKind) -> i64 {
        self.bonuses.get(&kind).copied().unwrap_or(0)
    }

    pub fn add_bonus(&mut self, kind: ComponentKind, amount: i64) {
        *self.bonuses.entry(kind).or_insert(0) += amount;
    }

    /// Effective amount for a component of `kind` with base `base`.
    #[must_use]
    pub fn boosted(&self, kind: ComponentKind, base: i64) -> i64 {
        base + self.bonus(kind)
    }

    // === Resume ===

    /// Install caller-selected targets and clear the suspension.
    pub fn supply_targets(&mut self, targets: TargetList) {
        self.targets = targets;
        self.status = ContextStatus::Running;
        self.targets_confirmed = true;
        self.answered_component = Some(self.next_component);
    }

    /// Run components from `next_component` until the end or a stop.
    pub fn run(&mut self, env: &mut ExecEnv<'_>) -> PipelineOutcome {
        let name = self.card.name().to_string();

        if self.card.components.iter().all(|c| c.kind() == ComponentKind::ZoneMarker) {
            env.say(format!("{}: nothing to execute", name));
            return PipelineOutcome::Completed;
        }

        while self.next_component < self.card.components.len() {
            let component = self.card.components[self.next_component].clone();

            match component.apply(self, env) {
                ComponentOutcome::Continue => {
                    self.next_component += 1;
                }
                ComponentOutcome::HardFail(reason) => {
                    warn!("{} failed at component {}: {}", name, self.next_component, reason);
                    env.say(format!("{}: {}", name, reason));
                    self.status = ContextStatus::HardFailed(reason.clone());
                    return PipelineOutcome::HardFailed(reason);
                }
                ComponentOutcome::AwaitTargets(prompt) => {
                    debug!("{} waiting on component {}", name, self.next_component);
                    env.say(&prompt.message);
                    self.status = ContextStatus::AwaitingTargets(prompt.clone());
                    return PipelineOutcome::AwaitingTargets(prompt);
                }
            }
        }

        self.answered_component = None;
        PipelineOutcome::Completed
    }
}
