//! A playable session: game state, card registry, execution queue and
//! narration wired together.
//!
//! `Session` is the surface a host (CLI, server, AI loop) drives. Every
//! call is synchronous; when a card needs input the call returns
//! `QueueStep::Paused` and the host answers with [`Session::provide_targets`].

use log::info;

use crate::cards::{CardId, CardRegistry, InstanceId};
use crate::components::{candidates, TargetPrompt};
use crate::core::{EngineConfig, GameLog, GameState, LogSink, Pile, PlayerId, RandomSource};
use crate::execution::{ExecutionQueue, QueueStep, Target, TargetList};
use crate::rules::{GameResult, RulesError};
use crate::zones::Zone;

/// Game state plus the machinery that runs cards against it.
#[derive(Debug)]
pub struct Session {
    config: EngineConfig,
    state: GameState,
    queue: ExecutionQueue,
    log: GameLog,
    registry: CardRegistry,
}

impl Session {
    /// Start a session from `config` with the given card pool.
    #[must_use]
    pub fn new(config: EngineConfig, registry: CardRegistry) -> Self {
        Self {
            state: GameState::new(&config),
            queue: ExecutionQueue::with_seed(config.seed),
            log: GameLog::new(config.log_capacity),
            registry,
            config,
        }
    }

    /// Replace the random source (builder pattern).
    #[must_use]
    pub fn with_random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.queue.set_random_source(Box::new(rng));
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn queue(&self) -> &ExecutionQueue {
        &self.queue
    }

    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    // === Setup ===

    /// Put a new copy of a registered card into one of a player's piles.
    pub fn give_card(&mut self, player: PlayerId, card: CardId, pile: Pile) -> Option<InstanceId> {
        let zone = match pile {
            Pile::Deck => Zone::Deck,
            Pile::Hand => Zone::Hand,
            Pile::Discard => Zone::Discard,
            Pile::Play => Zone::Play,
        };
        let instance = self.registry.instantiate(card, zone, &mut self.state)?;
        let id = instance.instance_id;
        self.state.player_mut(player)?.pile_mut(pile).push_back(instance);
        Some(id)
    }

    /// Put a new copy of a registered card into the market row.
    pub fn stock_market(&mut self, card: CardId) -> Option<InstanceId> {
        let template = self.registry.get(card)?;
        Some(self.state.add_to_market(template))
    }

    // === Turn actions ===

    /// Play a card from the active player's hand and queue it.
    ///
    /// Returns the queue index. Nothing runs until [`Session::resolve`].
    pub fn play_card(&mut self, instance: InstanceId) -> Result<usize, RulesError> {
        let player = self.state.active_player;
        let played = self.state.play_from_hand(player, instance)?;
        self.log.log(&format!("{} plays {}", self.state.active().name, played.name()));
        Ok(self.queue.enqueue(&played))
    }

    /// Run queued cards until the queue drains or a card suspends.
    pub fn resolve(&mut self) -> QueueStep {
        self.queue.execute_all(&mut self.state, &mut self.log)
    }

    /// Answer the pending prompt and keep resolving.
    pub fn provide_targets(&mut self, targets: impl IntoIterator<Item = Target>) -> QueueStep {
        self.queue.provide_targets(targets, &mut self.state, &mut self.log)
    }

    /// The prompt the host has to answer, if any.
    #[must_use]
    pub fn pending_prompt(&self) -> Option<&TargetPrompt> {
        self.queue.pending_prompt()
    }

    /// Legal answers to the pending prompt.
    #[must_use]
    pub fn prompt_candidates(&self) -> Option<TargetList> {
        let ctx = self.queue.context()?;
        let prompt = ctx.prompt()?;
        Some(candidates(&prompt.request, ctx, &self.state))
    }

    /// Give up on the suspended card. It stays queued and reruns on the
    /// next [`Session::resolve`].
    pub fn cancel(&mut self) {
        self.queue.cancel_execution();
    }

    /// Buy from the market for the active player.
    pub fn buy(&mut self, index: usize) -> Result<InstanceId, RulesError> {
        let player = self.state.active_player;
        let bought = self.state.buy_from_market(player, index)?;
        self.log.log(&format!("{} buys a card", self.state.active().name));
        Ok(bought)
    }

    /// End the active player's turn. Unresolved queue entries are dropped.
    pub fn end_turn(&mut self) {
        if !self.queue.is_empty() {
            info!("ending turn with {} queued card(s)", self.queue.len() - self.queue.cursor());
        }
        self.queue.reset_state();
        self.state.end_turn(&self.config, self.queue.rng_mut());
        self.log.log(&format!("Turn {}: {}", self.state.turn_number, self.state.active().name));
    }

    #[must_use]
    pub fn game_over(&self) -> Option<GameResult> {
        self.state.check_game_over()
    }
}
