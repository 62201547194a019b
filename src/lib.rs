//! # runner-ccg
//!
//! A deckbuilding card engine where every card is an ordered list of
//! composable components, executed by a resumable queue.
//!
//! ## Design Principles
//!
//! 1. **Components, not scripts**: a card's behavior is data. Costs,
//!    targeting and effects are variants of one closed `Component` enum and
//!    run strictly in order.
//!
//! 2. **Explicit suspension**: when a card needs a player choice the queue
//!    stops and returns. The caller answers with `provide_targets` and the
//!    same execution attempt continues. Nothing blocks.
//!
//! 3. **Zones are labels**: each card instance carries one zone marker that
//!    mirrors the pile holding it. Every pile move re-marks the instance.
//!
//! 4. **Deterministic by default**: all randomness flows through an
//!    injectable `RandomSource`, seeded from `EngineConfig`.
//!
//! ## Modules
//!
//! - `core`: players, game state, RNG, configuration, narration sink
//! - `cards`: card templates, enhanced cards, registry
//! - `components`: the component protocol and every component kind
//! - `zones`: zone labels and zone transitions
//! - `execution`: execution context and the execution queue
//! - `rules`: drawing, buying, playing, turn cleanup, game over
//! - `session`: everything above wired together for a host

pub mod core;
pub mod cards;
pub mod components;
pub mod zones;
pub mod execution;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, GameLog, GameRng, GameRngState, GameState, Location, LogSink, Pile, Player, PlayerId,
    PlayerMap, RandomSource, ScriptedRng, Threat, ThreatId,
};

pub use crate::cards::{Card, CardId, CardRegistry, CardType, EnhancedCard, InstanceId};

pub use crate::components::{
    Component, ComponentKind, ComponentOutcome, DamageLabel, FailureReason, KeywordPool, Resource, SingleTarget,
    TargetFilter, TargetPool, TargetPrompt, TargetRequest, TrashTarget,
};

pub use crate::zones::{move_card_to_zone, Zone};

pub use crate::execution::{
    ExecEnv, ExecutionContext, ExecutionQueue, PauseKind, PipelineOutcome, QueueError, QueueState, QueueStep, Target,
    TargetList,
};

pub use crate::rules::{GameResult, RulesError};

pub use crate::session::Session;
