//! Core engine types: players, state, RNG, configuration, narration.

pub mod player;
pub mod rng;
pub mod config;
pub mod narration;
pub mod state;

pub use player::{Pile, Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRng};
pub use config::EngineConfig;
pub use narration::{GameLog, LogSink};
pub use state::{GameState, Location, Threat, ThreatId};
