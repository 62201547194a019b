//! Game rules outside card execution.
//!
//! Drawing, discarding, buying, playing and turn cleanup are inherent
//! methods on `GameState` defined in [`actions`]. Each keeps the zone marker
//! of the cards it moves in step with the pile they end up in.

pub mod actions;

pub use actions::{GameResult, RulesError};
