//! Zone bookkeeping for card instances.
//!
//! Every instance carries at most one zone marker component naming the
//! logical zone its authoritative copy lives in. Containment itself (which
//! pile holds the card) belongs to `GameState`; the functions here only
//! re-mark instances.
//!
//! ## Key Types
//!
//! - `Zone`: market, deck, hand, queue, play, discard
//! - `move_card_to_zone`: marker swap on a copied instance

pub mod zone;
pub mod transition;

pub use transition::{move_card_to_zone, move_with_position};
pub use zone::Zone;
