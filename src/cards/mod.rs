//! Card system: templates, enhanced cards, and the registry.
//!
//! ## Key Types
//!
//! - `Card`: immutable template data (name, cost, type, keywords)
//! - `EnhancedCard`: a `Card` plus its ordered component list
//! - `InstanceId`: identity of one runtime copy
//! - `CardRegistry`: template lookup and instantiation

pub mod definition;
pub mod enhanced;
pub mod registry;

pub use definition::{Card, CardId, CardType, LegacyEffect, LegacyEffectKind};
pub use enhanced::{EnhancedCard, InstanceId};
pub use registry::{sample_cards, CardRegistry};
