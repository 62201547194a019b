//! Resolved targets.
//!
//! A `Target` names one entity a component acts on. Targeting components
//! fill `ExecutionContext::targets` with them; effects read them back.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::InstanceId;
use crate::core::{PlayerId, ThreatId};

/// An entity a card can act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Player(PlayerId),
    Threat(ThreatId),
    /// A card instance, looked up in the piles it may live in.
    Card(InstanceId),
}

/// Target list. Most cards aim at a handful of entities.
pub type TargetList = SmallVec<[Target; 4]>;

impl Target {
    #[must_use]
    pub fn as_player(self) -> Option<PlayerId> {
        match self {
            Target::Player(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_threat(self) -> Option<ThreatId> {
        match self {
            Target::Threat(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_card(self) -> Option<InstanceId> {
        match self {
            Target::Card(c) => Some(c),
            _ => None,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Player(p) => write!(f, "{}", p),
            Target::Threat(t) => write!(f, "{}", t),
            Target::Card(c) => write!(f, "Card {}", c),
        }
    }
}
