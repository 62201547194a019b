//! Enhanced cards - a card template plus its ordered components.
//!
//! Component order is semantic: the execution engine runs them strictly
//! left to right and a later component may depend on what an earlier one
//! did (a failed cost stops everything after it).
//!
//! Each runtime copy carries an `InstanceId`. Zone transitions clone the
//! whole value, so the marker on one copy never shows up on another.

use serde::{Deserialize, Serialize};

use super::definition::Card;
use crate::components::{Component, ComponentKind};
use crate::zones::Zone;

/// Identity of one physical copy of a card during a game.
///
/// `InstanceId(0)` is reserved for templates that were never instantiated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

impl InstanceId {
    pub const TEMPLATE: InstanceId = InstanceId(0);
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A card with behavior attached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnhancedCard {
    #[serde(default = "template_instance")]
    pub instance_id: InstanceId,
    pub card: Card,
    #[serde(default)]
    pub components: Vec<Component>,
}

fn template_instance() -> InstanceId {
    InstanceId::TEMPLATE
}

impl EnhancedCard {
    /// Create a template (not yet instantiated) from a card and components.
    #[must_use]
    pub fn new(card: Card, components: impl IntoIterator<Item = Component>) -> Self {
        Self {
            instance_id: InstanceId::TEMPLATE,
            card,
            components: components.into_iter().collect(),
        }
    }

    /// Append a component (builder pattern).
    #[must_use]
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Assign an instance id (builder pattern).
    #[must_use]
    pub fn with_instance(mut self, instance_id: InstanceId) -> Self {
        self.instance_id = instance_id;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.card.name
    }

    /// The zone named by this instance's marker, if it has one.
    #[must_use]
    pub fn zone(&self) -> Option<Zone> {
        self.components.iter().find_map(Component::zone)
    }

    /// Number of zone markers attached. Never more than one after a transition.
    #[must_use]
    pub fn zone_marker_count(&self) -> usize {
        self.count_kind(ComponentKind::ZoneMarker)
    }

    #[must_use]
    pub fn count_kind(&self, kind: ComponentKind) -> usize {
        self.components.iter().filter(|c| c.kind() == kind).count()
    }

    #[must_use]
    pub fn has_kind(&self, kind: ComponentKind) -> bool {
        self.components.iter().any(|c| c.kind() == kind)
    }

    /// Sum of all credit-cost components; the base cost if there are none.
    #[must_use]
    pub fn purchase_price(&self) -> i64 {
        let mut found = false;
        let total = self
            .components
            .iter()
            .filter_map(|c| match c {
                Component::CreditCost { amount } => {
                    found = true;
                    Some(*amount)
                }
                _ => None,
            })
            .sum();
        if found {
            total
        } else {
            self.card.cost
        }
    }
}
