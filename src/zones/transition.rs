//! Zone transitions on card instances.
//!
//! [`move_card_to_zone`] produces a re-marked copy of a card; it never
//! touches the pile the card sits in. Whoever moves the card between piles
//! swaps the returned copy in.

use log::trace;

use super::zone::Zone;
use crate::cards::EnhancedCard;
use crate::components::{Component, ComponentKind};

/// Re-mark `card` as living in `to`.
///
/// 1. Clone the instance and its components.
/// 2. Drop every zone marker.
/// 3. Drop credit costs when entering the queue (credits are paid at
///    purchase, never at execution).
/// 4. Append a fresh marker for `to`.
///
/// Applying the same move twice yields the same marker state.
#[must_use]
pub fn move_card_to_zone(card: &EnhancedCard, from: Zone, to: Zone) -> EnhancedCard {
    move_with_position(card, from, to, None)
}

/// Same as [`move_card_to_zone`], recording a position in the new marker.
///
/// The execution queue uses this to stamp each entry with its slot.
#[must_use]
pub fn move_with_position(card: &EnhancedCard, from: Zone, to: Zone, position: Option<usize>) -> EnhancedCard {
    let mut moved = card.clone();
    moved.components.retain(|c| {
        let kind = c.kind();
        kind != ComponentKind::ZoneMarker && !(to == Zone::Queue && kind == ComponentKind::CreditCost)
    });
    moved.components.push(Component::ZoneMarker { zone: to, position });

    trace!("zone move {} {}: {} -> {}", moved.name(), moved.instance_id, from, to);
    moved
}
