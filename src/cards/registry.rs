//! Card registry for template lookup and instantiation.
//!
//! The `CardRegistry` stores every enhanced-card template of a game. Runtime
//! copies are made with [`CardRegistry::instantiate`], which hands out a fresh
//! `InstanceId` and tags the copy with its starting zone.

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId, CardType};
use super::enhanced::EnhancedCard;
use crate::components::{Component, ComponentKind, DamageLabel, Resource, SingleTarget, TargetFilter, TargetPool, TrashTarget};
use crate::core::GameState;
use crate::zones::{move_card_to_zone, Zone};

/// Registry of enhanced-card templates.
///
/// ## Example
///
/// ```
/// use runner_ccg::cards::{Card, CardId, CardRegistry, CardType, EnhancedCard};
/// use runner_ccg::components::Component;
///
/// let mut registry = CardRegistry::new();
/// registry.register(EnhancedCard::new(
///     Card::new(CardId::new(1), "Payday", CardType::Event),
///     [Component::self_target(), Component::gain_credits(3)],
/// ));
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().name(), "Payday");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, EnhancedCard>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: EnhancedCard) {
        let id = card.card.id;
        if self.cards.contains_key(&id) {
            panic!("Card with ID {:?} already registered", id);
        }
        self.cards.insert(id, card);
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&EnhancedCard> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnhancedCard> {
        self.cards.values()
    }

    /// Copy a template into the game with a fresh instance id and zone marker.
    #[must_use]
    pub fn instantiate(&self, id: CardId, zone: Zone, state: &mut GameState) -> Option<EnhancedCard> {
        let template = self.cards.get(&id)?;
        let instance = template.clone().with_instance(state.alloc_instance());
        Some(move_card_to_zone(&instance, zone, zone))
    }

    /// A small built-in card set, used by tests and benchmarks.
    #[must_use]
    pub fn sample() -> Self {
        let mut registry = Self::new();
        for card in sample_cards() {
            registry.register(card);
        }
        registry
    }
}

/// Built-in sample definitions.
#[must_use]
pub fn sample_cards() -> Vec<EnhancedCard> {
    vec![
        EnhancedCard::new(
            Card::new(CardId::new(1), "Payday", CardType::Event)
                .with_cost(1)
                .with_description("Gain 3 credits."),
            [Component::self_target(), Component::action_cost(1), Component::gain_credits(3)],
        ),
        EnhancedCard::new(
            Card::new(CardId::new(2), "Neural Spike", CardType::Event)
                .with_cost(3)
                .with_keywords(["attack"])
                .with_description("Deal 2 net damage to a threat."),
            [
                Component::select_one(SingleTarget::Threat),
                Component::action_cost(1),
                Component::deal_damage(2, DamageLabel::Net),
            ],
        ),
        EnhancedCard::new(
            Card::new(CardId::new(3), "Botnet", CardType::Program)
                .with_cost(4)
                .with_keywords(["virus"])
                .with_description("Deal 1 damage to up to 2 threats. Virus: +1 damage."),
            [
                Component::KeywordSynergy {
                    keyword: "virus".to_string(),
                    boosts: ComponentKind::DealDamage,
                    bonus: 1,
                },
                Component::auto_many(TargetPool::Threats, 2),
                Component::deal_damage(1, DamageLabel::Meat),
            ],
        ),
        EnhancedCard::new(
            Card::new(CardId::new(4), "Scrap Deal", CardType::Event)
                .with_cost(2)
                .with_description("Trash a hardware you control: gain 2 credits per card trashed."),
            [
                Component::trash(TrashTarget::OfType(CardType::Hardware)),
                Component::RecycleGain {
                    resource: Resource::Credits,
                    per_card: 2,
                },
            ],
        ),
        EnhancedCard::new(
            Card::new(CardId::new(5), "Cyberdeck", CardType::Hardware)
                .with_cost(3)
                .with_keywords(["console"]),
            [Component::self_target(), Component::gain_action(1)],
        ),
        EnhancedCard::new(
            Card::new(CardId::new(6), "Firewall Ping", CardType::Program)
                .with_cost(2)
                .with_keywords(["icebreaker"]),
            [
                Component::SingleEntityTarget {
                    target: SingleTarget::Threat,
                    allow_selection: false,
                    filter: Some(TargetFilter::MaxHealth(3)),
                },
                Component::ScanEntity,
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;

    #[test]
    fn test_sample_registry() {
        let registry = CardRegistry::sample();
        assert_eq!(registry.len(), sample_cards().len());
        assert!(registry.contains(CardId::new(2)));
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_instantiate_assigns_identity_and_zone() {
        let registry = CardRegistry::sample();
        let mut state = GameState::new(&EngineConfig::default());

        let a = registry.instantiate(CardId::new(1), Zone::Deck, &mut state).unwrap();
        let b = registry.instantiate(CardId::new(1), Zone::Deck, &mut state).unwrap();

        assert_ne!(a.instance_id, b.instance_id);
        assert_eq!(a.zone(), Some(Zone::Deck));
        assert_eq!(a.zone_marker_count(), 1);
        // Template untouched
        assert_eq!(registry.get(CardId::new(1)).unwrap().zone(), None);
    }

    #[test]
    fn test_instantiate_unknown() {
        let registry = CardRegistry::new();
        let mut state = GameState::new(&EngineConfig::default());
        assert!(registry.instantiate(CardId::new(99), Zone::Hand, &mut state).is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_registration_panics() {
        let mut registry = CardRegistry::sample();
        registry.register(sample_cards().remove(0));
    }
}
