//! Card definitions - static card data.
//!
//! `Card` holds the immutable template of a card: name, cost, faction,
//! type, keywords. Behavior lives in the component list of an
//! [`EnhancedCard`](super::EnhancedCard), not here.
//!
//! The `legacy_effects` descriptors predate components. They are kept as
//! data so old content still loads; the engine never interprets them.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card (e.g., "Neural Spike"),
/// not a specific copy in someone's deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Broad card category, used by trash costs and combo checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Program,
    Hardware,
    Resource,
    Event,
    Operative,
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardType::Program => "program",
            CardType::Hardware => "hardware",
            CardType::Resource => "resource",
            CardType::Event => "event",
            CardType::Operative => "operative",
        };
        f.write_str(name)
    }
}

/// What a legacy effect descriptor did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyEffectKind {
    GainCredits,
    DealDamage,
    DrawCards,
    GainAction,
    Heal,
}

/// Pre-component effect descriptor (amount + kind).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyEffect {
    pub kind: LegacyEffectKind,
    pub amount: i64,
}

/// Static card template.
///
/// Copied into every instance; never shared by reference between decks.
///
/// ## Example
///
/// ```
/// use runner_ccg::cards::{Card, CardId, CardType};
///
/// let spike = Card::new(CardId::new(1), "Neural Spike", CardType::Event)
///     .with_cost(2)
///     .with_keywords(["virus", "attack"]);
///
/// assert!(spike.has_keyword("virus"));
/// assert!(!spike.has_keyword("icebreaker"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    /// Market price in credits.
    pub cost: i64,
    pub faction: String,
    pub card_type: CardType,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub legacy_effects: Vec<LegacyEffect>,
}

impl Card {
    /// Create a new card with no cost, keywords or text.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            name: name.into(),
            cost: 0,
            faction: "neutral".to_string(),
            card_type,
            keywords: Vec::new(),
            description: String::new(),
            legacy_effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_faction(mut self, faction: impl Into<String>) -> Self {
        self.faction = faction.into();
        self
    }

    #[must_use]
    pub fn with_keywords<S: Into<String>>(mut self, keywords: impl IntoIterator<Item = S>) -> Self {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_legacy_effect(mut self, kind: LegacyEffectKind, amount: i64) -> Self {
        self.legacy_effects.push(LegacyEffect { kind, amount });
        self
    }

    /// Case-insensitive keyword check.
    #[must_use]
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword))
    }
}
