//! What a component reports back to the pipeline.
//!
//! A component either lets the pipeline continue, stops it for good
//! (`HardFail`) or suspends it until the caller supplies targets
//! (`AwaitTargets`). Failure reasons and prompts are plain data so the
//! driver can keep them on the retained context for inspection.

use serde::{Deserialize, Serialize};

use super::{DamageLabel, KeywordPool, SingleTarget, TargetFilter, TargetPool, TrashTarget};
use crate::cards::{CardId, CardType};
use crate::core::PlayerId;

/// Result of applying one component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComponentOutcome {
    /// Move on to the next component.
    Continue,
    /// Precondition unmet. Not recoverable by supplying targets.
    HardFail(FailureReason),
    /// Suspend until targets are supplied.
    AwaitTargets(TargetPrompt),
}

/// Why a cost, requirement or target check refused to proceed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    InsufficientCredits { needed: i64, available: i64 },
    InsufficientActions { needed: i64, available: i64 },
    InsufficientHealth { needed: i64, available: i64, label: DamageLabel },
    MissingKeyword { keyword: String, needed: usize, found: usize, pool: KeywordPool },
    /// The card to trash is not in the acting player's play area.
    NotInPlay { card: String },
    WrongCardType { card: String, expected: CardType, found: CardType },
    WrongCard { card: String, expected: CardId },
    MissingTrashKeyword { card: String, keyword: String },
    /// A trash prompt was answered without a card.
    NoTrashChoice,
    UnknownPlayer(PlayerId),
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::InsufficientCredits { needed, available } => {
                write!(f, "Not enough credits: need {}, have {}", needed, available)
            }
            FailureReason::InsufficientActions { needed, available } => {
                write!(f, "Not enough actions: need {}, have {}", needed, available)
            }
            FailureReason::InsufficientHealth { needed, available, label } => {
                write!(f, "Cannot take {} {} damage with {} health", needed, label, available)
            }
            FailureReason::MissingKeyword { keyword, needed, found, pool } => {
                write!(f, "Requires {} {} card(s) in {}, found {}", needed, keyword, pool, found)
            }
            FailureReason::NotInPlay { card } => write!(f, "{} is not in play and cannot be trashed", card),
            FailureReason::WrongCardType { card, expected, found } => {
                write!(f, "{} is a {}, a {} is required", card, found, expected)
            }
            FailureReason::WrongCard { card, expected } => {
                write!(f, "{} cannot pay this cost, {} is required", card, expected)
            }
            FailureReason::MissingTrashKeyword { card, keyword } => {
                write!(f, "{} lacks the {} keyword", card, keyword)
            }
            FailureReason::NoTrashChoice => f.write_str("No card was chosen to trash"),
            FailureReason::UnknownPlayer(player) => write!(f, "{} is not at the table", player),
        }
    }
}

/// What kind of input the caller has to supply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetRequest {
    /// One entity of the given kind.
    Entity { target: SingleTarget, filter: Option<TargetFilter> },
    /// Up to `max` entities from a pool.
    UpTo { pool: TargetPool, max: usize, filter: Option<TargetFilter> },
    /// A card in play to pay a trash cost with.
    TrashCard { target: TrashTarget, keyword: Option<String> },
    /// Cards from the acting player's hand.
    DiscardFromHand { count: usize },
    /// No entity needed; resuming with an empty list confirms.
    Acknowledge,
}

/// A suspension request raised by a component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPrompt {
    /// User-facing prompt text.
    pub message: String,
    pub request: TargetRequest,
}

impl TargetPrompt {
    #[must_use]
    pub fn new(message: impl Into<String>, request: TargetRequest) -> Self {
        Self {
            message: message.into(),
            request,
        }
    }
}
