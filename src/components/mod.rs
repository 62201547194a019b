//! Card components - the units of card behavior.
//!
//! A card's behavior is an ordered list of [`Component`]s. The execution
//! engine applies them left to right against an
//! [`ExecutionContext`](crate::execution::ExecutionContext):
//! - **Costs** (`CreditCost`, `ActionCost`, `HealthCost`, `TrashCost`,
//!   `KeywordRequirement`) pay or refuse
//! - **Targeting** (`SingleEntityTarget`, `MultiEntityTarget`, `SelfTarget`)
//!   fill `ctx.targets` automatically or suspend for a player choice
//! - **Effects** act on the resolved targets or on ambient state
//! - **Zone markers** label where the instance lives; applying one is a no-op
//!
//! ## Design Philosophy
//!
//! The set of components is closed, so dispatch is a single `match` in
//! [`Component::apply`]. Components never mutate their own parameters:
//! synergy bonuses are recorded on the context and read back as an
//! effective amount by the component they boost.

mod cost;
mod effect;
mod outcome;
mod targeting;

pub use outcome::{ComponentOutcome, FailureReason, TargetPrompt, TargetRequest};
pub use targeting::candidates;

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardType};
use crate::core::{GameState, Pile};
use crate::execution::{ExecEnv, ExecutionContext};
use crate::zones::Zone;

/// Which single entity a `SingleEntityTarget` resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleTarget {
    Player,
    Opponent,
    Threat,
    Card,
}

/// Candidate pool of a `MultiEntityTarget`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPool {
    /// Acting player first, then opponents.
    Players,
    Opponents,
    Threats,
    Cards,
}

/// Narrows auto-selected candidates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetFilter {
    /// Cards carrying the keyword.
    Keyword(String),
    /// Cards of the type.
    CardType(CardType),
    /// Players or threats with at least this much health.
    MinHealth(i64),
    /// Players or threats with at most this much health.
    MaxHealth(i64),
    /// Anything but the executing card.
    NotSource,
}

/// Which card may pay a `TrashCost`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrashTarget {
    /// The executing card itself.
    #[serde(alias = "self")]
    This,
    OfType(CardType),
    Any,
}

/// Pile searched by a `KeywordRequirement`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordPool {
    #[default]
    Play,
    Hand,
    Discard,
}

impl KeywordPool {
    #[must_use]
    pub fn pile(self) -> Pile {
        match self {
            KeywordPool::Play => Pile::Play,
            KeywordPool::Hand => Pile::Hand,
            KeywordPool::Discard => Pile::Discard,
        }
    }
}

impl std::fmt::Display for KeywordPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            KeywordPool::Play => "play",
            KeywordPool::Hand => "hand",
            KeywordPool::Discard => "discard",
        })
    }
}

/// Damage flavour. Purely descriptive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageLabel {
    #[default]
    Plain,
    Meat,
    Net,
    Brain,
}

impl std::fmt::Display for DamageLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DamageLabel::Plain => "plain",
            DamageLabel::Meat => "meat",
            DamageLabel::Net => "net",
            DamageLabel::Brain => "brain",
        })
    }
}

/// A player resource that rewards and risks move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Credits,
    Actions,
    Health,
    /// Drawing (reward) or random discards (risk).
    Cards,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Resource::Credits => "credits",
            Resource::Actions => "actions",
            Resource::Health => "health",
            Resource::Cards => "cards",
        })
    }
}

fn one() -> i64 {
    1
}

fn one_usize() -> usize {
    1
}

/// A unit of card behavior.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    // === Costs ===
    CreditCost {
        amount: i64,
    },
    ActionCost {
        #[serde(default = "one")]
        amount: i64,
    },
    HealthCost {
        amount: i64,
        #[serde(default)]
        label: DamageLabel,
    },
    TrashCost {
        target: TrashTarget,
        #[serde(default)]
        specific_card: Option<CardId>,
        #[serde(default)]
        specific_keyword: Option<String>,
    },
    KeywordRequirement {
        keyword: String,
        #[serde(default = "one_usize")]
        count: usize,
        #[serde(default)]
        location: KeywordPool,
    },

    // === Targeting ===
    SingleEntityTarget {
        target: SingleTarget,
        #[serde(default)]
        allow_selection: bool,
        #[serde(default)]
        filter: Option<TargetFilter>,
    },
    MultiEntityTarget {
        pool: TargetPool,
        max_targets: usize,
        #[serde(default)]
        allow_selection: bool,
        #[serde(default)]
        filter: Option<TargetFilter>,
    },
    SelfTarget,

    // === Effects ===
    GainCredits {
        amount: i64,
    },
    DealDamage {
        amount: i64,
        #[serde(default)]
        label: DamageLabel,
    },
    PreventDamage {
        amount: i64,
    },
    DrawCards {
        amount: i64,
    },
    DiscardCards {
        amount: i64,
        #[serde(default)]
        random: bool,
    },
    GainAction {
        amount: i64,
    },
    RecycleGain {
        resource: Resource,
        per_card: i64,
    },
    KeywordSynergy {
        keyword: String,
        boosts: ComponentKind,
        bonus: i64,
    },
    RiskReward {
        risk: Resource,
        reward: Resource,
        chance_percent: u32,
        risk_amount: i64,
        reward_amount: i64,
    },
    ComboEffect {
        card_type: CardType,
        boosts: ComponentKind,
        bonus: i64,
    },
    PauseQueue {
        #[serde(default)]
        message: String,
    },
    CancelCard,
    RevealCard {
        count: usize,
    },
    ScanEntity,

    // === Zone ===
    #[serde(alias = "zone", alias = "zone_component", alias = "location_marker")]
    ZoneMarker {
        zone: Zone,
        #[serde(default)]
        position: Option<usize>,
    },
}

/// Discriminant of [`Component`], used for stripping and for synergy boosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    CreditCost,
    ActionCost,
    HealthCost,
    TrashCost,
    KeywordRequirement,
    SingleEntityTarget,
    MultiEntityTarget,
    SelfTarget,
    GainCredits,
    DealDamage,
    PreventDamage,
    DrawCards,
    DiscardCards,
    GainAction,
    RecycleGain,
    KeywordSynergy,
    RiskReward,
    ComboEffect,
    PauseQueue,
    CancelCard,
    RevealCard,
    ScanEntity,
    ZoneMarker,
}

impl Component {
    // === Constructors ===

    #[must_use]
    pub fn credit_cost(amount: i64) -> Self {
        Self::CreditCost { amount }
    }

    #[must_use]
    pub fn action_cost(amount: i64) -> Self {
        Self::ActionCost { amount }
    }

    #[must_use]
    pub fn health_cost(amount: i64, label: DamageLabel) -> Self {
        Self::HealthCost { amount, label }
    }

    #[must_use]
    pub fn trash(target: TrashTarget) -> Self {
        Self::TrashCost {
            target,
            specific_card: None,
            specific_keyword: None,
        }
    }

    #[must_use]
    pub fn requires_keyword(keyword: impl Into<String>, count: usize, location: KeywordPool) -> Self {
        Self::KeywordRequirement {
            keyword: keyword.into(),
            count,
            location,
        }
    }

    /// Player picks one entity.
    #[must_use]
    pub fn select_one(target: SingleTarget) -> Self {
        Self::SingleEntityTarget {
            target,
            allow_selection: true,
            filter: None,
        }
    }

    /// Engine picks one entity.
    #[must_use]
    pub fn auto_one(target: SingleTarget) -> Self {
        Self::SingleEntityTarget {
            target,
            allow_selection: false,
            filter: None,
        }
    }

    /// Player picks up to `max_targets` entities.
    #[must_use]
    pub fn select_many(pool: TargetPool, max_targets: usize) -> Self {
        Self::MultiEntityTarget {
            pool,
            max_targets,
            allow_selection: true,
            filter: None,
        }
    }

    /// Engine picks the first `max_targets` entities of the pool.
    #[must_use]
    pub fn auto_many(pool: TargetPool, max_targets: usize) -> Self {
        Self::MultiEntityTarget {
            pool,
            max_targets,
            allow_selection: false,
            filter: None,
        }
    }

    #[must_use]
    pub fn self_target() -> Self {
        Self::SelfTarget
    }

    #[must_use]
    pub fn gain_credits(amount: i64) -> Self {
        Self::GainCredits { amount }
    }

    #[must_use]
    pub fn gain_action(amount: i64) -> Self {
        Self::GainAction { amount }
    }

    #[must_use]
    pub fn deal_damage(amount: i64, label: DamageLabel) -> Self {
        Self::DealDamage { amount, label }
    }

    #[must_use]
    pub fn prevent_damage(amount: i64) -> Self {
        Self::PreventDamage { amount }
    }

    #[must_use]
    pub fn draw(amount: i64) -> Self {
        Self::DrawCards { amount }
    }

    #[must_use]
    pub fn discard(amount: i64, random: bool) -> Self {
        Self::DiscardCards { amount, random }
    }

    #[must_use]
    pub fn risk_reward(risk: (Resource, i64), reward: (Resource, i64), chance_percent: u32) -> Self {
        Self::RiskReward {
            risk: risk.0,
            reward: reward.0,
            chance_percent,
            risk_amount: risk.1,
            reward_amount: reward.1,
        }
    }

    #[must_use]
    pub fn marker(zone: Zone) -> Self {
        Self::ZoneMarker { zone, position: None }
    }

    // === Inspection ===

    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::CreditCost { .. } => ComponentKind::CreditCost,
            Component::ActionCost { .. } => ComponentKind::ActionCost,
            Component::HealthCost { .. } => ComponentKind::HealthCost,
            Component::TrashCost { .. } => ComponentKind::TrashCost,
            Component::KeywordRequirement { .. } => ComponentKind::KeywordRequirement,
            Component::SingleEntityTarget { .. } => ComponentKind::SingleEntityTarget,
            Component::MultiEntityTarget { .. } => ComponentKind::MultiEntityTarget,
            Component::SelfTarget => ComponentKind::SelfTarget,
            Component::GainCredits { .. } => ComponentKind::GainCredits,
            Component::DealDamage { .. } => ComponentKind::DealDamage,
            Component::PreventDamage { .. } => ComponentKind::PreventDamage,
            Component::DrawCards { .. } => ComponentKind::DrawCards,
            Component::DiscardCards { .. } => ComponentKind::DiscardCards,
            Component::GainAction { .. } => ComponentKind::GainAction,
            Component::RecycleGain { .. } => ComponentKind::RecycleGain,
            Component::KeywordSynergy { .. } => ComponentKind::KeywordSynergy,
            Component::RiskReward { .. } => ComponentKind::RiskReward,
            Component::ComboEffect { .. } => ComponentKind::ComboEffect,
            Component::PauseQueue { .. } => ComponentKind::PauseQueue,
            Component::CancelCard => ComponentKind::CancelCard,
            Component::RevealCard { .. } => ComponentKind::RevealCard,
            Component::ScanEntity => ComponentKind::ScanEntity,
            Component::ZoneMarker { .. } => ComponentKind::ZoneMarker,
        }
    }

    /// The zone this component marks, if it is a zone marker.
    #[must_use]
    pub fn zone(&self) -> Option<Zone> {
        match self {
            Component::ZoneMarker { zone, .. } => Some(*zone),
            _ => None,
        }
    }

    /// Whether a cost or requirement could be paid right now.
    ///
    /// Pure: nothing is deducted. Components that are not costs, and
    /// trash costs (which may need a selection), always report `true`.
    #[must_use]
    pub fn can_apply(&self, ctx: &ExecutionContext, game: &GameState) -> bool {
        let Some(player) = game.player(ctx.player) else {
            return false;
        };
        match self {
            Component::CreditCost { amount } => player.credits >= *amount,
            Component::ActionCost { amount } => player.actions >= *amount,
            Component::HealthCost { amount, .. } => cost::can_pay_health(player, *amount),
            Component::KeywordRequirement { keyword, count, location } => {
                cost::count_keyword(player, keyword, *location) >= *count
            }
            _ => true,
        }
    }

    /// Apply this component.
    pub fn apply(&self, ctx: &mut ExecutionContext, env: &mut ExecEnv<'_>) -> ComponentOutcome {
        match self {
            Component::CreditCost { amount } => cost::pay_credits(*amount, ctx, env),
            Component::ActionCost { amount } => cost::pay_actions(*amount, ctx, env),
            Component::HealthCost { amount, label } => cost::pay_health(*amount, *label, ctx, env),
            Component::TrashCost {
                target,
                specific_card,
                specific_keyword,
            } => cost::pay_trash(target, *specific_card, specific_keyword.as_deref(), ctx, env),
            Component::KeywordRequirement { keyword, count, location } => {
                cost::require_keyword(keyword, *count, *location, ctx, env)
            }

            Component::SingleEntityTarget {
                target,
                allow_selection,
                filter,
            } => targeting::single(*target, *allow_selection, filter.as_ref(), ctx, env),
            Component::MultiEntityTarget {
                pool,
                max_targets,
                allow_selection,
                filter,
            } => targeting::multi(*pool, *max_targets, *allow_selection, filter.as_ref(), ctx, env),
            Component::SelfTarget => targeting::self_target(ctx),

            Component::GainCredits { amount } => effect::gain_credits(*amount, ctx, env),
            Component::DealDamage { amount, label } => effect::deal_damage(*amount, *label, ctx, env),
            Component::PreventDamage { amount } => effect::prevent_damage(*amount, ctx, env),
            Component::DrawCards { amount } => effect::draw_cards(*amount, ctx, env),
            Component::DiscardCards { amount, random } => effect::discard_cards(*amount, *random, ctx, env),
            Component::GainAction { amount } => effect::gain_action(*amount, ctx, env),
            Component::RecycleGain { resource, per_card } => effect::recycle_gain(*resource, *per_card, ctx, env),
            Component::KeywordSynergy { keyword, boosts, bonus } => {
                effect::keyword_synergy(keyword, *boosts, *bonus, ctx, env)
            }
            Component::RiskReward {
                risk,
                reward,
                chance_percent,
                risk_amount,
                reward_amount,
            } => effect::risk_reward(
                (*risk, *risk_amount),
                (*reward, *reward_amount),
                *chance_percent,
                ctx,
                env,
            ),
            Component::ComboEffect { card_type, boosts, bonus } => {
                effect::combo(*card_type, *boosts, *bonus, ctx, env)
            }
            Component::PauseQueue { message } => effect::pause_queue(message, ctx, env),
            Component::CancelCard => effect::cancel_card(ctx, env),
            Component::RevealCard { count } => effect::reveal_cards(*count, ctx, env),
            Component::ScanEntity => effect::scan(ctx, env),

            Component::ZoneMarker { .. } => ComponentOutcome::Continue,
        }
    }
}
