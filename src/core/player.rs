//! Players and per-player storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier, 0-based.
//!
//! ## Player
//!
//! A player's resources (credits, actions, health) and card piles.
//! Piles are `im::Vector`s so a whole `GameState` snapshots in O(1).
//!
//! ## PlayerMap
//!
//! `Vec`-backed per-player storage indexed by `PlayerId`.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::cards::{EnhancedCard, InstanceId};

/// Player identifier supporting 1-255 players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Which of a player's piles to look at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pile {
    Deck,
    Hand,
    Discard,
    Play,
}

/// A player: resources plus the four card piles.
///
/// The deck is drawn from the front. `in_play` holds the authoritative
/// copies of cards that were played this turn; the execution queue holds
/// its own queue-marked copies of the same instances.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub credits: i64,
    pub actions: i64,
    pub health: i64,
    /// Damage prevented before health is touched.
    pub shield: i64,
    /// Seat driven by an AI rather than a person. Informational to the engine.
    pub is_ai: bool,
    pub deck: Vector<EnhancedCard>,
    pub hand: Vector<EnhancedCard>,
    pub discard: Vector<EnhancedCard>,
    pub in_play: Vector<EnhancedCard>,
}

impl Player {
    /// Create a player with empty piles.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            credits: 0,
            actions: 0,
            health: 0,
            shield: 0,
            is_ai: false,
            deck: Vector::new(),
            hand: Vector::new(),
            discard: Vector::new(),
            in_play: Vector::new(),
        }
    }

    /// Set starting resources (builder pattern).
    #[must_use]
    pub fn with_resources(mut self, credits: i64, actions: i64, health: i64) -> Self {
        self.credits = credits;
        self.actions = actions;
        self.health = health;
        self
    }

    /// Mark the player as computer-controlled (builder pattern).
    #[must_use]
    pub fn ai(mut self) -> Self {
        self.is_ai = true;
        self
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Borrow one pile.
    #[must_use]
    pub fn pile(&self, pile: Pile) -> &Vector<EnhancedCard> {
        match pile {
            Pile::Deck => &self.deck,
            Pile::Hand => &self.hand,
            Pile::Discard => &self.discard,
            Pile::Play => &self.in_play,
        }
    }

    /// Mutably borrow one pile.
    pub fn pile_mut(&mut self, pile: Pile) -> &mut Vector<EnhancedCard> {
        match pile {
            Pile::Deck => &mut self.deck,
            Pile::Hand => &mut self.hand,
            Pile::Discard => &mut self.discard,
            Pile::Play => &mut self.in_play,
        }
    }

    /// Position of an instance within a pile.
    #[must_use]
    pub fn find_in(&self, pile: Pile, instance: InstanceId) -> Option<usize> {
        self.pile(pile).iter().position(|c| c.instance_id == instance)
    }

    /// Remove an instance from a pile, returning it.
    pub fn take_from(&mut self, pile: Pile, instance: InstanceId) -> Option<EnhancedCard> {
        let index = self.find_in(pile, instance)?;
        Some(self.pile_mut(pile).remove(index))
    }

    /// Absorb damage with the shield first; returns the damage dealt to health.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        let absorbed = self.shield.min(amount).max(0);
        self.shield -= absorbed;
        let dealt = amount - absorbed;
        self.health -= dealt;
        dealt
    }
}

/// Per-player data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();

        Self { data }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data.iter().enumerate().map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data.iter_mut().enumerate().map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
