//! Engine configuration.
//!
//! `EngineConfig` carries the starting resources and turn structure. It is
//! plain serde data so hosts can load it from whatever format they like;
//! the builder methods cover programmatic setup.

use serde::{Deserialize, Serialize};

/// Starting values and turn structure for a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of seats at the table.
    pub player_count: usize,
    /// Credits each player starts with.
    pub starting_credits: i64,
    /// Actions granted at the start of every turn.
    pub actions_per_turn: i64,
    /// Health each player starts with.
    pub starting_health: i64,
    /// Cards drawn at the end of every turn.
    pub hand_size: usize,
    /// Seed for the default random source.
    pub seed: u64,
    /// Narration lines kept by `GameLog`.
    pub log_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            starting_credits: 5,
            actions_per_turn: 3,
            starting_health: 10,
            hand_size: 5,
            seed: 42,
            log_capacity: 200,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_players(mut self, count: usize) -> Self {
        assert!((1..=255).contains(&count), "Player count must be 1-255");
        self.player_count = count;
        self
    }

    #[must_use]
    pub fn with_starting_credits(mut self, credits: i64) -> Self {
        self.starting_credits = credits;
        self
    }

    #[must_use]
    pub fn with_actions_per_turn(mut self, actions: i64) -> Self {
        self.actions_per_turn = actions;
        self
    }

    #[must_use]
    pub fn with_starting_health(mut self, health: i64) -> Self {
        self.starting_health = health;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_players(3)
            .with_starting_credits(8)
            .with_hand_size(4);

        assert_eq!(config.player_count, 3);
        assert_eq!(config.starting_credits, 8);
        assert_eq!(config.hand_size, 4);
        assert_eq!(config.actions_per_turn, 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"seed": 7, "player_count": 4}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.player_count, 4);
        assert_eq!(config.starting_health, EngineConfig::default().starting_health);
    }

    #[test]
    #[should_panic(expected = "Player count must be 1-255")]
    fn test_zero_players_rejected() {
        let _ = EngineConfig::new().with_players(0);
    }
}
