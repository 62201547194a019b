//! Game state: players, market row, and the current location.
//!
//! `GameState` is the containment side of the zone model: it decides which
//! pile a card sits in. The zone marker on each instance is kept in step by
//! the operations in `rules::actions` and by the execution engine.
//!
//! Piles are `im::Vector`s, so cloning a whole `GameState` (AI lookahead,
//! undo snapshots) is cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::player::{Player, PlayerId, PlayerMap};
use crate::cards::{EnhancedCard, InstanceId};

/// Identifier of a location threat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreatId(pub u32);

impl std::fmt::Display for ThreatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Threat({})", self.0)
    }
}

/// A hostile entity at the current location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threat {
    pub id: ThreatId,
    pub name: String,
    pub health: i64,
    /// Damage the threat deals when it acts. Informational to the engine.
    pub danger: i64,
}

impl Threat {
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, health: i64, danger: i64) -> Self {
        Self {
            id: ThreatId(id),
            name: name.into(),
            health,
            danger,
        }
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

/// The place the players are currently running.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub threats: Vec<Threat>,
}

impl Location {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            threats: Vec::new(),
        }
    }

    /// Add a threat (builder pattern).
    #[must_use]
    pub fn with_threat(mut self, threat: Threat) -> Self {
        self.threats.push(threat);
        self
    }
}

/// Complete game state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub players: PlayerMap<Player>,
    /// Whose turn it is.
    pub active_player: PlayerId,
    /// Cards available for purchase.
    pub market: Vector<EnhancedCard>,
    pub location: Option<Location>,
    /// Turn number (starts at 1).
    pub turn_number: u32,
    next_instance: u64,
}

impl GameState {
    /// Create a state with `config.player_count` players at starting values.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        let players = PlayerMap::new(config.player_count, |id| {
            Player::new(id, format!("Runner {}", id.0 + 1)).with_resources(
                config.starting_credits,
                config.actions_per_turn,
                config.starting_health,
            )
        });

        Self {
            players,
            active_player: PlayerId::new(0),
            market: Vector::new(),
            location: None,
            turn_number: 1,
            next_instance: 1,
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    #[must_use]
    pub fn active(&self) -> &Player {
        &self.players[self.active_player]
    }

    pub fn active_mut(&mut self) -> &mut Player {
        let id = self.active_player;
        &mut self.players[id]
    }

    /// Everyone except `player`, in seat order starting after `player`.
    #[must_use]
    pub fn opponents_of(&self, player: PlayerId) -> Vec<PlayerId> {
        let count = self.player_count();
        (1..count)
            .map(|offset| PlayerId::new(((player.index() + offset) % count) as u8))
            .collect()
    }

    /// Threats at the current location (empty when there is none).
    #[must_use]
    pub fn threats(&self) -> &[Threat] {
        self.location.as_ref().map_or(&[], |l| l.threats.as_slice())
    }

    pub fn threat_mut(&mut self, id: ThreatId) -> Option<&mut Threat> {
        self.location.as_mut()?.threats.iter_mut().find(|t| t.id == id)
    }

    /// Allocate a fresh instance id.
    pub fn alloc_instance(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        id
    }

    /// Look an instance up in every player pile, then the market row.
    #[must_use]
    pub fn find_card(&self, instance: InstanceId) -> Option<&EnhancedCard> {
        self.players
            .iter()
            .flat_map(|(_, p)| p.in_play.iter().chain(&p.hand).chain(&p.discard).chain(&p.deck))
            .chain(self.market.iter())
            .find(|c| c.instance_id == instance)
    }

    /// Find which player's play area holds `instance`.
    #[must_use]
    pub fn in_play_owner(&self, instance: InstanceId) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, p)| p.in_play.iter().any(|c| c.instance_id == instance))
            .map(|(id, _)| id)
    }
}
