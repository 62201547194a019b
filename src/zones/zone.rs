//! The six logical zones a card instance can be in.

use serde::{Deserialize, Serialize};

/// Where the authoritative copy of a card logically lives.
///
/// Zones are labels, not containers: a `Player` or the market row owns the
/// pile, and the marker on the instance mirrors it.
///
/// Older content spelled these differently (`InHand`, `in_play`,
/// `discard_pile`, ...); the aliases accept all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    #[serde(alias = "InMarket", alias = "market_zone")]
    Market,
    #[serde(alias = "InDeck", alias = "deck_zone")]
    Deck,
    #[serde(alias = "InHand", alias = "hand_zone")]
    Hand,
    #[serde(alias = "InQueue", alias = "queue_zone")]
    Queue,
    #[serde(alias = "InPlay", alias = "in_play", alias = "play_zone")]
    Play,
    #[serde(alias = "InDiscard", alias = "discard_pile", alias = "discard_zone")]
    Discard,
}

impl Zone {
    pub const ALL: [Zone; 6] = [
        Zone::Market,
        Zone::Deck,
        Zone::Hand,
        Zone::Queue,
        Zone::Play,
        Zone::Discard,
    ];
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Market => "market",
            Zone::Deck => "deck",
            Zone::Hand => "hand",
            Zone::Queue => "queue",
            Zone::Play => "play",
            Zone::Discard => "discard",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_aliases() {
        let play: Zone = serde_json::from_str(r#""InPlay""#).unwrap();
        let play2: Zone = serde_json::from_str(r#""in_play""#).unwrap();
        let discard: Zone = serde_json::from_str(r#""discard_pile""#).unwrap();

        assert_eq!(play, Zone::Play);
        assert_eq!(play2, Zone::Play);
        assert_eq!(discard, Zone::Discard);
        assert_eq!(serde_json::to_string(&Zone::Market).unwrap(), r#""market""#);
    }

    #[test]
    fn test_zone_display() {
        assert_eq!(Zone::Queue.to_string(), "queue");
        assert_eq!(Zone::ALL.len(), 6);
    }
}
