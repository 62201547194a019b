//! Player-state mutations.
//!
//! Every operation that moves a card between piles goes through
//! `move_card_to_zone`, so the marker on an instance always names the pile
//! holding it. These are the only places outside the execution engine that
//! move cards.

use log::debug;

use crate::cards::{EnhancedCard, InstanceId};
use crate::core::{EngineConfig, GameState, Pile, PlayerId, RandomSource};
use crate::zones::{move_card_to_zone, Zone};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single survivor.
    Winner(PlayerId),
    /// Everyone flatlined.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Why a rules operation was refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RulesError {
    UnknownPlayer(PlayerId),
    NoSuchCard { instance: InstanceId },
    MarketSlotEmpty { index: usize },
    InsufficientCredits { needed: i64, available: i64 },
}

impl std::fmt::Display for RulesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesError::UnknownPlayer(player) => write!(f, "{} is not at the table", player),
            RulesError::NoSuchCard { instance } => write!(f, "No card {} where it was expected", instance),
            RulesError::MarketSlotEmpty { index } => write!(f, "Market slot {} is empty", index),
            RulesError::InsufficientCredits { needed, available } => {
                write!(f, "Not enough credits: need {}, have {}", needed, available)
            }
        }
    }
}

impl std::error::Error for RulesError {}

fn zone_of(pile: Pile) -> Zone {
    match pile {
        Pile::Deck => Zone::Deck,
        Pile::Hand => Zone::Hand,
        Pile::Discard => Zone::Discard,
        Pile::Play => Zone::Play,
    }
}

impl GameState {
    /// Move `instance` between two of `player`'s piles, re-marking it.
    pub fn move_between(
        &mut self,
        player: PlayerId,
        instance: InstanceId,
        from: Pile,
        to: Pile,
    ) -> Result<EnhancedCard, RulesError> {
        let owner = self.player_mut(player).ok_or(RulesError::UnknownPlayer(player))?;
        let card = owner.take_from(from, instance).ok_or(RulesError::NoSuchCard { instance })?;
        let moved = move_card_to_zone(&card, zone_of(from), zone_of(to));
        owner.pile_mut(to).push_back(moved.clone());
        Ok(moved)
    }

    /// Draw up to `count` cards, reshuffling the discard pile when the deck
    /// runs out. Returns the number actually drawn.
    pub fn draw_cards(&mut self, player: PlayerId, count: usize, rng: &mut dyn RandomSource) -> usize {
        let mut drawn = 0;
        for _ in 0..count {
            let Some(owner) = self.player(player) else { break };
            if owner.deck.is_empty() {
                if owner.discard.is_empty() {
                    break;
                }
                self.shuffle_discard_into_deck(player, rng);
            }
            let Some(owner) = self.player_mut(player) else { break };
            let Some(card) = owner.deck.pop_front() else { break };
            owner.hand.push_back(move_card_to_zone(&card, Zone::Deck, Zone::Hand));
            drawn += 1;
        }
        drawn
    }

    /// Shuffle the discard pile and put it under the deck.
    pub fn shuffle_discard_into_deck(&mut self, player: PlayerId, rng: &mut dyn RandomSource) {
        let Some(owner) = self.player_mut(player) else { return };
        let discard = std::mem::take(&mut owner.discard);
        let order = rng.shuffle_len(discard.len());
        for index in order {
            owner.deck.push_back(move_card_to_zone(&discard[index], Zone::Discard, Zone::Deck));
        }
        debug!("{} reshuffled {} card(s)", player, discard.len());
    }

    /// Discard one specific card from hand. `false` if it is not there.
    pub fn discard_from_hand(&mut self, player: PlayerId, instance: InstanceId) -> bool {
        self.move_between(player, instance, Pile::Hand, Pile::Discard).is_ok()
    }

    /// Discard `count` cards chosen at random from hand.
    pub fn force_discard(&mut self, player: PlayerId, count: usize, rng: &mut dyn RandomSource) -> Vec<InstanceId> {
        let mut discarded = Vec::new();
        let Some(owner) = self.player_mut(player) else {
            return discarded;
        };
        for _ in 0..count {
            if owner.hand.is_empty() {
                break;
            }
            let index = rng.pick_index(owner.hand.len());
            let card = owner.hand.remove(index);
            discarded.push(card.instance_id);
            owner.discard.push_back(move_card_to_zone(&card, Zone::Hand, Zone::Discard));
        }
        discarded
    }

    /// Put a card from hand into play. The caller enqueues the returned copy.
    pub fn play_from_hand(&mut self, player: PlayerId, instance: InstanceId) -> Result<EnhancedCard, RulesError> {
        self.move_between(player, instance, Pile::Hand, Pile::Play)
    }

    /// Buy the card in market slot `index` into the player's discard pile.
    pub fn buy_from_market(&mut self, player: PlayerId, index: usize) -> Result<InstanceId, RulesError> {
        let price = self
            .market
            .get(index)
            .ok_or(RulesError::MarketSlotEmpty { index })?
            .purchase_price();
        let buyer = self.player_mut(player).ok_or(RulesError::UnknownPlayer(player))?;
        if buyer.credits < price {
            return Err(RulesError::InsufficientCredits {
                needed: price,
                available: buyer.credits,
            });
        }
        buyer.credits -= price;

        let card = self.market.remove(index);
        let bought = move_card_to_zone(&card, Zone::Market, Zone::Discard);
        let instance = bought.instance_id;
        self.players[player].discard.push_back(bought);
        debug!("{} bought {} for {}", player, card.name(), price);
        Ok(instance)
    }

    /// Instantiate a template into the market row.
    pub fn add_to_market(&mut self, template: &EnhancedCard) -> InstanceId {
        let instance = self.alloc_instance();
        let card = template.clone().with_instance(instance);
        let from = card.zone().unwrap_or(Zone::Market);
        self.market.push_back(move_card_to_zone(&card, from, Zone::Market));
        instance
    }

    /// Instantiate a template onto the bottom of a player's deck.
    pub fn add_to_deck(&mut self, player: PlayerId, template: &EnhancedCard) -> Result<InstanceId, RulesError> {
        if self.player(player).is_none() {
            return Err(RulesError::UnknownPlayer(player));
        }
        let instance = self.alloc_instance();
        let card = template.clone().with_instance(instance);
        let from = card.zone().unwrap_or(Zone::Deck);
        self.players[player].deck.push_back(move_card_to_zone(&card, from, Zone::Deck));
        Ok(instance)
    }

    /// Clean up the active player's turn and pass to the next seat.
    ///
    /// Hand and play area go to discard, a fresh hand is drawn and actions
    /// reset. Shields do not carry over.
    pub fn end_turn(&mut self, config: &EngineConfig, rng: &mut dyn RandomSource) {
        let current = self.active_player;
        let owner = self.active_mut();
        for pile in [Pile::Hand, Pile::Play] {
            let from = zone_of(pile);
            let cards = std::mem::take(owner.pile_mut(pile));
            for card in &cards {
                owner.discard.push_back(move_card_to_zone(card, from, Zone::Discard));
            }
        }
        owner.actions = config.actions_per_turn;
        owner.shield = 0;
        self.draw_cards(current, config.hand_size, rng);

        let count = self.player_count();
        self.active_player = PlayerId::new(((current.index() + 1) % count) as u8);
        self.turn_number += 1;
        debug!("turn {} begins for {}", self.turn_number, self.active_player);
    }

    /// The result once at most one player is still standing.
    #[must_use]
    pub fn check_game_over(&self) -> Option<GameResult> {
        if self.player_count() < 2 {
            return self.players.iter().all(|(_, p)| p.is_defeated()).then_some(GameResult::Draw);
        }
        let mut standing = self.players.iter().filter(|(_, p)| !p.is_defeated()).map(|(id, _)| id);
        match (standing.next(), standing.next()) {
            (None, _) => Some(GameResult::Draw),
            (Some(winner), None) => Some(GameResult::Winner(winner)),
            _ => None,
        }
    }
}
