//! Roles, hands and players.
//!
//! ## Role
//!
//! Each player has exactly one role and roles are unique per game.
//!
//! ## PlayerHand
//!
//! Persistent list of player cards. Order carries no rule meaning, but it is
//! kept stable so that agents that pick "the first matching card" behave
//! deterministically.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::cards::PlayerCard;
use super::Colour;
use crate::board::CityId;

/// Player roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Medic,
    Scientist,
    Researcher,
    OperationsExpert,
    Dispatcher,
    QuarantineSpecialist,
}

impl Role {
    /// All supported roles.
    pub const ALL: [Role; 6] = [
        Role::Medic,
        Role::Scientist,
        Role::Researcher,
        Role::OperationsExpert,
        Role::Dispatcher,
        Role::QuarantineSpecialist,
    ];

    /// City cards needed to discover a cure.
    #[must_use]
    pub const fn cards_for_cure(self) -> usize {
        match self {
            Role::Scientist => 4,
            _ => 5,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Medic => "Medic",
            Role::Scientist => "Scientist",
            Role::Researcher => "Researcher",
            Role::OperationsExpert => "Operations Expert",
            Role::Dispatcher => "Dispatcher",
            Role::QuarantineSpecialist => "Quarantine Specialist",
        };
        f.write_str(name)
    }
}

/// Cards held by one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHand {
    cards: Vector<PlayerCard>,
}

impl PlayerHand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check if an equal card is held.
    #[must_use]
    pub fn contains(&self, card: PlayerCard) -> bool {
        self.cards.iter().any(|&c| c == card)
    }

    /// Check if the card for `city` is held.
    #[must_use]
    pub fn has_city_card(&self, city: CityId) -> bool {
        self.contains(PlayerCard::City(city))
    }

    /// Iterate over held cards.
    pub fn iter(&self) -> impl Iterator<Item = PlayerCard> + '_ {
        self.cards.iter().copied()
    }

    /// Cities of all held city cards.
    pub fn city_cards(&self) -> impl Iterator<Item = CityId> + '_ {
        self.iter().filter_map(PlayerCard::city)
    }

    /// Cities of held city cards of one colour.
    pub fn city_cards_of(&self, colour: Colour) -> impl Iterator<Item = CityId> + '_ {
        self.iter()
            .filter(move |card| card.colour() == Some(colour))
            .filter_map(PlayerCard::city)
    }

    /// Add a card.
    pub fn add(&mut self, card: PlayerCard) {
        self.cards.push_back(card);
    }

    /// Remove one equal card. Returns whether one was found.
    pub fn remove(&mut self, card: PlayerCard) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(index) => {
                self.cards.remove(index);
                true
            }
            None => false,
        }
    }
}

/// A player: role, pawn location, hand and remaining actions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub role: Role,
    pub location: CityId,
    pub hand: PlayerHand,
    pub actions_remaining: u8,
}

impl Player {
    /// A new player at `location` with an empty hand.
    #[must_use]
    pub fn new(role: Role, location: CityId, actions_remaining: u8) -> Self {
        Self {
            role,
            location,
            hand: PlayerHand::new(),
            actions_remaining,
        }
    }
}
