//! Player and infection cards.
//!
//! Cards have no identity beyond their value: two city cards for the same
//! city are interchangeable. Infection cards are just `CityId`s.

use serde::{Deserialize, Serialize};

use super::Colour;
use crate::board::{board, CityId};

/// Special event cards. Each can be played by whoever holds it, at any point
/// where control is with the caller, without spending an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventCard {
    /// Build a research station in any city.
    GovernmentGrant,
    /// Move any pawn to any city.
    Airlift,
    /// Skip the next infect-cities step.
    OneQuietNight,
    /// Remove a card in the infection discard pile from the game.
    ResilientPopulation,
    /// Rearrange the top six infection cards.
    Forecast,
}

impl EventCard {
    /// All event cards, in the order they are added to the player deck.
    pub const ALL: [EventCard; 5] = [
        EventCard::GovernmentGrant,
        EventCard::Airlift,
        EventCard::OneQuietNight,
        EventCard::ResilientPopulation,
        EventCard::Forecast,
    ];
}

/// A card in the player deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerCard {
    /// City card; its colour is the city's colour.
    City(CityId),
    /// Epidemic; resolved as soon as it is drawn.
    Epidemic,
    /// Special event.
    Event(EventCard),
}

impl PlayerCard {
    /// City this card names, if it is a city card.
    #[must_use]
    pub fn city(self) -> Option<CityId> {
        match self {
            PlayerCard::City(city) => Some(city),
            _ => None,
        }
    }

    /// Colour of a city card.
    #[must_use]
    pub fn colour(self) -> Option<Colour> {
        self.city().map(|city| board().colour(city))
    }

    /// Check if this is an epidemic card.
    #[must_use]
    pub fn is_epidemic(self) -> bool {
        matches!(self, PlayerCard::Epidemic)
    }

    /// Event card carried by this card, if any.
    #[must_use]
    pub fn event(self) -> Option<EventCard> {
        match self {
            PlayerCard::Event(event) => Some(event),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayerCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerCard::City(city) => write!(f, "{city}"),
            PlayerCard::Epidemic => f.write_str("Epidemic"),
            PlayerCard::Event(event) => write!(f, "{event:?}"),
        }
    }
}
