//! Core value types: colours, cards, decks, cubes, players, cities, state,
//! RNG, configuration and errors.
//!
//! Everything here is plain data. Rules live in `commands` and `rules`; the
//! only code that changes a `GameState` is the event fold in `events`.

pub mod cards;
pub mod city;
pub mod colour;
pub mod config;
pub mod cubes;
pub mod deck;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use cards::{EventCard, PlayerCard};
pub use city::City;
pub use colour::Colour;
pub use config::{Difficulty, EngineConfig, GameOptions};
pub use cubes::CubePile;
pub use deck::Deck;
pub use error::{GameError, GameResult};
pub use player::{Player, PlayerHand, Role};
pub use rng::{GameRng, GameRngState};
pub use state::{
    DiseaseStatus, GameState, TurnPhase, ACTIONS_PER_TURN, CUBES_PER_COLOUR, HAND_LIMIT,
    INFECTION_RATES, MAX_OUTBREAKS, PLAYER_CARDS_PER_TURN, RESEARCH_STATIONS,
};
