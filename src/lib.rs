//! # pandemic-engine
//!
//! An event-sourced rules engine for the cooperative board game Pandemic,
//! built as a test bed for search-based playing agents.
//!
//! ## Design Principles
//!
//! 1. **Events Are the Truth**: Every change to a game is an event. Commands
//!    are validated into events, events are folded into states, and replaying
//!    the event log reproduces any reachable state exactly.
//!
//! 2. **Immutable States**: `GameState` is never mutated after it is handed
//!    out. A command yields a new state that shares everything unchanged with
//!    its parent.
//!
//! 3. **Closed Command and Event Sets**: Adding a rule means adding a
//!    `Command` variant, the `GameEvent`s it emits and their fold cases.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so agents can
//!   explore thousands of divergent futures from one ancestor without locks.
//!
//! - **Recorded Randomness**: The RNG is only used for setup and epidemic
//!   shuffles, and each shuffle's outcome is stored in its event. Replay
//!   never draws a random number.
//!
//! - **Bounded Process Manager**: After each command an iterative state
//!   machine resolves draws, epidemics, infections and outbreak cascades
//!   until a player must act again.
//!
//! ## Modules
//!
//! - `core`: Colours, cards, decks, cubes, players, state, RNG, configuration, errors
//! - `board`: The static city graph and its distance table
//! - `events`: Events, the fold, and the event log
//! - `commands`: Commands, validation and legal command generation
//! - `rules`: Setup, process manager, infection, and the `Pandemic` engine
//!
//! ## Example
//!
//! ```
//! use pandemic_engine::{Command, GameOptions, Pandemic, Role};
//!
//! let engine = Pandemic::new();
//! let (state, _events) = engine.create_new_game(&GameOptions::default()).unwrap();
//!
//! let (next, events) = engine
//!     .do_command(&state, Command::Pass { role: Role::Medic })
//!     .unwrap();
//! assert_eq!(next.current_player().actions_remaining, 3);
//! assert_eq!(events.len(), 1);
//! ```

pub mod board;
pub mod commands;
pub mod core;
pub mod events;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Colour, Deck, DiseaseStatus, Difficulty, EngineConfig, EventCard, GameError, GameOptions,
    GameResult, GameRng, GameState, Player, PlayerCard, Role, TurnPhase,
};

pub use crate::board::{board, Board, CityId};

pub use crate::events::{apply_event, EventLog, GameEvent};

pub use crate::commands::{legal_commands, sort_by_priority, Command, CommandKind};

pub use crate::rules::{GameOutcome, Pandemic, RulesEngine};
