//! Events, the fold that applies them, and the event log.
//!
//! ```
//! use pandemic_engine::core::{GameOptions, GameState};
//! use pandemic_engine::rules::Pandemic;
//!
//! let engine = Pandemic::default();
//! let (state, events) = engine.create_new_game(&GameOptions::default()).unwrap();
//! let replayed = GameState::from_events(&events);
//! assert!(replayed.is_same_state_as(&state));
//! ```

pub mod event;
pub mod fold;
pub mod log;

pub use event::GameEvent;
pub use fold::apply_event;
pub use log::EventLog;
