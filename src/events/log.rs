//! Append-only event log.
//!
//! The log is the only persistable representation of a game. It can be
//! replayed into a `GameState` at any time, and encoded with `bincode` for
//! callers that want to store it.

use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use crate::core::{GameError, GameResult, GameState};

/// Every event since setup, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append one event.
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Iterate in order.
    pub fn iter(&self) -> std::slice::Iter<'_, GameEvent> {
        self.events.iter()
    }

    /// Events as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[GameEvent] {
        &self.events
    }

    /// Fold the whole log from the zero state.
    #[must_use]
    pub fn replay(&self) -> GameState {
        GameState::from_events(&self.events)
    }

    /// Encode with `bincode`.
    pub fn to_bytes(&self) -> GameResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| GameError::invalid(format!("event log encoding: {e}")))
    }

    /// Decode a log produced by [`EventLog::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> GameResult<Self> {
        bincode::deserialize(bytes).map_err(|e| GameError::invalid(format!("event log decoding: {e}")))
    }
}

impl Extend<GameEvent> for EventLog {
    fn extend<I: IntoIterator<Item = GameEvent>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

impl From<Vec<GameEvent>> for EventLog {
    fn from(events: Vec<GameEvent>) -> Self {
        Self { events }
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a GameEvent;
    type IntoIter = std::slice::Iter<'a, GameEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
