//! In-progress state transition.
//!
//! A `Transition` owns a cloned state and the events emitted so far. Every
//! emitted event is folded immediately, so later decisions in the same
//! command see the effects of earlier ones.

use tracing::info;

use crate::core::{GameRng, GameState};
use crate::events::fold::apply_in_place;
use crate::events::GameEvent;

pub(crate) struct Transition {
    state: GameState,
    events: Vec<GameEvent>,
}

impl Transition {
    pub(crate) fn new(state: GameState) -> Self {
        Self {
            state,
            events: Vec::new(),
        }
    }

    pub(crate) fn state(&self) -> &GameState {
        &self.state
    }

    /// Record an event and fold it into the working state.
    pub(crate) fn emit(&mut self, event: GameEvent) {
        apply_in_place(&mut self.state, &event);
        self.events.push(event);
    }

    pub(crate) fn rng(&mut self) -> &mut GameRng {
        &mut self.state.rng
    }

    pub(crate) fn lose(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        info!(%reason, "game lost");
        self.emit(GameEvent::GameLost { reason });
    }

    pub(crate) fn finish(self) -> (GameState, Vec<GameEvent>) {
        (self.state, self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_folds_immediately() {
        let mut t = Transition::new(GameState::empty());
        t.emit(GameEvent::InfectionRateIncreased);
        assert_eq!(t.state().infection_rate_marker(), 1);

        t.lose("8 outbreaks");
        let (state, events) = t.finish();
        assert!(state.is_lost());
        assert_eq!(events.len(), 2);
    }
}
