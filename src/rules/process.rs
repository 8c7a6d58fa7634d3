//! Turn-phase process manager.
//!
//! After a command is applied, `advance` walks the turn-phase state machine
//! `DoActions -> DrawCards -> InfectCities -> DoActions (next player)` until
//! control must return to the caller:
//!
//! - the current player still has actions,
//! - some player holds more cards than the hand limit,
//! - or the game is over.
//!
//! The loop is iterative and bounded. One full turn takes four steps, so the
//! bound is never reached in a consistent game.

use tracing::debug;

use super::infection::infect_city;
use super::transition::Transition;
use crate::board::{board, CityId};
use crate::core::{Role, TurnPhase, PLAYER_CARDS_PER_TURN};
use crate::events::GameEvent;

/// Upper bound on phase steps taken for a single command.
const MAX_PHASE_STEPS: usize = 16;

/// Cubes placed on the bottom infection card of an epidemic.
const EPIDEMIC_CUBES: u8 = 3;

/// Outcome of one step of the phase machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PhaseStatus {
    /// Control returns to the caller.
    AwaitingCommand,
    /// Another step follows.
    Continue,
    /// Won or lost.
    GameOver,
}

/// Advance phases until a command is needed or the game ends.
pub(crate) fn advance(t: &mut Transition) {
    for _ in 0..MAX_PHASE_STEPS {
        match step(t) {
            PhaseStatus::Continue => {}
            PhaseStatus::AwaitingCommand | PhaseStatus::GameOver => return,
        }
    }
    debug!(steps = MAX_PHASE_STEPS, "phase loop stopped at its step bound");
}

fn step(t: &mut Transition) -> PhaseStatus {
    let state = t.state();
    if state.is_over() {
        return PhaseStatus::GameOver;
    }
    if state.any_hand_over_limit() {
        debug!("halting for hand-limit discards");
        return PhaseStatus::AwaitingCommand;
    }

    let role = state.current_player().role;
    match state.phase() {
        TurnPhase::DoActions => {
            if state.current_player().actions_remaining > 0 {
                return PhaseStatus::AwaitingCommand;
            }
            t.emit(GameEvent::TurnPhaseChanged {
                phase: TurnPhase::DrawCards,
            });
            PhaseStatus::Continue
        }
        TurnPhase::DrawCards => draw_cards(t, role),
        TurnPhase::InfectCities => infect_cities(t, role),
    }
}

fn draw_cards(t: &mut Transition, role: Role) -> PhaseStatus {
    for _ in 0..PLAYER_CARDS_PER_TURN {
        let Some(card) = t.state().player_draw_pile().top().copied() else {
            t.lose("Ran out of player cards");
            return PhaseStatus::GameOver;
        };
        if card.is_epidemic() {
            epidemic(t, role);
            if t.state().is_over() {
                return PhaseStatus::GameOver;
            }
        } else {
            t.emit(GameEvent::PlayerCardPickedUp { role, card });
        }
    }
    t.emit(GameEvent::TurnPhaseChanged {
        phase: TurnPhase::InfectCities,
    });
    PhaseStatus::Continue
}

/// Increase, infect, intensify.
fn epidemic(t: &mut Transition, role: Role) {
    debug!(%role, "epidemic");
    t.emit(GameEvent::EpidemicCardDiscarded { role });
    t.emit(GameEvent::InfectionRateIncreased);

    if let Some(city) = t.state().infection_draw_pile().bottom().copied() {
        t.emit(GameEvent::InfectionCardDrawnFromBottom { city });
        infect_city(t, city, board().colour(city), EPIDEMIC_CUBES);
        if t.state().is_over() {
            return;
        }
    }

    let mut cards: Vec<CityId> = t.state().infection_discard_pile().iter().copied().collect();
    t.rng().shuffle(&mut cards);
    t.emit(GameEvent::EpidemicIntensified { cards });
}

fn infect_cities(t: &mut Transition, role: Role) -> PhaseStatus {
    if t.state().one_quiet_night_active() {
        debug!("infect cities skipped");
        t.emit(GameEvent::InfectCitiesSkipped);
    } else {
        for _ in 0..t.state().infection_rate() {
            let Some(city) = t.state().infection_draw_pile().top().copied() else {
                break;
            };
            t.emit(GameEvent::InfectionCardDrawn { city });
            infect_city(t, city, board().colour(city), 1);
            if t.state().is_over() {
                return PhaseStatus::GameOver;
            }
        }
    }
    t.emit(GameEvent::TurnEnded { role });
    PhaseStatus::Continue
}
