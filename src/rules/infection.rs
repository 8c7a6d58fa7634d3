//! Cube placement, infection prevention and outbreak cascades.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::debug;

use super::transition::Transition;
use crate::board::{board, CityId};
use crate::core::{Colour, Role, MAX_OUTBREAKS};
use crate::events::GameEvent;

/// Cubes a city holds before the next one causes an outbreak.
pub(crate) const OUTBREAK_THRESHOLD: u8 = 3;

/// Infect `city` with up to `count` cubes of `colour`.
///
/// Eradicated colours are ignored. Prevention by the Medic or the Quarantine
/// Specialist is recorded as an event. A city at the threshold outbreaks
/// instead of receiving the next cube, and any remaining cubes are dropped.
pub(crate) fn infect_city(t: &mut Transition, city: CityId, colour: Colour, count: u8) {
    if t.state().is_eradicated(colour) || prevent_infection(t, city, colour) {
        return;
    }
    for _ in 0..count {
        if t.state().is_lost() {
            return;
        }
        if t.state().city(city).cubes(colour) >= OUTBREAK_THRESHOLD {
            outbreak(t, city, colour);
            return;
        }
        place_cube(t, city, colour);
    }
}

/// Breadth-first outbreak cascade starting at `origin`.
///
/// Each city outbreaks at most once per cascade. Cities that already
/// outbroke in this cascade receive no further cubes from it.
pub(crate) fn outbreak(t: &mut Transition, origin: CityId, colour: Colour) {
    let mut visited = FxHashSet::default();
    visited.insert(origin);
    let mut queue = VecDeque::from([origin]);

    while let Some(city) = queue.pop_front() {
        debug!(%city, %colour, "outbreak");
        t.emit(GameEvent::OutbreakOccurred { city, colour });
        if t.state().outbreak_counter() >= MAX_OUTBREAKS {
            t.lose(format!("{MAX_OUTBREAKS} outbreaks"));
            return;
        }

        for &neighbour in board().neighbours(city) {
            if visited.contains(&neighbour) || prevent_infection(t, neighbour, colour) {
                continue;
            }
            if t.state().city(neighbour).cubes(colour) >= OUTBREAK_THRESHOLD {
                visited.insert(neighbour);
                queue.push_back(neighbour);
            } else {
                place_cube(t, neighbour, colour);
                if t.state().is_lost() {
                    return;
                }
            }
        }
    }
}

/// Take one cube from the supply and put it on `city`. An empty supply loses.
fn place_cube(t: &mut Transition, city: CityId, colour: Colour) {
    if t.state().cube_supply().get(colour) == 0 {
        t.lose(format!("Ran out of {colour} cubes"));
        return;
    }
    t.emit(GameEvent::CubeAddedToCity { city, colour });
}

/// Emit a prevention event and return `true` when a role protects `city`.
fn prevent_infection(t: &mut Transition, city: CityId, colour: Colour) -> bool {
    let state = t.state();
    let medic_here = state.location_of(Role::Medic) == Some(city) && state.is_cured(colour);
    let quarantined = state
        .location_of(Role::QuarantineSpecialist)
        .map_or(false, |qs| qs == city || board().is_adjacent(qs, city));

    if medic_here {
        t.emit(GameEvent::MedicPreventedInfection { city, colour });
    } else if quarantined {
        t.emit(GameEvent::QuarantineSpecialistPreventedInfection { city, colour });
    }
    medic_here || quarantined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiseaseStatus, GameState, Player, CUBES_PER_COLOUR};

    fn city(name: &str) -> CityId {
        board().city_id(name).unwrap()
    }

    /// Put cubes on a city, taking them from the supply.
    fn seed_cubes(state: &mut GameState, id: CityId, colour: Colour, count: u8) {
        state.cubes.remove(colour, count);
        state.city_mut(id).cubes.add(colour, count);
    }

    fn with_pawn(state: &mut GameState, role: Role, at: CityId) {
        state.players.push_back(Player::new(role, at, 4));
    }

    fn count_outbreaks(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::OutbreakOccurred { .. }))
            .count()
    }

    // === Plain infection ===

    #[test]
    fn test_infect_adds_cubes() {
        let mut t = Transition::new(GameState::empty());
        infect_city(&mut t, city("Tokyo"), Colour::Red, 3);

        let (state, events) = t.finish();
        assert_eq!(state.city(city("Tokyo")).cubes(Colour::Red), 3);
        assert_eq!(state.cube_supply().get(Colour::Red), CUBES_PER_COLOUR - 3);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_eradicated_colour_never_infects() {
        let mut state = GameState::empty();
        state.diseases[Colour::Red.index()] = DiseaseStatus::Eradicated;
        let mut t = Transition::new(state);
        infect_city(&mut t, city("Tokyo"), Colour::Red, 1);

        let (state, events) = t.finish();
        assert!(events.is_empty());
        assert_eq!(state.city(city("Tokyo")).cubes(Colour::Red), 0);
    }

    // === Outbreaks ===

    #[test]
    fn test_fourth_cube_outbreaks() {
        let atlanta = city("Atlanta");
        let mut state = GameState::empty();
        seed_cubes(&mut state, atlanta, Colour::Blue, 3);
        let mut t = Transition::new(state);
        infect_city(&mut t, atlanta, Colour::Blue, 1);

        let (state, events) = t.finish();
        assert_eq!(state.outbreak_counter(), 1);
        assert_eq!(count_outbreaks(&events), 1);
        assert_eq!(state.city(atlanta).cubes(Colour::Blue), 3);
        for name in ["Chicago", "Washington", "Miami"] {
            assert_eq!(state.city(city(name)).cubes(Colour::Blue), 1, "{name}");
        }
    }

    #[test]
    fn test_chain_reaction_visits_each_city_once() {
        // Atlanta, Washington and Miami form a triangle.
        let mut state = GameState::empty();
        for name in ["Atlanta", "Washington", "Miami"] {
            seed_cubes(&mut state, city(name), Colour::Blue, 3);
        }
        let mut t = Transition::new(state);
        infect_city(&mut t, city("Atlanta"), Colour::Blue, 1);

        let (state, events) = t.finish();
        assert_eq!(state.outbreak_counter(), 3);
        assert_eq!(count_outbreaks(&events), 3);
        assert_eq!(state.city(city("Chicago")).cubes(Colour::Blue), 1);
        assert_eq!(state.city(city("New York")).cubes(Colour::Blue), 1);
        assert_eq!(state.city(city("Bogota")).cubes(Colour::Blue), 1);
        // Montreal neighbours Washington only; Mexico City neighbours Miami only.
        assert_eq!(state.city(city("Montreal")).cubes(Colour::Blue), 1);
        assert_eq!(state.city(city("Mexico City")).cubes(Colour::Blue), 1);
    }

    #[test]
    fn test_eighth_outbreak_loses() {
        let atlanta = city("Atlanta");
        let mut state = GameState::empty();
        state.outbreak_counter = MAX_OUTBREAKS - 1;
        seed_cubes(&mut state, atlanta, Colour::Blue, 3);
        let mut t = Transition::new(state);
        infect_city(&mut t, atlanta, Colour::Blue, 1);

        let (state, events) = t.finish();
        assert!(state.is_lost());
        assert_eq!(state.loss_reason(), Some("8 outbreaks"));
        assert!(matches!(events.last(), Some(GameEvent::GameLost { .. })));
        assert_eq!(state.city(city("Chicago")).cubes(Colour::Blue), 0);
    }

    #[test]
    fn test_empty_supply_loses() {
        let mut state = GameState::empty();
        state.cubes.remove(Colour::Red, CUBES_PER_COLOUR);
        let mut t = Transition::new(state);
        infect_city(&mut t, city("Tokyo"), Colour::Red, 1);

        let (state, _) = t.finish();
        assert!(state.is_lost());
        assert_eq!(state.loss_reason(), Some("Ran out of red cubes"));
        assert_eq!(state.city(city("Tokyo")).cubes(Colour::Red), 0);
    }

    // === Prevention ===

    #[test]
    fn test_medic_prevents_cured_colour() {
        let atlanta = city("Atlanta");
        let mut state = GameState::empty();
        with_pawn(&mut state, Role::Medic, atlanta);
        state.diseases[Colour::Blue.index()] = DiseaseStatus::Cured;
        let mut t = Transition::new(state);
        infect_city(&mut t, atlanta, Colour::Blue, 1);

        let (state, events) = t.finish();
        assert_eq!(
            events,
            vec![GameEvent::MedicPreventedInfection {
                city: atlanta,
                colour: Colour::Blue
            }]
        );
        assert_eq!(state.city(atlanta).cubes(Colour::Blue), 0);
    }

    #[test]
    fn test_medic_does_not_prevent_uncured_colour() {
        let atlanta = city("Atlanta");
        let mut state = GameState::empty();
        with_pawn(&mut state, Role::Medic, atlanta);
        let mut t = Transition::new(state);
        infect_city(&mut t, atlanta, Colour::Blue, 1);

        let (state, _) = t.finish();
        assert_eq!(state.city(atlanta).cubes(Colour::Blue), 1);
    }

    #[test]
    fn test_quarantine_specialist_protects_neighbours() {
        let mut state = GameState::empty();
        with_pawn(&mut state, Role::QuarantineSpecialist, city("Chicago"));
        seed_cubes(&mut state, city("Miami"), Colour::Blue, 3);
        let mut t = Transition::new(state);

        infect_city(&mut t, city("Atlanta"), Colour::Blue, 1);
        infect_city(&mut t, city("Miami"), Colour::Blue, 1);

        let (state, events) = t.finish();
        // Atlanta and Mexico City are next to Chicago, so Miami's outbreak
        // only reaches Bogota and Washington.
        assert_eq!(state.city(city("Atlanta")).cubes(Colour::Blue), 0);
        assert_eq!(state.city(city("Mexico City")).cubes(Colour::Blue), 0);
        assert_eq!(state.city(city("Bogota")).cubes(Colour::Blue), 1);
        assert_eq!(state.city(city("Washington")).cubes(Colour::Blue), 1);
        assert_eq!(state.outbreak_counter(), 1);
        let prevented = events
            .iter()
            .filter(|e| matches!(e, GameEvent::QuarantineSpecialistPreventedInfection { .. }))
            .count();
        assert_eq!(prevented, 3);
    }
}
