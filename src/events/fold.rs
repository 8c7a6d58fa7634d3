//! Event application: the only place game state changes.
//!
//! `apply_event` is a pure `(GameState, &GameEvent) -> GameState` function.
//! Command handlers and the turn-phase process manager build every successor
//! state with it, and `GameState::from_events` replays a log with the same
//! function, so live play and replay cannot diverge.
//!
//! Events are trusted facts. The fold does not re-validate them.

use tracing::debug;

use super::event::GameEvent;
use crate::board::CityId;
use crate::core::{
    Colour, Deck, DiseaseStatus, GameState, Player, PlayerCard, Role, TurnPhase,
    ACTIONS_PER_TURN, INFECTION_RATES,
};

/// Fold one event into a state, returning the successor state.
#[must_use]
pub fn apply_event(mut state: GameState, event: &GameEvent) -> GameState {
    apply_in_place(&mut state, event);
    state
}

/// Fold one event into a state the caller already owns.
pub(crate) fn apply_in_place(state: &mut GameState, event: &GameEvent) {
    match event {
        // === Setup ===
        GameEvent::DifficultySet { difficulty } => {
            state.difficulty = *difficulty;
        }
        GameEvent::ResearchStationPlaced { city } => {
            place_station(state, *city);
        }
        GameEvent::InfectionDeckSetUp { cards } => {
            state.infection_draw_pile = Deck::from_bottom_up(cards.iter().copied());
        }
        GameEvent::PlayerAdded { role } => {
            state
                .players
                .push_back(Player::new(*role, CityId::ATLANTA, ACTIONS_PER_TURN));
        }
        GameEvent::PlayerDeckShuffledForDealing { cards }
        | GameEvent::PlayerDeckFinalised { cards } => {
            state.player_draw_pile = Deck::from_bottom_up(cards.iter().copied());
        }
        GameEvent::PlayerCardPickedUp { role, card } => {
            let drawn = state.player_draw_pile.draw_top();
            debug_assert_eq!(drawn, Some(*card));
            if let Some(player) = state.player_mut(*role) {
                player.hand.add(*card);
            }
        }

        // === Actions ===
        GameEvent::PlayerDroveFerried { role, city }
        | GameEvent::PlayerShuttleFlew { role, city } => {
            move_pawn(state, *role, *city);
            use_action(state, *role);
        }
        GameEvent::PlayerDirectFlew { role, city } => {
            discard_from_hand(state, *role, PlayerCard::City(*city));
            move_pawn(state, *role, *city);
            use_action(state, *role);
        }
        GameEvent::PlayerCharterFlew { role, city } => {
            if let Some(from) = state.location_of(*role) {
                discard_from_hand(state, *role, PlayerCard::City(from));
            }
            move_pawn(state, *role, *city);
            use_action(state, *role);
        }
        GameEvent::ResearchStationBuilt { role, city } => {
            discard_from_hand(state, *role, PlayerCard::City(*city));
            place_station(state, *city);
            use_action(state, *role);
        }
        GameEvent::OperationsExpertBuiltResearchStation { city } => {
            place_station(state, *city);
            use_action(state, Role::OperationsExpert);
        }
        GameEvent::OperationsExpertFlewFromStation { city, discarded } => {
            discard_from_hand(state, Role::OperationsExpert, PlayerCard::City(*discarded));
            move_pawn(state, Role::OperationsExpert, *city);
            state.operations_expert_flew_this_turn = true;
            use_action(state, Role::OperationsExpert);
        }
        GameEvent::DiseaseTreated {
            role,
            city,
            colour,
            cubes_removed,
        } => {
            remove_cubes(state, *city, *colour, *cubes_removed);
            use_action(state, *role);
        }
        GameEvent::ShareKnowledgeGiven {
            giver,
            receiver,
            city,
        } => {
            pass_card(state, *giver, *receiver, PlayerCard::City(*city));
            use_action(state, *giver);
        }
        GameEvent::ShareKnowledgeTaken { taker, giver, city } => {
            pass_card(state, *giver, *taker, PlayerCard::City(*city));
            use_action(state, *taker);
        }
        GameEvent::CureDiscovered {
            role,
            colour,
            cards,
        } => {
            for &city in cards {
                discard_from_hand(state, *role, PlayerCard::City(city));
            }
            state.diseases[colour.index()] = DiseaseStatus::Cured;
            use_action(state, *role);
        }
        GameEvent::DispatcherMovedPawnToOtherPawn { pawn, target } => {
            if let Some(city) = state.location_of(*target) {
                move_pawn(state, *pawn, city);
            }
            use_action(state, Role::Dispatcher);
        }
        GameEvent::DispatcherDroveFerriedPawn { pawn, city }
        | GameEvent::DispatcherShuttleFlewPawn { pawn, city } => {
            move_pawn(state, *pawn, *city);
            use_action(state, Role::Dispatcher);
        }
        GameEvent::DispatcherDirectFlewPawn { pawn, city } => {
            discard_from_hand(state, Role::Dispatcher, PlayerCard::City(*city));
            move_pawn(state, *pawn, *city);
            use_action(state, Role::Dispatcher);
        }
        GameEvent::DispatcherCharterFlewPawn { pawn, city } => {
            if let Some(from) = state.location_of(*pawn) {
                discard_from_hand(state, Role::Dispatcher, PlayerCard::City(from));
            }
            move_pawn(state, *pawn, *city);
            use_action(state, Role::Dispatcher);
        }
        GameEvent::PlayerPassed { role } => {
            use_action(state, *role);
        }

        // === Role side effects ===
        GameEvent::MedicAutoRemovedCubes {
            city,
            colour,
            cubes_removed,
        } => {
            remove_cubes(state, *city, *colour, *cubes_removed);
        }
        GameEvent::DiseaseEradicated { colour } => {
            state.diseases[colour.index()] = DiseaseStatus::Eradicated;
        }

        // === Cards outside the action budget ===
        GameEvent::PlayerCardDiscarded { role, card } => {
            discard_from_hand(state, *role, *card);
        }
        GameEvent::GovernmentGrantUsed { role, city } => {
            discard_event_card(state, *role, event);
            place_station(state, *city);
        }
        GameEvent::AirliftUsed { role, pawn, city } => {
            discard_event_card(state, *role, event);
            move_pawn(state, *pawn, *city);
        }
        GameEvent::OneQuietNightUsed { role } => {
            discard_event_card(state, *role, event);
            state.one_quiet_night = true;
        }
        GameEvent::ResilientPopulationUsed { role, city } => {
            discard_event_card(state, *role, event);
            state.infection_discard_pile.remove(city);
            state.infection_cards_removed.push_back(*city);
        }
        GameEvent::ForecastUsed { role, cards } => {
            discard_event_card(state, *role, event);
            state.infection_draw_pile.replace_top(cards);
        }

        // === Turn phases ===
        GameEvent::TurnPhaseChanged { phase } => {
            state.phase = *phase;
        }
        GameEvent::EpidemicCardDiscarded { .. } => {
            if let Some(card) = state.player_draw_pile.draw_top() {
                debug_assert!(card.is_epidemic());
                state.player_discard_pile.place_on_top(card);
            }
        }
        GameEvent::InfectionRateIncreased => {
            state.infection_rate_marker =
                (state.infection_rate_marker + 1).min(INFECTION_RATES.len() - 1);
        }
        GameEvent::InfectionCardDrawnFromBottom { city } => {
            let drawn = state.infection_draw_pile.draw_bottom();
            debug_assert_eq!(drawn, Some(*city));
            state.infection_discard_pile.place_on_top(*city);
        }
        GameEvent::EpidemicIntensified { cards } => {
            state.infection_discard_pile.take_all();
            for &city in cards {
                state.infection_draw_pile.place_on_top(city);
            }
        }
        GameEvent::InfectionCardDrawn { city } => {
            let drawn = state.infection_draw_pile.draw_top();
            debug_assert_eq!(drawn, Some(*city));
            state.infection_discard_pile.place_on_top(*city);
        }
        GameEvent::CubeAddedToCity { city, colour } => {
            state.cubes.remove(*colour, 1);
            state.city_mut(*city).cubes.add(*colour, 1);
        }
        GameEvent::OutbreakOccurred { .. } => {
            state.outbreak_counter += 1;
        }
        GameEvent::MedicPreventedInfection { .. }
        | GameEvent::QuarantineSpecialistPreventedInfection { .. } => {}
        GameEvent::InfectCitiesSkipped => {
            state.one_quiet_night = false;
        }
        GameEvent::TurnEnded { .. } => {
            if !state.players.is_empty() {
                state.current_player = (state.current_player + 1) % state.players.len();
                let next = state.current_player;
                state.players[next].actions_remaining = ACTIONS_PER_TURN;
            }
            state.phase = TurnPhase::DoActions;
            state.operations_expert_flew_this_turn = false;
            debug!(player = state.current_player, "turn passed");
        }
        GameEvent::GameLost { reason } => {
            state.loss_reason = Some(reason.clone());
        }
    }
}

impl GameState {
    /// Rebuild a state by folding an event log from the zero state.
    ///
    /// The RNG of the rebuilt state is seeded with `0`; use
    /// [`GameState::from_events_with_seed`] to choose another seed.
    #[must_use]
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a GameEvent>) -> Self {
        events.into_iter().fold(GameState::empty(), apply_event)
    }

    /// Rebuild a state from an event log and give it a freshly seeded RNG.
    #[must_use]
    pub fn from_events_with_seed<'a>(
        events: impl IntoIterator<Item = &'a GameEvent>,
        seed: u64,
    ) -> Self {
        Self::from_events(events).with_rng_seed(seed)
    }
}

fn use_action(state: &mut GameState, role: Role) {
    if let Some(player) = state.player_mut(role) {
        player.actions_remaining = player.actions_remaining.saturating_sub(1);
    }
}

fn move_pawn(state: &mut GameState, role: Role, city: CityId) {
    if let Some(player) = state.player_mut(role) {
        player.location = city;
    }
}

fn discard_from_hand(state: &mut GameState, role: Role, card: PlayerCard) {
    let removed = state
        .player_mut(role)
        .map_or(false, |player| player.hand.remove(card));
    debug_assert!(removed, "{role} does not hold {card}");
    if removed {
        state.player_discard_pile.place_on_top(card);
    }
}

fn discard_event_card(state: &mut GameState, role: Role, event: &GameEvent) {
    if let Some(card) = event.event_card() {
        discard_from_hand(state, role, PlayerCard::Event(card));
    }
}

fn pass_card(state: &mut GameState, from: Role, to: Role, card: PlayerCard) {
    let removed = state
        .player_mut(from)
        .map_or(false, |player| player.hand.remove(card));
    if removed {
        if let Some(player) = state.player_mut(to) {
            player.hand.add(card);
        }
    }
}

fn place_station(state: &mut GameState, city: CityId) {
    state.city_mut(city).has_research_station = true;
    state.research_stations_remaining = state.research_stations_remaining.saturating_sub(1);
}

fn remove_cubes(state: &mut GameState, city: CityId, colour: Colour, count: u8) {
    let removed = state.city_mut(city).cubes.remove(colour, count);
    state.cubes.add(colour, removed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CubePile;

    fn with_players() -> GameState {
        [
            GameEvent::PlayerAdded { role: Role::Medic },
            GameEvent::PlayerAdded {
                role: Role::Scientist,
            },
        ]
        .iter()
        .fold(GameState::empty(), apply_event)
    }

    #[test]
    fn test_cube_added_moves_cube_from_supply() {
        let state = apply_event(
            GameState::empty(),
            &GameEvent::CubeAddedToCity {
                city: CityId(5),
                colour: Colour::Blue,
            },
        );

        assert_eq!(state.city(CityId(5)).cubes(Colour::Blue), 1);
        assert_eq!(state.cube_supply().get(Colour::Blue), 23);
    }

    #[test]
    fn test_fold_does_not_touch_prior_state() {
        let before = GameState::empty();
        let after = apply_event(
            before.clone(),
            &GameEvent::ResearchStationPlaced {
                city: CityId::ATLANTA,
            },
        );

        assert!(!before.city(CityId::ATLANTA).has_research_station);
        assert!(after.city(CityId::ATLANTA).has_research_station);
        assert_eq!(after.research_stations_remaining(), 5);
    }

    #[test]
    fn test_player_added_starts_in_atlanta() {
        let state = with_players();
        assert_eq!(state.players().len(), 2);
        assert_eq!(state.current_player().role, Role::Medic);
        assert_eq!(state.current_player().location, CityId::ATLANTA);
        assert_eq!(state.current_player().actions_remaining, 4);
    }

    #[test]
    fn test_drive_uses_an_action() {
        let state = apply_event(
            with_players(),
            &GameEvent::PlayerDroveFerried {
                role: Role::Medic,
                city: CityId(1),
            },
        );
        let medic = state.player(Role::Medic).unwrap();
        assert_eq!(medic.location, CityId(1));
        assert_eq!(medic.actions_remaining, 3);
    }

    #[test]
    fn test_turn_ended_cycles_players() {
        let mut state = with_players();
        state.players[0].actions_remaining = 0;
        state.phase = TurnPhase::InfectCities;

        let state = apply_event(state, &GameEvent::TurnEnded { role: Role::Medic });
        assert_eq!(state.current_player().role, Role::Scientist);
        assert_eq!(state.phase(), TurnPhase::DoActions);

        let state = apply_event(state, &GameEvent::TurnEnded { role: Role::Scientist });
        assert_eq!(state.current_player().role, Role::Medic);
        assert_eq!(state.current_player().actions_remaining, 4);
    }

    #[test]
    fn test_treat_returns_cubes() {
        let mut state = with_players();
        state.city_mut(CityId::ATLANTA).cubes = CubePile::empty();
        state.city_mut(CityId::ATLANTA).cubes.add(Colour::Blue, 3);
        state.cubes.remove(Colour::Blue, 3);

        let state = apply_event(
            state,
            &GameEvent::DiseaseTreated {
                role: Role::Medic,
                city: CityId::ATLANTA,
                colour: Colour::Blue,
                cubes_removed: 3,
            },
        );
        assert_eq!(state.city(CityId::ATLANTA).cubes(Colour::Blue), 0);
        assert_eq!(state.cube_supply().get(Colour::Blue), 24);
    }

    #[test]
    fn test_epidemic_intensify_puts_discards_on_top() {
        let mut state = GameState::empty();
        state.infection_draw_pile = Deck::from_bottom_up([CityId(1), CityId(2)]);
        state.infection_discard_pile = Deck::from_bottom_up([CityId(3), CityId(4)]);

        let state = apply_event(
            state,
            &GameEvent::EpidemicIntensified {
                cards: vec![CityId(4), CityId(3)],
            },
        );
        assert!(state.infection_discard_pile().is_empty());
        assert_eq!(
            state.infection_draw_pile().top_n(4),
            vec![CityId(3), CityId(4), CityId(2), CityId(1)]
        );
    }

    #[test]
    fn test_game_lost_records_reason() {
        let state = apply_event(
            GameState::empty(),
            &GameEvent::GameLost {
                reason: "8 outbreaks".into(),
            },
        );
        assert_eq!(state.loss_reason(), Some("8 outbreaks"));
    }
}
