//! New-game setup scenarios.

use pandemic_engine::{
    board, CityId, Colour, Difficulty, GameEvent, GameOptions, GameState, Pandemic, Role,
    TurnPhase,
};

// =============================================================================
// Standard Setup
// =============================================================================

#[test]
fn test_two_player_normal_setup() {
    let engine = Pandemic::new();
    let options = GameOptions::default()
        .with_difficulty(Difficulty::Normal)
        .with_roles([Role::Medic, Role::Scientist]);
    let (state, _) = engine.create_new_game(&options).unwrap();

    assert_eq!(state.infection_rate(), 2);
    assert_eq!(state.outbreak_counter(), 0);
    assert_eq!(
        state.infection_draw_pile().len() + state.infection_discard_pile().len(),
        48
    );
    assert_eq!(state.infection_discard_pile().len(), 9);
    assert_eq!(state.player_draw_pile().len(), 48 + 5 - 8);
    for player in state.players() {
        assert_eq!(player.hand.len(), 4);
        assert_eq!(player.location, CityId::ATLANTA);
        assert_eq!(player.actions_remaining, 4);
    }
    assert_eq!(state.current_player().role, Role::Medic);
    assert_eq!(state.phase(), TurnPhase::DoActions);
    assert!(!state.is_over());
}

#[test]
fn test_hand_sizes_by_player_count() {
    let engine = Pandemic::new();
    let cases = [
        (vec![Role::Medic, Role::Scientist, Role::Dispatcher], 3),
        (
            vec![
                Role::Medic,
                Role::Scientist,
                Role::Dispatcher,
                Role::QuarantineSpecialist,
            ],
            2,
        ),
    ];
    for (roles, hand) in cases {
        let count = roles.len();
        let (state, _) = engine
            .create_new_game(&GameOptions::default().with_roles(roles))
            .unwrap();
        assert!(state.players().iter().all(|p| p.hand.len() == hand));
        assert_eq!(state.player_draw_pile().len(), 48 + 5 - hand * count);
    }
}

#[test]
fn test_initial_infection_cubes() {
    let (state, events) = Pandemic::new()
        .create_new_game(&GameOptions::default().with_seed(3))
        .unwrap();

    let mut per_card: Vec<u8> = Vec::new();
    for event in &events {
        match event {
            GameEvent::InfectionCardDrawn { .. } => per_card.push(0),
            GameEvent::CubeAddedToCity { .. } => {
                if let Some(last) = per_card.last_mut() {
                    *last += 1;
                }
            }
            _ => {}
        }
    }
    assert_eq!(per_card, vec![3, 3, 3, 2, 2, 2, 1, 1, 1]);

    for &city in state.infection_discard_pile().iter() {
        let colour = board().colour(city);
        assert!(state.city(city).cubes(colour) >= 1);
    }
    let total: u32 = Colour::ALL.into_iter().map(|c| state.cubes_on_board(c)).sum();
    assert_eq!(total, 18);
}

#[test]
fn test_epidemic_count_by_difficulty() {
    let engine = Pandemic::new();
    for (difficulty, epidemics) in [
        (Difficulty::Introductory, 4),
        (Difficulty::Normal, 5),
        (Difficulty::Heroic, 6),
    ] {
        let (state, _) = engine
            .create_new_game(&GameOptions::default().with_difficulty(difficulty))
            .unwrap();
        let found = state
            .player_draw_pile()
            .iter()
            .filter(|c| c.is_epidemic())
            .count();
        assert_eq!(found, epidemics);
        assert!(state.check_consistency().is_ok());
    }
}

// =============================================================================
// Options Validation
// =============================================================================

#[test]
fn test_bad_role_lists_are_invalid_input() {
    let engine = Pandemic::new();
    for roles in [
        vec![Role::Medic],
        vec![Role::Medic, Role::Medic],
        vec![
            Role::Medic,
            Role::Scientist,
            Role::Researcher,
            Role::Dispatcher,
            Role::OperationsExpert,
        ],
    ] {
        let err = engine
            .create_new_game(&GameOptions::default().with_roles(roles))
            .unwrap_err();
        assert!(err.is_invalid_input());
    }
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_setup_is_deterministic_per_seed() {
    let engine = Pandemic::new();
    let options = GameOptions::default().with_seed(1234);
    let (a, events_a) = engine.create_new_game(&options).unwrap();
    let (b, events_b) = engine.create_new_game(&options).unwrap();

    assert_eq!(events_a, events_b);
    assert!(a.is_same_state_as(&b));
    assert!(GameState::from_events(&events_a).is_same_state_as(&a));
}
