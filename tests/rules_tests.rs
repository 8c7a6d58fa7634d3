//! Rule enforcement through the public engine API.

mod common;

use common::random_playout;
use pandemic_engine::{
    board, Command, CommandKind, GameError, GameOptions, Pandemic, PlayerCard, Role,
    RulesEngine, TurnPhase,
};

fn new_game() -> (Pandemic, pandemic_engine::GameState) {
    let engine = Pandemic::new();
    let (state, _) = engine.create_new_game(&GameOptions::default()).unwrap();
    (engine, state)
}

// =============================================================================
// Error Kinds
// =============================================================================

#[test]
fn test_discard_with_small_hand_is_rule_violation() {
    let (engine, state) = new_game();
    let card = state.current_player().hand.iter().next().unwrap();
    let err = engine
        .do_command(
            &state,
            Command::DiscardPlayerCard {
                role: Role::Medic,
                card,
            },
        )
        .unwrap_err();
    assert!(err.is_rule_violation());
    assert!(!err.is_invalid_input());
}

#[test]
fn test_unknown_city_name_is_invalid_input() {
    let err = board().city_id("Atlantis").unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(board().city_id("Atlanta").unwrap(), pandemic_engine::CityId::ATLANTA);
}

#[test]
fn test_over_game_rejects_commands() {
    let engine = Pandemic::new();
    let (state, setup) = engine
        .create_new_game(&GameOptions::default().with_seed(5))
        .unwrap();
    let playout = random_playout(&engine, &state, &setup, 5, 1000, |_| {});
    assert!(playout.state.is_over());
    assert!(engine.is_terminal(&playout.state));
    assert!(engine.legal_commands(&playout.state).is_empty());

    let err = engine
        .do_command(&playout.state, Command::Pass { role: Role::Medic })
        .unwrap_err();
    assert_eq!(err, GameError::rule("Game is over"));
    assert_eq!(err.to_string(), "Rule violation: Game is over");
}

#[test]
fn test_moving_to_current_city_is_rejected() {
    let (engine, state) = new_game();
    let err = engine
        .do_command(
            &state,
            Command::DriveFerry {
                role: Role::Medic,
                city: pandemic_engine::CityId::ATLANTA,
            },
        )
        .unwrap_err();
    assert!(err.is_rule_violation());
}

// =============================================================================
// Legal Commands
// =============================================================================

#[test]
fn test_every_generated_command_is_accepted() {
    let engine = Pandemic::new();
    let options = GameOptions::default()
        .with_roles([Role::Dispatcher, Role::OperationsExpert, Role::Researcher])
        .with_special_event_cards(true)
        .with_seed(77);
    let (state, setup) = engine.create_new_game(&options).unwrap();

    let mut checked = 0;
    random_playout(&engine, &state, &setup, 77, 40, |s| {
        for command in engine.legal_commands(s) {
            assert!(engine.do_command(s, command.clone()).is_ok(), "{command:?}");
            checked += 1;
        }
    });
    assert!(checked > 0);
}

#[test]
fn test_discards_only_while_over_limit() {
    let engine = Pandemic::new();
    for seed in 0..20 {
        let (state, setup) = engine
            .create_new_game(&GameOptions::default().with_seed(seed))
            .unwrap();
        random_playout(&engine, &state, &setup, seed, 1000, |s| {
            let commands = engine.legal_commands(s);
            if s.any_hand_over_limit() {
                assert!(commands
                    .iter()
                    .all(|c| c.kind() == CommandKind::DiscardPlayerCard || c.is_special_event()));
            } else {
                assert!(commands
                    .iter()
                    .all(|c| c.kind() != CommandKind::DiscardPlayerCard));
            }
        });
    }
}

#[test]
fn test_discard_in_random_play_hands_back_control() {
    let engine = Pandemic::new();
    for seed in 0..50 {
        let (state, setup) = engine
            .create_new_game(&GameOptions::default().with_seed(seed))
            .unwrap();
        let mut over_limit = None;
        random_playout(&engine, &state, &setup, seed, 1000, |s| {
            if over_limit.is_none() && s.any_hand_over_limit() {
                over_limit = Some(s.clone());
            }
        });
        let Some(state) = over_limit else { continue };

        let holder = state
            .players()
            .iter()
            .find(|p| p.hand.len() > 7)
            .unwrap()
            .clone();
        let card = holder.hand.iter().find(|c| !matches!(c, PlayerCard::Event(_))).unwrap();
        let (next, _) = engine
            .do_command(
                &state,
                Command::DiscardPlayerCard {
                    role: holder.role,
                    card,
                },
            )
            .unwrap();
        assert_eq!(next.player(holder.role).unwrap().hand.len(), holder.hand.len() - 1);
        if !next.is_over() && !next.any_hand_over_limit() {
            assert_eq!(next.phase(), TurnPhase::DoActions);
            assert!(next.current_player().actions_remaining > 0);
        }
        return;
    }
}

#[test]
fn test_priority_table_prefers_cures() {
    assert!(CommandKind::DiscoverCure.priority() > CommandKind::TreatDisease.priority());
    assert!(CommandKind::TreatDisease.priority() > CommandKind::DriveFerry.priority());
    assert!(CommandKind::DriveFerry.priority() > CommandKind::Pass.priority());
}
