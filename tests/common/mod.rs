//! Shared helpers for integration tests.

#![allow(dead_code)]

use pandemic_engine::{EventLog, GameRng, GameState, Pandemic};

/// Result of a random legal playout.
pub struct Playout {
    pub state: GameState,
    pub log: EventLog,
    pub steps: usize,
}

/// Play uniformly random legal commands until the game ends or `max_steps`
/// commands have been issued. `on_step` sees every intermediate state.
pub fn random_playout(
    engine: &Pandemic,
    start: &GameState,
    setup_events: &[pandemic_engine::GameEvent],
    seed: u64,
    max_steps: usize,
    mut on_step: impl FnMut(&GameState),
) -> Playout {
    let mut rng = GameRng::new(seed);
    let mut state = start.clone();
    let mut log = EventLog::from(setup_events.to_vec());
    let mut steps = 0;

    while !state.is_over() && steps < max_steps {
        let commands = engine.legal_commands(&state);
        let Some(command) = rng.choose(&commands).cloned() else {
            panic!("no legal commands in a running game");
        };
        let (next, events) = engine
            .do_command(&state, command.clone())
            .unwrap_or_else(|e| panic!("generated command {command:?} was rejected: {e}"));
        log.extend(events);
        state = next;
        steps += 1;
        on_step(&state);
    }

    Playout { state, log, steps }
}
