//! Rules engine trait and the Pandemic engine.
//!
//! Agents drive a game through `RulesEngine`:
//! - which commands are legal
//! - how a command produces the next state and its events
//! - whether the game is over, and how it ended

use tracing::{info, trace};

use super::process;
use super::setup;
use super::transition::Transition;
use crate::commands::{generator, validation, Command};
use crate::core::{EngineConfig, GameOptions, GameResult, GameState};
use crate::events::GameEvent;

/// How a finished game ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    /// Every disease cured.
    Won,
    /// A losing condition fired, with its reason.
    Lost(String),
}

impl GameOutcome {
    /// Check if the players won.
    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(self, GameOutcome::Won)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `do_command`: must be deterministic and must not touch `state`; a
///   failed command leaves the caller with the exact prior state
/// - `legal_commands`: every returned command must succeed in `do_command`
/// - `outcome`: `None` while the game continues
pub trait RulesEngine {
    type State: Clone;
    type Command: Clone;
    type Event;

    /// Validate and apply a command, returning the successor state and the
    /// events that produced it.
    fn do_command(
        &self,
        state: &Self::State,
        command: Self::Command,
    ) -> GameResult<(Self::State, Vec<Self::Event>)>;

    /// Every command the engine would accept in `state`.
    fn legal_commands(&self, state: &Self::State) -> Vec<Self::Command>;

    /// How the game ended, if it has.
    fn outcome(&self, state: &Self::State) -> Option<GameOutcome>;

    // === Convenience Methods ===

    /// Check if the game is over.
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.outcome(state).is_some()
    }
}

/// The Pandemic rules engine.
///
/// Holds only configuration; every game lives in the `GameState` values the
/// caller passes in, so one engine serves any number of search workers.
#[derive(Clone, Debug, Default)]
pub struct Pandemic {
    config: EngineConfig,
}

impl Pandemic {
    /// Engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a custom configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Set up a new game.
    ///
    /// Fails with `InvalidInput` for fewer than two, more than four, or
    /// repeated roles.
    pub fn create_new_game(
        &self,
        options: &GameOptions,
    ) -> GameResult<(GameState, Vec<GameEvent>)> {
        setup::create_new_game(options)
    }

    /// Validate `command` against `state` and resolve it, including every
    /// automatic phase that follows, until a player must act again.
    pub fn do_command(
        &self,
        state: &GameState,
        command: Command,
    ) -> GameResult<(GameState, Vec<GameEvent>)> {
        trace!(?command, "command received");
        if self.config.self_consistency_check {
            state.check_consistency()?;
        }

        let mut t = Transition::new(state.clone());
        validation::handle(&mut t, &command)?;
        process::advance(&mut t);
        let (next, events) = t.finish();

        if next.is_won() && !state.is_won() {
            info!(events = events.len(), "game won");
        }
        Ok((next, events))
    }

    /// Every legal command in `state`.
    #[must_use]
    pub fn legal_commands(&self, state: &GameState) -> Vec<Command> {
        generator::legal_commands(state)
    }
}

impl RulesEngine for Pandemic {
    type State = GameState;
    type Command = Command;
    type Event = GameEvent;

    fn do_command(
        &self,
        state: &GameState,
        command: Command,
    ) -> GameResult<(GameState, Vec<GameEvent>)> {
        Pandemic::do_command(self, state, command)
    }

    fn legal_commands(&self, state: &GameState) -> Vec<Command> {
        Pandemic::legal_commands(self, state)
    }

    fn outcome(&self, state: &GameState) -> Option<GameOutcome> {
        if let Some(reason) = state.loss_reason() {
            Some(GameOutcome::Lost(reason.to_string()))
        } else if state.is_won() {
            Some(GameOutcome::Won)
        } else {
            None
        }
    }
}
