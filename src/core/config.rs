//! Game and engine configuration.
//!
//! - `GameOptions`: what kind of game to set up (difficulty, roles, cards, seed)
//! - `EngineConfig`: how the engine behaves while running commands
//!
//! Both follow the builder style: start from `Default` and chain `with_*`.

use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};
use super::player::Role;

/// Game difficulty: sets how many epidemic cards go into the player deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Introductory,
    #[default]
    Normal,
    Heroic,
}

impl Difficulty {
    /// Number of epidemic cards shuffled into the player deck.
    #[must_use]
    pub const fn epidemic_cards(self) -> usize {
        match self {
            Difficulty::Introductory => 4,
            Difficulty::Normal => 5,
            Difficulty::Heroic => 6,
        }
    }
}

/// Options for setting up a new game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    /// Epidemic count.
    pub difficulty: Difficulty,

    /// Roles in turn order. 2-4 unique roles.
    pub roles: Vec<Role>,

    /// Shuffle the five special event cards into the player deck.
    pub include_special_event_cards: bool,

    /// Seed for setup and epidemic shuffles.
    pub rng_seed: u64,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            roles: vec![Role::Medic, Role::Scientist],
            include_special_event_cards: false,
            rng_seed: 42,
        }
    }
}

impl GameOptions {
    /// Set the difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the roles, in turn order.
    #[must_use]
    pub fn with_roles(mut self, roles: impl Into<Vec<Role>>) -> Self {
        self.roles = roles.into();
        self
    }

    /// Include or exclude special event cards.
    #[must_use]
    pub fn with_special_event_cards(mut self, include: bool) -> Self {
        self.include_special_event_cards = include;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Check role count and uniqueness.
    pub fn validate(&self) -> GameResult<()> {
        if !(2..=4).contains(&self.roles.len()) {
            return Err(GameError::invalid(format!(
                "a game needs 2-4 roles, got {}",
                self.roles.len()
            )));
        }
        for (i, role) in self.roles.iter().enumerate() {
            if self.roles[..i].contains(role) {
                return Err(GameError::invalid(format!("duplicate role: {role}")));
            }
        }
        Ok(())
    }

    /// Cards dealt to each player at setup.
    #[must_use]
    pub fn initial_hand_size(&self) -> usize {
        match self.roles.len() {
            2 => 4,
            3 => 3,
            _ => 2,
        }
    }
}

/// Engine behaviour toggles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Re-validate global invariants before every command.
    ///
    /// Meant for property and fuzz testing; off by default.
    pub self_consistency_check: bool,
}

impl EngineConfig {
    /// Enable or disable the self-consistency check.
    #[must_use]
    pub fn with_self_consistency_check(mut self, enabled: bool) -> Self {
        self.self_consistency_check = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = GameOptions::default();
        assert_eq!(options.difficulty, Difficulty::Normal);
        assert_eq!(options.roles.len(), 2);
        assert!(options.validate().is_ok());
        assert_eq!(options.initial_hand_size(), 4);
    }

    #[test]
    fn test_builder_pattern() {
        let options = GameOptions::default()
            .with_difficulty(Difficulty::Heroic)
            .with_roles([Role::Dispatcher, Role::Researcher, Role::Medic])
            .with_special_event_cards(true)
            .with_seed(7);

        assert_eq!(options.difficulty.epidemic_cards(), 6);
        assert_eq!(options.roles[0], Role::Dispatcher);
        assert!(options.include_special_event_cards);
        assert_eq!(options.rng_seed, 7);
        assert_eq!(options.initial_hand_size(), 3);
    }

    #[test]
    fn test_validate_rejects_bad_roles() {
        let one = GameOptions::default().with_roles([Role::Medic]);
        assert!(one.validate().unwrap_err().is_invalid_input());

        let dup = GameOptions::default().with_roles([Role::Medic, Role::Medic]);
        assert!(dup.validate().unwrap_err().is_invalid_input());

        let five = GameOptions::default().with_roles([
            Role::Medic,
            Role::Scientist,
            Role::Researcher,
            Role::Dispatcher,
            Role::OperationsExpert,
        ]);
        assert!(five.validate().is_err());
    }

    #[test]
    fn test_engine_config() {
        assert!(!EngineConfig::default().self_consistency_check);
        assert!(EngineConfig::default().with_self_consistency_check(true).self_consistency_check);
    }

    #[test]
    fn test_options_serialization() {
        let options = GameOptions::default().with_seed(99);
        let json = serde_json::to_string(&options).unwrap();
        let deserialized: GameOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, deserialized);
    }
}
