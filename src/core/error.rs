//! Error types for command handling.
//!
//! Rule violations and invalid input are never conflated: a rule violation
//! is a well-formed command the rules forbid right now, invalid input is a
//! command that references something the game does not know about.

use thiserror::Error;

/// Errors returned by the engine.
///
/// Every failing call leaves the caller holding the prior state untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// The command is well-formed but the rules forbid it in this state.
    #[error("Rule violation: {0}")]
    RuleViolation(String),

    /// The command references something nonsensical (unknown city, role not
    /// in the game, malformed card list).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A global invariant was broken. Only produced in self-consistency mode.
    #[error("Consistency check failed: {0}")]
    ConsistencyCheckFailed(String),
}

impl GameError {
    /// Build a rule violation from anything printable.
    pub fn rule(message: impl Into<String>) -> Self {
        GameError::RuleViolation(message.into())
    }

    /// Build an invalid input error from anything printable.
    pub fn invalid(message: impl Into<String>) -> Self {
        GameError::InvalidInput(message.into())
    }

    /// Check if this is a rule violation.
    #[must_use]
    pub fn is_rule_violation(&self) -> bool {
        matches!(self, GameError::RuleViolation(_))
    }

    /// Check if this is invalid input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, GameError::InvalidInput(_))
    }
}

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_disjoint() {
        let rule = GameError::rule("Game is over");
        let invalid = GameError::invalid("unknown city: Gotham");

        assert!(rule.is_rule_violation());
        assert!(!rule.is_invalid_input());
        assert!(invalid.is_invalid_input());
        assert!(!invalid.is_rule_violation());
    }

    #[test]
    fn test_error_display() {
        let err = GameError::rule("Game is over");
        assert_eq!(err.to_string(), "Rule violation: Game is over");

        let err = GameError::ConsistencyCheckFailed("red cubes: 23".into());
        assert_eq!(err.to_string(), "Consistency check failed: red cubes: 23");
    }
}
