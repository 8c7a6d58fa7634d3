//! Commands: what players ask for, which of those are legal, and the
//! validation that turns a legal command into events.

pub mod command;
pub mod generator;
pub(crate) mod validation;

pub use command::{sort_by_priority, Command, CommandKind};
pub use generator::legal_commands;
pub use validation::FORECAST_CARDS;
