//! Game rules: setup, the turn-phase process manager, infection and the
//! engine facade.
//!
//! `Pandemic` is the entry point. It validates commands (`commands`),
//! folds their events (`events`), then lets the process manager resolve
//! draws, epidemics and infections until a player must act again.

mod consistency;
pub mod engine;
pub(crate) mod infection;
pub(crate) mod process;
mod setup;
pub(crate) mod transition;

pub use engine::{GameOutcome, Pandemic, RulesEngine};
