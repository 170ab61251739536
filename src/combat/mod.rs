//! Combat resolution: fighter profiles, the turn loop and duel policies.

pub mod duel;
pub mod logic;
pub mod stats;
pub mod types;

pub use duel::{run_duel, DuelMode, DuelReport};
pub use logic::run_battle;
pub use stats::{resolve_companion, resolve_fighter};
pub use types::{BattleLogEntry, BattleReport, Fighter, Outcome, StatBlock};
