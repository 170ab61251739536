//! Skirmish - Combat core for a shared multiplayer RPG
//!
//! This crate implements the combat resolution engine and the
//! optimistic-concurrency mutation protocol that every contested shared
//! record (raid boss HP pool, faction roster, market listings, progression
//! counters) is updated through.
//!
//! Battles are pure computation over an injected RNG; shared state is only
//! touched through guarded conditional updates, so racing requests against
//! the same record resolve to exactly one winner.

pub mod constants;
pub mod dice;

pub mod combat;
pub mod opponents;

pub mod store;

pub mod faction;
pub mod market;
pub mod progression;
pub mod raid;
pub mod rewards;
pub mod wallet;

pub use combat::types::{BattleLogEntry, BattleReport, Fighter, Outcome, StatBlock};
pub use store::{StoreError, UpdateOutcome};
