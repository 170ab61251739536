//! Raid boss shared state and its guarded mutations.

pub mod logic;
pub mod types;

pub use logic::{apply_boss_damage, boss_key, open_boss_window, BossHit};
pub use types::{BossState, Participant};
