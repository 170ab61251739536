//! Hostile-faction roster: named elites, the grunt pool and the shared
//! loot stash, all mutated through guarded writes.

pub mod logic;
pub mod types;

pub use logic::{
    claim_loot_col, deposit_loot, mark_member_dead, stand_up_faction, take_grunt, GruntOutcome,
    KillOutcome,
};
pub use types::{FactionRoster, LootPool, RosterMember};
