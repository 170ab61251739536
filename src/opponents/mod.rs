//! Opponent provisioning: wild enemy tiers, hostile-faction elites and
//! depth-scaled grunts.

pub mod logic;
pub mod types;

pub use logic::{grunt_scale, provision_faction_opponent, provision_wild, wild_scale};
pub use types::{named_member_templates, EnemyTemplate};
