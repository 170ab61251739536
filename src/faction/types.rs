use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::opponents::types::named_member_templates;

/// One named elite on the shared roster. `alive` transitions true -> false
/// at most once, through [`crate::faction::mark_member_dead`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterMember {
    pub id: String,
    pub alive: bool,
    #[serde(default)]
    pub killed_by: Option<String>,
    #[serde(default)]
    pub killed_at: Option<DateTime<Utc>>,
}

/// Loot accumulated by the faction, claimable once members start falling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LootPool {
    pub col: u64,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub weapons: Vec<String>,
}

/// The shared faction aggregate.
///
/// Serialized in camelCase for the dashboards that read it directly.
/// Disbanding happens exactly once, precisely when every named member is
/// dead and the grunt pool is exhausted; both kill and grunt-take paths
/// evaluate that condition inside their guarded transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionRoster {
    pub members: Vec<RosterMember>,
    pub grunt_count: u32,
    pub loot_pool: LootPool,
    #[serde(default)]
    pub disbanded: bool,
}

impl FactionRoster {
    /// Fresh roster with every named elite alive and a full grunt pool.
    pub fn new(grunt_count: u32) -> Self {
        let members = named_member_templates()
            .iter()
            .map(|t| RosterMember {
                id: t.id.to_string(),
                alive: true,
                killed_by: None,
                killed_at: None,
            })
            .collect();
        Self {
            members,
            grunt_count,
            loot_pool: LootPool::default(),
            disbanded: false,
        }
    }

    pub fn member(&self, id: &str) -> Option<&RosterMember> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn alive_member_ids(&self) -> Vec<&str> {
        self.members
            .iter()
            .filter(|m| m.alive)
            .map(|m| m.id.as_str())
            .collect()
    }

    pub fn all_named_dead(&self) -> bool {
        self.members.iter().all(|m| !m.alive)
    }

    /// The disband condition. Callers never set `disbanded` directly; the
    /// guarded transforms call this after mutating.
    pub(crate) fn settle_disband(&mut self) {
        if !self.disbanded && self.all_named_dead() && self.grunt_count == 0 {
            self.disbanded = true;
        }
    }
}
