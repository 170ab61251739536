use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-player damage ledger entry for one boss window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub name: String,
    pub damage: u64,
    pub attacks: u32,
}

/// Shared raid boss record, contested by every player on the floor.
///
/// Serialized in camelCase: external dashboards read this record as
/// persisted, so the field names are part of the interface.
///
/// `current_hp` only ever decreases, and only through
/// [`crate::raid::apply_boss_damage`]; the hit that brings it to zero flips
/// `active` to false in the same guarded write, so no matter how many
/// concurrent hits cross zero the transition happens exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossState {
    pub floor_number: u32,
    pub active: bool,
    pub current_hp: u64,
    pub total_hp: u64,
    pub participants: Vec<Participant>,
    pub current_weapon: String,
    pub expires_at: DateTime<Utc>,
}

impl BossState {
    pub fn new(floor_number: u32, total_hp: u64, weapon: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            floor_number,
            active: true,
            current_hp: total_hp,
            total_hp,
            participants: Vec::new(),
            current_weapon: weapon.to_string(),
            expires_at,
        }
    }

    /// Engagement-window check. Evaluated by the caller before allowing an
    /// attack, never inside the combat loop.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }
}
