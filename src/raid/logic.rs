//! Guarded boss mutations.

use chrono::{DateTime, Utc};

use crate::raid::types::{BossState, Participant};
use crate::store::{ContestedStore, StoreError, UpdateOutcome};

/// Storage key for the boss window on a floor.
pub fn boss_key(floor_number: u32) -> String {
    format!("floor:{floor_number}")
}

/// Result of committing one battle's damage to the shared boss record.
#[derive(Debug, Clone, PartialEq)]
pub enum BossHit {
    /// Damage applied, boss still standing.
    Damaged(BossState),
    /// This call's damage brought the boss down; exactly one caller per
    /// window observes this.
    Killed(BossState),
    /// A concurrent caller already finished the boss (or the window is
    /// gone). Nothing was applied; do not grant kill rewards.
    AlreadyDown,
}

/// Stands up the boss window for a floor. First-writer-wins: when several
/// requests trigger the spawn at once, only one creates the record.
pub fn open_boss_window<S: ContestedStore<BossState>>(
    store: &S,
    floor_number: u32,
    total_hp: u64,
    weapon: &str,
    expires_at: DateTime<Utc>,
) -> Result<UpdateOutcome<BossState>, StoreError> {
    store.insert_if_absent(
        &boss_key(floor_number),
        BossState::new(floor_number, total_hp, weapon, expires_at),
    )
}

/// Commits `damage` from `attacker` to the boss pool.
///
/// The guard requires the boss to still be active with HP remaining; the
/// transform clamps the applied damage to what is left, updates the
/// attacker's ledger entry and deactivates the boss in the same write when
/// the pool reaches zero.
pub fn apply_boss_damage<S: ContestedStore<BossState>>(
    store: &S,
    floor_number: u32,
    attacker: &str,
    damage: u64,
) -> Result<BossHit, StoreError> {
    let outcome = store.update_if(
        &boss_key(floor_number),
        |boss| boss.active && boss.current_hp > 0,
        |boss| {
            let applied = damage.min(boss.current_hp);
            boss.current_hp -= applied;

            match boss.participants.iter_mut().find(|p| p.name == attacker) {
                Some(entry) => {
                    entry.damage += applied;
                    entry.attacks += 1;
                }
                None => boss.participants.push(Participant {
                    name: attacker.to_string(),
                    damage: applied,
                    attacks: 1,
                }),
            }

            if boss.current_hp == 0 {
                boss.active = false;
            }
        },
    )?;

    Ok(match outcome {
        UpdateOutcome::Applied(boss) if !boss.active => BossHit::Killed(boss),
        UpdateOutcome::Applied(boss) => BossHit::Damaged(boss),
        UpdateOutcome::GuardFailed => BossHit::AlreadyDown,
    })
}
