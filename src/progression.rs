//! Per-player progression counters.
//!
//! Level and experience live in shared storage and are granted from many
//! concurrent battle settlements. Experience is added with a plain guarded
//! increment; level-ups are settled by an iterative compare-and-swap that
//! advances one level at a time, so concurrent grants can never skip or
//! double-apply a level.

use serde::{Deserialize, Serialize};

use crate::constants::{LEVEL_SETTLE_RETRY_LIMIT, XP_CURVE_BASE, XP_CURVE_EXPONENT};
use crate::store::{ContestedStore, StoreError, UpdateOutcome};

/// Persisted level/exp pair. Invariant after any successful settlement:
/// `exp < required_for_next(level)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub level: u32,
    pub exp: u64,
}

impl Default for Progress {
    fn default() -> Self {
        Self { level: 1, exp: 0 }
    }
}

/// Experience required to advance from `level` to `level + 1`.
pub fn required_for_next(level: u32) -> u64 {
    (XP_CURVE_BASE * f64::powf(level as f64, XP_CURVE_EXPONENT)) as u64
}

/// What one grant call observed after settling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantReport {
    /// Level-ups this call applied (other concurrent calls may have applied
    /// more).
    pub levels_applied: u32,
    pub level: u32,
    pub exp: u64,
}

/// Grants experience and settles any level-ups it enables.
///
/// The level-up loop re-reads and retries with a `(level, exp)` equality
/// guard; it stops when the required experience is no longer met or after
/// [`LEVEL_SETTLE_RETRY_LIMIT`] interference retries (a concurrent grant
/// that caused the interference settles the remainder itself).
pub fn grant_exp<S: ContestedStore<Progress>>(
    store: &S,
    player_key: &str,
    amount: u64,
) -> Result<GrantReport, StoreError> {
    // First grant for a player stands the counter up; losing that race is
    // fine, the increment below applies either way.
    let _ = store.insert_if_absent(player_key, Progress::default())?;
    let mut current = store
        .update_if(player_key, |_| true, |p| p.exp += amount)?
        .applied()
        .unwrap_or_default();

    let mut levels_applied = 0;
    let mut retries = 0;
    loop {
        let required = required_for_next(current.level);
        if current.exp < required {
            break;
        }

        let observed = current;
        let outcome = store.update_if(
            player_key,
            |p| p.level == observed.level && p.exp == observed.exp,
            |p| {
                p.exp -= required;
                p.level += 1;
            },
        )?;

        match outcome {
            UpdateOutcome::Applied(next) => {
                levels_applied += 1;
                current = next;
            }
            UpdateOutcome::GuardFailed => {
                retries += 1;
                if retries > LEVEL_SETTLE_RETRY_LIMIT {
                    break;
                }
                match store.read(player_key)? {
                    Some(next) => current = next,
                    None => break,
                }
            }
        }
    }

    Ok(GrantReport {
        levels_applied,
        level: current.level,
        exp: current.exp,
    })
}
