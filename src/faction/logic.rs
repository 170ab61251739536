//! Guarded faction mutations.

use chrono::{DateTime, Utc};

use crate::faction::types::FactionRoster;
use crate::store::{ContestedStore, StoreError, UpdateOutcome};

/// Result of marking a named member dead.
#[derive(Debug, Clone, PartialEq)]
pub enum KillOutcome {
    /// This call performed the transition; `disbanded` reports whether it
    /// was also the kill that ended the faction.
    MemberKilled {
        roster: FactionRoster,
        disbanded: bool,
    },
    /// A concurrent request already resolved this kill (or the member id is
    /// unknown). Treat as handled elsewhere; grant nothing.
    AlreadyDead,
}

/// Result of consuming a grunt from the pool.
#[derive(Debug, Clone, PartialEq)]
pub enum GruntOutcome {
    GruntTaken {
        roster: FactionRoster,
        disbanded: bool,
    },
    /// Pool already empty.
    NoGrunts,
}

/// Stands up the faction under `key`. First-writer-wins, so concurrent
/// triggers cannot create two competing rosters.
pub fn stand_up_faction<S: ContestedStore<FactionRoster>>(
    store: &S,
    key: &str,
    grunt_count: u32,
) -> Result<UpdateOutcome<FactionRoster>, StoreError> {
    store.insert_if_absent(key, FactionRoster::new(grunt_count))
}

/// One-shot alive -> dead transition for a named member.
///
/// The guard requires the member to still be alive, so of two racing kill
/// reports exactly one applies; the other sees [`KillOutcome::AlreadyDead`].
pub fn mark_member_dead<S: ContestedStore<FactionRoster>>(
    store: &S,
    key: &str,
    member_id: &str,
    killed_by: &str,
    now: DateTime<Utc>,
) -> Result<KillOutcome, StoreError> {
    let outcome = store.update_if(
        key,
        |roster| {
            !roster.disbanded && roster.member(member_id).map(|m| m.alive).unwrap_or(false)
        },
        |roster| {
            if let Some(member) = roster.members.iter_mut().find(|m| m.id == member_id) {
                member.alive = false;
                member.killed_by = Some(killed_by.to_string());
                member.killed_at = Some(now);
            }
            roster.settle_disband();
        },
    )?;

    Ok(match outcome {
        UpdateOutcome::Applied(roster) => {
            let disbanded = roster.disbanded;
            KillOutcome::MemberKilled { roster, disbanded }
        }
        UpdateOutcome::GuardFailed => KillOutcome::AlreadyDead,
    })
}

/// Floor-guarded decrement of the grunt pool.
pub fn take_grunt<S: ContestedStore<FactionRoster>>(
    store: &S,
    key: &str,
) -> Result<GruntOutcome, StoreError> {
    let outcome = store.update_if(
        key,
        |roster| !roster.disbanded && roster.grunt_count > 0,
        |roster| {
            roster.grunt_count -= 1;
            roster.settle_disband();
        },
    )?;

    Ok(match outcome {
        UpdateOutcome::Applied(roster) => {
            let disbanded = roster.disbanded;
            GruntOutcome::GruntTaken { roster, disbanded }
        }
        UpdateOutcome::GuardFailed => GruntOutcome::NoGrunts,
    })
}

/// Adds loot to the faction stash. Guarded on the faction still standing;
/// loot for a disbanded faction belongs to whoever disbanded it.
pub fn deposit_loot<S: ContestedStore<FactionRoster>>(
    store: &S,
    key: &str,
    col: u64,
    materials: &[String],
    weapons: &[String],
) -> Result<UpdateOutcome<FactionRoster>, StoreError> {
    store.update_if(
        key,
        |roster| !roster.disbanded,
        |roster| {
            roster.loot_pool.col += col;
            roster.loot_pool.materials.extend_from_slice(materials);
            roster.loot_pool.weapons.extend_from_slice(weapons);
        },
    )
}

/// Floor-guarded withdrawal from the stash's col balance.
pub fn claim_loot_col<S: ContestedStore<FactionRoster>>(
    store: &S,
    key: &str,
    amount: u64,
) -> Result<UpdateOutcome<FactionRoster>, StoreError> {
    store.update_if(
        key,
        |roster| roster.loot_pool.col >= amount,
        |roster| roster.loot_pool.col -= amount,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCollection;
    use chrono::TimeZone;
    use std::sync::Arc;
    use std::thread;

    const KEY: &str = "faction:hollow-pact";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn new_store() -> MemoryCollection<FactionRoster> {
        let store = MemoryCollection::new("factions");
        stand_up_faction(&store, KEY, 2).unwrap();
        store
    }

    #[test]
    fn test_stand_up_is_first_writer_wins() {
        let store = new_store();
        assert_eq!(
            stand_up_faction(&store, KEY, 99).unwrap(),
            UpdateOutcome::GuardFailed
        );
        assert_eq!(store.read(KEY).unwrap().unwrap().grunt_count, 2);
    }

    #[test]
    fn test_mark_member_dead_is_one_shot() {
        let store = new_store();
        let first = mark_member_dead(&store, KEY, "pact.ivex", "Aldric", now()).unwrap();
        assert!(matches!(first, KillOutcome::MemberKilled { .. }));

        let second = mark_member_dead(&store, KEY, "pact.ivex", "Mira", now()).unwrap();
        assert_eq!(second, KillOutcome::AlreadyDead);

        let roster = store.read(KEY).unwrap().unwrap();
        let ivex = roster.member("pact.ivex").unwrap();
        assert!(!ivex.alive);
        assert_eq!(ivex.killed_by.as_deref(), Some("Aldric"));
    }

    #[test]
    fn test_unknown_member_reports_already_dead() {
        let store = new_store();
        assert_eq!(
            mark_member_dead(&store, KEY, "pact.nobody", "Aldric", now()).unwrap(),
            KillOutcome::AlreadyDead
        );
    }

    #[test]
    fn test_racing_kill_reports_apply_exactly_once() {
        let store: Arc<MemoryCollection<FactionRoster>> = Arc::new(MemoryCollection::new("factions"));
        stand_up_faction(&*store, KEY, 5).unwrap();

        let mut handles = Vec::new();
        for who in ["Aldric", "Mira", "Joren", "Petra"] {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                mark_member_dead(&*store, KEY, "pact.ghren", who, now()).unwrap()
            }));
        }
        let outcomes: Vec<KillOutcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let kills = outcomes
            .iter()
            .filter(|o| matches!(o, KillOutcome::MemberKilled { .. }))
            .count();
        assert_eq!(kills, 1);

        let roster = store.read(KEY).unwrap().unwrap();
        let dead = roster.members.iter().filter(|m| !m.alive).count();
        assert_eq!(dead, 1);
    }

    #[test]
    fn test_grunt_pool_drains_to_exactly_zero() {
        let store: Arc<MemoryCollection<FactionRoster>> = Arc::new(MemoryCollection::new("factions"));
        stand_up_faction(&*store, KEY, 10).unwrap();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                let mut taken = 0;
                while let GruntOutcome::GruntTaken { .. } = take_grunt(&*store, KEY).unwrap() {
                    taken += 1;
                }
                taken
            }));
        }
        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 10);
        assert_eq!(store.read(KEY).unwrap().unwrap().grunt_count, 0);
    }

    #[test]
    fn test_disband_happens_exactly_once_on_last_kill() {
        let store = new_store();
        // Drain grunts first.
        while matches!(take_grunt(&store, KEY).unwrap(), GruntOutcome::GruntTaken { .. }) {}

        let ids: Vec<String> = store
            .read(KEY)
            .unwrap()
            .unwrap()
            .members
            .iter()
            .map(|m| m.id.clone())
            .collect();

        let mut disband_events = 0;
        for id in &ids {
            if let KillOutcome::MemberKilled { disbanded: true, .. } =
                mark_member_dead(&store, KEY, id, "Aldric", now()).unwrap()
            {
                disband_events += 1;
            }
        }
        assert_eq!(disband_events, 1);
        assert!(store.read(KEY).unwrap().unwrap().disbanded);

        // Nothing further applies against a disbanded faction.
        assert_eq!(take_grunt(&store, KEY).unwrap(), GruntOutcome::NoGrunts);
        assert_eq!(
            deposit_loot(&store, KEY, 10, &[], &[]).unwrap(),
            UpdateOutcome::GuardFailed
        );
    }

    #[test]
    fn test_loot_claim_is_floor_guarded() {
        let store = new_store();
        deposit_loot(&store, KEY, 100, &["Dusk Iron".to_string()], &[]).unwrap();

        assert!(claim_loot_col(&store, KEY, 60).unwrap().is_applied());
        assert_eq!(
            claim_loot_col(&store, KEY, 60).unwrap(),
            UpdateOutcome::GuardFailed
        );
        assert_eq!(store.read(KEY).unwrap().unwrap().loot_pool.col, 40);
    }
}
