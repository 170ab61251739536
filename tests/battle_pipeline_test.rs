//! Integration test: full battle pipeline
//!
//! Drives the whole PvE path end to end: resolve a player profile from base
//! stats, gear and bonuses, provision a depth-scaled wild opponent, run the
//! battle and settle the result against shared wallet and progression
//! records. Everything is seeded, so each case replays identically.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish::combat::stats::ActorBlock;
use skirmish::combat::types::{GearStats, StatBonus, StatKind};
use skirmish::combat::{resolve_fighter, run_battle};
use skirmish::opponents::logic::provision_wild;
use skirmish::rewards::{settle_pve, RewardEffect, WorldStores};
use skirmish::store::ContestedStore;
use skirmish::{BattleLogEntry, Outcome};

use chrono::{TimeZone, Utc};

fn player() -> skirmish::Fighter {
    let actor = ActorBlock {
        name: "Aldric".to_string(),
        hp: 50,
        stats: skirmish::StatBlock::new(5, 2, 3, 8),
    };
    let gear = GearStats {
        hp: 10,
        atk: 4,
        def: 2,
        agi: 1,
        cri: 0,
    };
    let bonuses = [StatBonus::new(StatKind::Atk, 10.0)];
    resolve_fighter(&actor, Some(&gear), &bonuses, Vec::new())
}

#[test]
fn test_pipeline_is_reproducible_per_seed() {
    let run = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut me = player();
        let mut opponent = provision_wild(5, &mut rng);
        run_battle(&mut me, &mut opponent, &mut rng)
    };

    for seed in [7, 42, 1337] {
        let first = run(seed);
        let second = run(seed);
        assert_eq!(first.log, second.log);
        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.self_hp, second.self_hp);
        assert_eq!(first.opponent_hp, second.opponent_hp);
    }
}

#[test]
fn test_log_structure_holds_across_seeds() {
    for seed in 0..100 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut me = player();
        let mut opponent = provision_wild(8, &mut rng);
        let report = run_battle(&mut me, &mut opponent, &mut rng);

        assert!(matches!(
            report.log.first(),
            Some(BattleLogEntry::Round { number: 1 })
        ));
        assert!(matches!(report.log.last(), Some(BattleLogEntry::End { .. })));

        let ends = report
            .log
            .iter()
            .filter(|e| matches!(e, BattleLogEntry::End { .. }))
            .count();
        assert_eq!(ends, 1);
    }
}

#[test]
fn test_win_settlement_pays_col_and_exp() {
    // Find a seed where the player wins, then settle that result.
    let mut won = None;
    for seed in 0..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut me = player();
        let mut opponent = provision_wild(1, &mut rng);
        let max_hp = opponent.max_hp as u64;
        let report = run_battle(&mut me, &mut opponent, &mut rng);
        if report.outcome == Outcome::Win {
            won = Some((report, max_hp));
            break;
        }
    }
    let (report, opponent_max_hp) = won.expect("player never won in 200 seeds");

    let stores = WorldStores::new();
    let now = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();
    let effects = settle_pve(&stores, "Aldric", None, None, &report, opponent_max_hp, now).unwrap();

    let wallet = stores.wallets.read("Aldric").unwrap().unwrap();
    let progress = stores.progress.read("Aldric").unwrap().unwrap();
    assert!(wallet.col > 0);
    assert!(progress.exp > 0 || progress.level > 1);
    assert!(effects
        .iter()
        .any(|e| matches!(e, RewardEffect::ColGained { .. })));
    assert!(effects
        .iter()
        .any(|e| matches!(e, RewardEffect::ExpGained { .. })));
}

#[test]
fn test_loss_settlement_never_overdraws_wallet() {
    // Find a seed where the player loses badly.
    let mut lost = None;
    for seed in 0..400 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut me = player();
        let mut opponent = provision_wild(60, &mut rng);
        let max_hp = opponent.max_hp as u64;
        let report = run_battle(&mut me, &mut opponent, &mut rng);
        if report.outcome == Outcome::Lose {
            lost = Some((report, max_hp));
            break;
        }
    }
    let (report, opponent_max_hp) = lost.expect("player never lost in 400 seeds at depth 60");

    let stores = WorldStores::new();
    skirmish::wallet::open_wallet(&stores.wallets, "Aldric", 1).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();
    let effects = settle_pve(&stores, "Aldric", None, None, &report, opponent_max_hp, now).unwrap();

    // The penalty exceeds the 1-col balance, so the debit's guard fails and
    // bankruptcy is reported instead of applying a partial loss.
    assert!(effects
        .iter()
        .any(|e| matches!(e, RewardEffect::Bankruptcy { .. })));
    assert_eq!(stores.wallets.read("Aldric").unwrap().unwrap().col, 1);
}
