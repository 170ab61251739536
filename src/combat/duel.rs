//! Duel mode policy.
//!
//! PvP duels run on the same dice and damage primitives as PvE battles, but
//! a mode-specific termination check runs after every individual strike, not
//! only at round end. There are no draws: an unresolved duel after the round
//! cap goes to the side with strictly more HP left, and the defender keeps
//! the tie.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::logic::{me_acts_first, perform_strike};
use crate::combat::types::{BattleLogEntry, Fighter, Outcome};
use crate::constants::{FIRST_STRIKE_PERCENT, HALF_LOSS_PERCENT, ROUND_CAP};

/// Victory-condition policy for a duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuelMode {
    /// First single strike dealing >=10% of the target's max HP wins.
    FirstStrike,
    /// A side dropping to <=50% of its own max HP loses.
    HalfLoss,
    /// Standard elimination. Highest external stakes, no early exit.
    TotalLoss,
}

impl DuelMode {
    /// Evaluated after each individual strike. Returns true when this strike
    /// decided the duel in the striker's favor.
    fn striker_wins(self, target: &Fighter, damage: u32) -> bool {
        match self {
            DuelMode::FirstStrike => damage * 100 >= target.max_hp * FIRST_STRIKE_PERCENT,
            DuelMode::HalfLoss => target.hp * 100 <= target.max_hp * HALF_LOSS_PERCENT,
            DuelMode::TotalLoss => !target.is_alive(),
        }
    }
}

/// Fully resolved duel record. Created and resolved within one invocation,
/// immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuelReport {
    pub mode: DuelMode,
    pub wager: u64,
    pub attacker: String,
    pub defender: String,
    pub winner: String,
    pub loser: String,
    pub winner_hp_remaining: u32,
    pub loser_hp_remaining: u32,
    pub log: Vec<BattleLogEntry>,
}

/// Runs a duel between two resolved player profiles.
///
/// `attacker` is the challenger; initiative is still re-rolled every round
/// and ties favor the defender, same as PvE.
pub fn run_duel(
    attacker: &mut Fighter,
    defender: &mut Fighter,
    mode: DuelMode,
    wager: u64,
    rng: &mut impl Rng,
) -> DuelReport {
    let mut log = Vec::new();

    for round in 1..=ROUND_CAP {
        log.push(BattleLogEntry::Round { number: round });

        let attacker_first = me_acts_first(attacker, defender, rng);
        for attacker_strikes in [attacker_first, !attacker_first] {
            let decided = if attacker_strikes {
                let damage = perform_strike(attacker, defender, rng, &mut log);
                mode.striker_wins(defender, damage) || !defender.is_alive()
            } else {
                let damage = perform_strike(defender, attacker, rng, &mut log);
                mode.striker_wins(attacker, damage) || !attacker.is_alive()
            };
            if decided {
                let attacker_won = attacker_strikes;
                return finish(log, attacker, defender, mode, wager, attacker_won);
            }
        }
    }

    // Round cap reached: strictly higher HP wins, defender keeps the tie.
    let attacker_won = attacker.hp > defender.hp;
    finish(log, attacker, defender, mode, wager, attacker_won)
}

fn finish(
    mut log: Vec<BattleLogEntry>,
    attacker: &Fighter,
    defender: &Fighter,
    mode: DuelMode,
    wager: u64,
    attacker_won: bool,
) -> DuelReport {
    let (winner, loser) = if attacker_won {
        (attacker, defender)
    } else {
        (defender, attacker)
    };
    log.push(BattleLogEntry::End {
        outcome: Outcome::Win,
        winner: Some(winner.name.clone()),
    });
    DuelReport {
        mode,
        wager,
        attacker: attacker.name.clone(),
        defender: defender.name.clone(),
        winner: winner.name.clone(),
        loser: loser.name.clone(),
        winner_hp_remaining: winner.hp,
        loser_hp_remaining: loser.hp,
        log,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::StatBlock;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fighter(name: &str, hp: u32, atk: u32, def: u32, agi: u32, cri: u32) -> Fighter {
        Fighter::new(name.to_string(), hp, StatBlock::new(atk, def, agi, cri))
    }

    #[test]
    fn test_winner_is_always_a_combatant() {
        for seed in 0..100 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut a = fighter("Challenger", 60, 4, 2, 3, 8);
            let mut d = fighter("Champion", 60, 4, 2, 3, 8);
            let report = run_duel(&mut a, &mut d, DuelMode::TotalLoss, 100, &mut rng);
            assert!(report.winner == "Challenger" || report.winner == "Champion");
            assert_ne!(report.winner, report.loser);
        }
    }

    #[test]
    fn test_first_strike_ends_on_big_hit_even_at_lower_hp() {
        // Glass cannon vs fortress: the cannon can never chew through 200 HP
        // in five rounds, so any win it takes must come from the 10% rule.
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut a = fighter("GlassCannon", 30, 9, 0, 6, 6);
            let mut d = fighter("Fortress", 200, 2, 4, 2, 11);
            let report = run_duel(&mut a, &mut d, DuelMode::FirstStrike, 50, &mut rng);

            if report.winner == "GlassCannon" {
                // The duel ended the moment a strike crossed 10% of the
                // target's max HP (20), regardless of the striker's own HP.
                let decided = report.log.iter().any(|e| {
                    matches!(e, BattleLogEntry::Attack { damage, hit: true, .. } if damage * 100 >= 200 * FIRST_STRIKE_PERCENT)
                        || matches!(e, BattleLogEntry::SkillAttack { damage, .. } if damage * 100 >= 200 * FIRST_STRIKE_PERCENT)
                });
                assert!(decided);
            }
        }
    }

    #[test]
    fn test_half_loss_ends_before_elimination() {
        for seed in 0..100 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut a = fighter("A", 100, 5, 1, 3, 8);
            let mut d = fighter("D", 100, 5, 1, 3, 8);
            let report = run_duel(&mut a, &mut d, DuelMode::HalfLoss, 0, &mut rng);

            // The winner never dropped to half HP; if the loser did, the
            // duel must have ended there rather than running to elimination.
            assert!(report.winner_hp_remaining * 100 > 100 * HALF_LOSS_PERCENT);
            let rounds = report
                .log
                .iter()
                .filter(|e| matches!(e, BattleLogEntry::Round { .. }))
                .count() as u32;
            assert!(
                report.loser_hp_remaining * 100 <= 100 * HALF_LOSS_PERCENT
                    || rounds == ROUND_CAP
            );
        }
    }

    #[test]
    fn test_round_cap_goes_to_higher_hp() {
        for seed in 0..100 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            // Unkillable walls: total-loss duel always reaches the cap.
            let mut a = fighter("A", 5000, 1, 12, 3, 13);
            let mut d = fighter("D", 5000, 1, 12, 3, 13);
            let report = run_duel(&mut a, &mut d, DuelMode::TotalLoss, 0, &mut rng);

            assert!(report.winner_hp_remaining >= report.loser_hp_remaining);
            if report.winner == "A" {
                // Challenger only wins the cap with strictly more HP.
                assert!(report.winner_hp_remaining > report.loser_hp_remaining);
            }
        }
    }

    #[test]
    fn test_duel_log_ends_with_end_entry() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut a = fighter("A", 40, 5, 1, 3, 8);
        let mut d = fighter("D", 40, 5, 1, 3, 8);
        let report = run_duel(&mut a, &mut d, DuelMode::TotalLoss, 10, &mut rng);
        assert!(matches!(
            report.log.last(),
            Some(BattleLogEntry::End { .. })
        ));
    }
}
