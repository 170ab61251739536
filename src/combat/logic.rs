//! Turn resolution loop.
//!
//! Round-by-round resolution of two fighter profiles: initiative, hit
//! checks, dice-pool damage and the crit chain. Pure computation over the
//! injected RNG; the caller commits the resulting outcome to shared state.

use rand::Rng;

use crate::combat::types::{BattleLogEntry, BattleReport, Fighter, Outcome};
use crate::constants::{GREAT_SUCCESS, MIN_HIT_DAMAGE, ROUND_CAP};
use crate::dice::{d66, percent_check};

/// Rolls an additive dice pool: `atk_dice` d66 draws minus `def_dice` d66
/// draws, clamped to the minimum hit damage. Higher stats raise both the
/// expected damage and its variance.
fn roll_damage_pool(atk_dice: u32, def_dice: u32, rng: &mut impl Rng) -> u32 {
    let mut total: i64 = 0;
    for _ in 0..atk_dice {
        total += d66(rng) as i64;
    }
    for _ in 0..def_dice {
        total -= d66(rng) as i64;
    }
    total.max(MIN_HIT_DAMAGE as i64) as u32
}

/// Executes one strike, appending log entries and applying damage to the
/// defender. Returns the damage dealt (0 on a miss).
pub(crate) fn perform_strike(
    attacker: &Fighter,
    defender: &mut Fighter,
    rng: &mut impl Rng,
    log: &mut Vec<BattleLogEntry>,
) -> u32 {
    // Skills preempt the normal attack and always land.
    if let Some((skill_name, chance, power)) = attacker.skill() {
        let skill_name = skill_name.to_string();
        if percent_check(rng, chance) {
            let damage = roll_damage_pool(attacker.stats.atk + power, defender.stats.def, rng);
            defender.take_damage(damage);
            log.push(BattleLogEntry::SkillAttack {
                attacker: attacker.name.clone(),
                defender: defender.name.clone(),
                skill: skill_name.clone(),
                damage,
                text: format!(
                    "{} unleashes {} on {} for {} damage!",
                    attacker.name, skill_name, defender.name, damage
                ),
            });
            return damage;
        }
    }

    let attack_roll = d66(rng);
    let attack_total = attack_roll + attacker.stats.agi;
    let defense_total = d66(rng) + defender.stats.agi;

    // A natural 12 is a great success and bypasses the evasion comparison.
    let hit = attack_roll == GREAT_SUCCESS || attack_total >= defense_total;

    if !hit {
        log.push(BattleLogEntry::Attack {
            attacker: attacker.name.clone(),
            defender: defender.name.clone(),
            hit: false,
            damage: 0,
            is_crit: false,
            text: format!("{} misses {}.", attacker.name, defender.name),
        });
        return 0;
    }

    let mut damage = roll_damage_pool(attacker.stats.atk, defender.stats.def, rng);

    // Crit chain: keep adding bonus dice while the threshold check holds.
    let mut crits = 0u32;
    while d66(rng) >= attacker.stats.cri {
        damage += d66(rng);
        crits += 1;
    }

    defender.take_damage(damage);

    let text = if crits > 0 {
        format!(
            "{} hits {} for {} damage (x{} crit)!",
            attacker.name, defender.name, damage, crits
        )
    } else {
        format!(
            "{} hits {} for {} damage.",
            attacker.name, defender.name, damage
        )
    };
    log.push(BattleLogEntry::Attack {
        attacker: attacker.name.clone(),
        defender: defender.name.clone(),
        hit: true,
        damage,
        is_crit: crits > 0,
        text,
    });
    damage
}

/// Rolls initiative for one round. Returns true when `me` acts first; ties
/// go to the opposing side.
pub(crate) fn me_acts_first(me: &Fighter, opponent: &Fighter, rng: &mut impl Rng) -> bool {
    let my_total = d66(rng) + me.stats.agi;
    let opp_total = d66(rng) + opponent.stats.agi;
    my_total > opp_total
}

/// Runs a PvE battle to its terminal outcome.
///
/// At most [`ROUND_CAP`] rounds; both sides still standing afterwards is a
/// draw. The report's outcome is from `me`'s perspective and the log always
/// ends with exactly one `End` entry.
pub fn run_battle(me: &mut Fighter, opponent: &mut Fighter, rng: &mut impl Rng) -> BattleReport {
    let mut log = Vec::new();

    for round in 1..=ROUND_CAP {
        log.push(BattleLogEntry::Round { number: round });

        let my_turn_first = me_acts_first(me, opponent, rng);
        for my_turn in [my_turn_first, !my_turn_first] {
            if my_turn {
                perform_strike(me, opponent, rng, &mut log);
                if !opponent.is_alive() {
                    return finish(log, Outcome::Win, me, opponent);
                }
            } else {
                perform_strike(opponent, me, rng, &mut log);
                if !me.is_alive() {
                    return finish(log, Outcome::Lose, me, opponent);
                }
            }
        }
    }

    finish(log, Outcome::Draw, me, opponent)
}

fn finish(
    mut log: Vec<BattleLogEntry>,
    outcome: Outcome,
    me: &Fighter,
    opponent: &Fighter,
) -> BattleReport {
    let winner = match outcome {
        Outcome::Win => Some(me.name.clone()),
        Outcome::Lose => Some(opponent.name.clone()),
        Outcome::Draw => None,
    };
    log.push(BattleLogEntry::End { outcome, winner });
    BattleReport {
        log,
        outcome,
        self_hp: me.hp,
        opponent_hp: opponent.hp,
    }
}
