//! Opponent selection.
//!
//! PvE draws from a five-tier table (four common tiers plus a rare tier
//! synthesized from the strongest common one). Faction encounters prefer a
//! surviving named elite and fall back to depth-scaled grunts once the named
//! roster is wiped. PvP opponents are supplied by the caller as an already
//! resolved fighter and never pass through here.

use rand::Rng;

use crate::combat::types::Fighter;
use crate::constants::{
    GRUNT_SCALE_FLOOR, GRUNT_SCALE_PIVOT, GRUNT_SCALE_STEP, RARE_TIER_HP_MULT, RARE_TIER_PERCENT,
    RARE_TIER_STAT_MULT, WILD_DEPTH_STEP,
};
use crate::dice::percent_check;
use crate::faction::types::FactionRoster;
use crate::opponents::types::{named_template_by_id, EnemyTemplate, GRUNT_TEMPLATES, WILD_TIERS};

/// Draw weights for the four common wild tiers, weakest first. Must sum
/// to 100.
const COMMON_TIER_WEIGHTS: [u32; 4] = [40, 30, 20, 10];

/// Depth scale for wild enemies.
pub fn wild_scale(depth: u32) -> f64 {
    1.0 + depth.saturating_sub(1) as f64 * WILD_DEPTH_STEP
}

/// Grunt stats scale linearly with depth around the pivot floor, with a
/// floor so shallow depths do not produce sub-unit stats.
pub fn grunt_scale(depth: u32) -> f64 {
    let scale = 1.0 + (depth as f64 - GRUNT_SCALE_PIVOT as f64) * GRUNT_SCALE_STEP;
    scale.max(GRUNT_SCALE_FLOOR)
}

fn pick_common_tier(rng: &mut impl Rng) -> &'static EnemyTemplate {
    let roll = rng.gen_range(0..100);
    let mut cumulative = 0;
    for (template, weight) in WILD_TIERS.iter().zip(COMMON_TIER_WEIGHTS) {
        cumulative += weight;
        if roll < cumulative {
            return template;
        }
    }
    &WILD_TIERS[WILD_TIERS.len() - 1]
}

/// Provisions a randomized-tier wild enemy for the given dungeon depth.
pub fn provision_wild(depth: u32, rng: &mut impl Rng) -> Fighter {
    let scale = wild_scale(depth);

    if percent_check(rng, RARE_TIER_PERCENT) {
        // The rare tier is synthesized from the strongest common tier at
        // this depth rather than drawn verbatim, so its stats stay coherent
        // with where the player is.
        let strongest = &WILD_TIERS[WILD_TIERS.len() - 1];
        let name = format!("Abyssal {}", strongest.name);
        let mut fighter = strongest.to_fighter_named(&name, scale * RARE_TIER_STAT_MULT);
        let rare_hp = ((strongest.hp as f64 * scale * RARE_TIER_HP_MULT) as u32).max(1);
        fighter.hp = rare_hp;
        fighter.max_hp = rare_hp;
        return fighter;
    }

    pick_common_tier(rng).to_fighter(scale)
}

/// Provisions the next faction opponent, or `None` when the faction has
/// nothing left to send (caller should observe the disband instead).
///
/// Surviving named elites are chosen uniformly; they fight at full template
/// strength regardless of depth. Grunts scale with depth.
pub fn provision_faction_opponent(
    roster: &FactionRoster,
    depth: u32,
    rng: &mut impl Rng,
) -> Option<Fighter> {
    let alive = roster.alive_member_ids();
    if !alive.is_empty() {
        let id = alive[rng.gen_range(0..alive.len())];
        return named_template_by_id(id).map(|t| t.to_fighter(1.0));
    }

    if roster.grunt_count > 0 {
        let template = &GRUNT_TEMPLATES[rng.gen_range(0..GRUNT_TEMPLATES.len())];
        return Some(template.to_fighter(grunt_scale(depth)));
    }

    None
}
