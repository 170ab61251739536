//! Stat aggregation.
//!
//! Combines a base actor record, an equipped item's stat block and a set of
//! multiplicative modifiers (level bonuses, title/perk bonuses) into one
//! resolved [`Fighter`]. No randomness: the same inputs always produce the
//! same profile.

use crate::combat::types::{Fighter, GearStats, InnateEffect, StatBlock, StatBonus, StatKind};

/// Base record for a player-controlled fighter or a raw (unhired) companion.
#[derive(Debug, Clone)]
pub struct ActorBlock {
    pub name: String,
    pub hp: u32,
    pub stats: StatBlock,
}

/// Base record for a hired companion. Hired companions fight at half their
/// listed strength: hp/atk/def/agi are halved before gear is added. The crit
/// threshold is left alone (halving it would make the companion crit twice
/// as often, the opposite of a nerf).
#[derive(Debug, Clone)]
pub struct CompanionBlock {
    pub name: String,
    pub hp: u32,
    pub stats: StatBlock,
}

/// Resolves a fighter profile from a base actor, optional gear and
/// multiplicative bonuses.
///
/// Floors after all modifiers: atk and agi never drop below 1 (combat must
/// always make forward progress), def never below 0.
pub fn resolve_fighter(
    base: &ActorBlock,
    gear: Option<&GearStats>,
    bonuses: &[StatBonus],
    effects: Vec<InnateEffect>,
) -> Fighter {
    resolve(&base.name, base.hp, &base.stats, gear, bonuses, effects)
}

/// Resolves a hired companion's profile. See [`CompanionBlock`] for the
/// halving rule.
pub fn resolve_companion(
    base: &CompanionBlock,
    gear: Option<&GearStats>,
    bonuses: &[StatBonus],
    effects: Vec<InnateEffect>,
) -> Fighter {
    let halved = StatBlock {
        atk: base.stats.atk / 2,
        def: base.stats.def / 2,
        agi: base.stats.agi / 2,
        cri: base.stats.cri,
    };
    resolve(&base.name, base.hp / 2, &halved, gear, bonuses, effects)
}

fn resolve(
    name: &str,
    base_hp: u32,
    base: &StatBlock,
    gear: Option<&GearStats>,
    bonuses: &[StatBonus],
    effects: Vec<InnateEffect>,
) -> Fighter {
    let gear_default = GearStats::default();
    let gear = gear.unwrap_or(&gear_default);

    let mut hp = (base_hp + gear.hp) as f64;
    let mut atk = (base.atk + gear.atk) as f64;
    let mut def = (base.def + gear.def) as f64;
    let mut agi = (base.agi + gear.agi) as f64;

    // A nonzero gear threshold replaces the wearer's when it is better.
    let mut cri = base.cri;
    if gear.cri > 0 && gear.cri < cri {
        cri = gear.cri;
    }

    let stat_ups = effects.iter().filter_map(|e| match e {
        InnateEffect::StatUp { stat, percent } => Some(StatBonus::new(*stat, *percent)),
        _ => None,
    });

    for bonus in bonuses.iter().copied().chain(stat_ups) {
        let mult = 1.0 + bonus.percent / 100.0;
        match bonus.stat {
            StatKind::Hp => hp *= mult,
            StatKind::Atk => atk *= mult,
            StatKind::Def => def *= mult,
            StatKind::Agi => agi *= mult,
        }
    }

    let resolved = StatBlock {
        atk: (atk as u32).max(1),
        def: def.max(0.0) as u32,
        agi: (agi as u32).max(1),
        cri,
    };

    Fighter::new(name.to_string(), (hp as u32).max(1), resolved).with_effects(effects)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_actor() -> ActorBlock {
        ActorBlock {
            name: "Aldric".to_string(),
            hp: 50,
            stats: StatBlock::new(5, 2, 3, 8),
        }
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let actor = base_actor();
        let gear = GearStats {
            hp: 10,
            atk: 3,
            def: 1,
            agi: 0,
            cri: 0,
        };
        let bonuses = [StatBonus::new(StatKind::Atk, 20.0)];

        let a = resolve_fighter(&actor, Some(&gear), &bonuses, Vec::new());
        let b = resolve_fighter(&actor, Some(&gear), &bonuses, Vec::new());
        assert_eq!(a.hp, b.hp);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_gear_adds_before_multipliers() {
        let actor = base_actor();
        let gear = GearStats {
            atk: 5,
            ..Default::default()
        };
        let bonuses = [StatBonus::new(StatKind::Atk, 50.0)];

        let f = resolve_fighter(&actor, Some(&gear), &bonuses, Vec::new());
        // (5 + 5) * 1.5 = 15
        assert_eq!(f.stats.atk, 15);
    }

    #[test]
    fn test_atk_and_agi_floor_at_one() {
        let actor = ActorBlock {
            name: "Frail".to_string(),
            hp: 10,
            stats: StatBlock::new(1, 1, 1, 8),
        };
        let bonuses = [
            StatBonus::new(StatKind::Atk, -99.0),
            StatBonus::new(StatKind::Agi, -99.0),
            StatBonus::new(StatKind::Def, -99.0),
        ];

        let f = resolve_fighter(&actor, None, &bonuses, Vec::new());
        assert_eq!(f.stats.atk, 1);
        assert_eq!(f.stats.agi, 1);
        assert_eq!(f.stats.def, 0);
    }

    #[test]
    fn test_companion_stats_are_halved_before_gear() {
        let companion = CompanionBlock {
            name: "Sellsword".to_string(),
            hp: 40,
            stats: StatBlock::new(8, 4, 6, 9),
        };
        let gear = GearStats {
            atk: 2,
            ..Default::default()
        };

        let f = resolve_companion(&companion, Some(&gear), &[], Vec::new());
        assert_eq!(f.hp, 20);
        assert_eq!(f.stats.atk, 6); // 8/2 + 2
        assert_eq!(f.stats.def, 2);
        assert_eq!(f.stats.agi, 3);
        assert_eq!(f.stats.cri, 9); // threshold not halved
    }

    #[test]
    fn test_gear_crit_threshold_only_improves() {
        let actor = base_actor(); // cri 8
        let better = GearStats {
            cri: 6,
            ..Default::default()
        };
        let worse = GearStats {
            cri: 11,
            ..Default::default()
        };

        assert_eq!(
            resolve_fighter(&actor, Some(&better), &[], Vec::new()).stats.cri,
            6
        );
        assert_eq!(
            resolve_fighter(&actor, Some(&worse), &[], Vec::new()).stats.cri,
            8
        );
    }

    #[test]
    fn test_stat_up_effects_apply() {
        let actor = base_actor();
        let effects = vec![InnateEffect::StatUp {
            stat: StatKind::Atk,
            percent: 100.0,
        }];

        let f = resolve_fighter(&actor, None, &[], effects);
        assert_eq!(f.stats.atk, 10);
    }
}
