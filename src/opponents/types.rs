//! Declarative enemy templates.
//!
//! Stats are baseline values at depth 1 (wild tiers) or at the scale pivot
//! (grunts); provisioning applies the depth scale before the template is
//! resolved into a fighter.

use crate::combat::stats::{resolve_fighter, ActorBlock};
use crate::combat::types::{Fighter, InnateEffect, StatBlock, StatKind};

/// A declarative enemy definition.
#[derive(Debug, Clone, Copy)]
pub struct EnemyTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub hp: u32,
    pub stats: StatBlock,
    /// Optional skill: (name, chance out of 100, extra damage dice).
    pub skill: Option<(&'static str, u32, u32)>,
    /// Optional permanent stat bonus: (stat, percent).
    pub stat_up: Option<(StatKind, f64)>,
}

impl EnemyTemplate {
    /// Innate-effect list merged into the resolved profile.
    pub fn effects(&self) -> Vec<InnateEffect> {
        let mut effects = Vec::new();
        if let Some((stat, percent)) = self.stat_up {
            effects.push(InnateEffect::StatUp { stat, percent });
        }
        if let Some((name, chance, power)) = self.skill {
            effects.push(InnateEffect::Skill {
                name: name.to_string(),
                chance,
                power,
            });
        }
        effects
    }

    /// Resolves the template into a fighter with all numeric stats scaled.
    /// The crit threshold is not scaled (it is a d66 threshold, not a
    /// magnitude).
    pub fn to_fighter(&self, scale: f64) -> Fighter {
        self.to_fighter_named(self.name, scale)
    }

    pub(crate) fn to_fighter_named(&self, name: &str, scale: f64) -> Fighter {
        let base = ActorBlock {
            name: name.to_string(),
            hp: ((self.hp as f64 * scale) as u32).max(1),
            stats: StatBlock {
                atk: ((self.stats.atk as f64 * scale) as u32).max(1),
                def: (self.stats.def as f64 * scale) as u32,
                agi: ((self.stats.agi as f64 * scale) as u32).max(1),
                cri: self.stats.cri,
            },
        };
        resolve_fighter(&base, None, &[], self.effects())
    }
}

/// The four common wild tiers, ordered weakest to strongest. The rare fifth
/// tier is synthesized from the strongest entry at provisioning time so its
/// stats stay coherent with depth.
pub const WILD_TIERS: [EnemyTemplate; 4] = [
    EnemyTemplate {
        id: "wild.frenzy_boar",
        name: "Frenzy Boar",
        hp: 18,
        stats: StatBlock {
            atk: 2,
            def: 0,
            agi: 1,
            cri: 11,
        },
        skill: None,
        stat_up: None,
    },
    EnemyTemplate {
        id: "wild.ridge_wolf",
        name: "Ridge Wolf",
        hp: 26,
        stats: StatBlock {
            atk: 3,
            def: 1,
            agi: 3,
            cri: 10,
        },
        skill: None,
        stat_up: None,
    },
    EnemyTemplate {
        id: "wild.trench_lizard",
        name: "Trench Lizard",
        hp: 38,
        stats: StatBlock {
            atk: 4,
            def: 2,
            agi: 2,
            cri: 10,
        },
        skill: Some(("Tail Sweep", 15, 1)),
        stat_up: None,
    },
    EnemyTemplate {
        id: "wild.dread_mantis",
        name: "Dread Mantis",
        hp: 50,
        stats: StatBlock {
            atk: 5,
            def: 2,
            agi: 4,
            cri: 9,
        },
        skill: Some(("Scythe Lunge", 20, 2)),
        stat_up: None,
    },
];

/// Named elites of the hostile faction. Roster member ids reference these
/// templates.
pub const FACTION_NAMED: [EnemyTemplate; 5] = [
    EnemyTemplate {
        id: "pact.ghren",
        name: "Serrated Ghren",
        hp: 90,
        stats: StatBlock {
            atk: 7,
            def: 3,
            agi: 4,
            cri: 8,
        },
        skill: Some(("Rusted Cleaver", 25, 2)),
        stat_up: None,
    },
    EnemyTemplate {
        id: "pact.ivex",
        name: "Pale Matron Ivex",
        hp: 75,
        stats: StatBlock {
            atk: 6,
            def: 2,
            agi: 6,
            cri: 7,
        },
        skill: Some(("Needle Rain", 30, 1)),
        stat_up: Some((StatKind::Agi, 20.0)),
    },
    EnemyTemplate {
        id: "pact.moros",
        name: "Moros the Quiet",
        hp: 110,
        stats: StatBlock {
            atk: 6,
            def: 5,
            agi: 3,
            cri: 9,
        },
        skill: None,
        stat_up: Some((StatKind::Def, 25.0)),
    },
    EnemyTemplate {
        id: "pact.velle",
        name: "Red-Handed Velle",
        hp: 80,
        stats: StatBlock {
            atk: 8,
            def: 2,
            agi: 5,
            cri: 7,
        },
        skill: Some(("Twin Daggers", 35, 2)),
        stat_up: None,
    },
    EnemyTemplate {
        id: "pact.ostren",
        name: "Warden Ostren",
        hp: 130,
        stats: StatBlock {
            atk: 9,
            def: 4,
            agi: 3,
            cri: 8,
        },
        skill: Some(("Chainbreaker", 20, 3)),
        stat_up: Some((StatKind::Hp, 15.0)),
    },
];

/// Grunt bodies used once every named elite is down. Baseline stats are for
/// the scale pivot depth; shallower floors scale them down.
pub const GRUNT_TEMPLATES: [EnemyTemplate; 3] = [
    EnemyTemplate {
        id: "pact.grunt.cutthroat",
        name: "Pact Cutthroat",
        hp: 55,
        stats: StatBlock {
            atk: 5,
            def: 2,
            agi: 4,
            cri: 9,
        },
        skill: None,
        stat_up: None,
    },
    EnemyTemplate {
        id: "pact.grunt.stalker",
        name: "Pact Stalker",
        hp: 45,
        stats: StatBlock {
            atk: 4,
            def: 1,
            agi: 6,
            cri: 8,
        },
        skill: Some(("Ambush", 20, 1)),
        stat_up: None,
    },
    EnemyTemplate {
        id: "pact.grunt.butcher",
        name: "Pact Butcher",
        hp: 70,
        stats: StatBlock {
            atk: 6,
            def: 3,
            agi: 2,
            cri: 10,
        },
        skill: None,
        stat_up: None,
    },
];

/// Lookup for a named faction template by roster member id.
pub fn named_member_templates() -> &'static [EnemyTemplate] {
    &FACTION_NAMED
}

pub fn named_template_by_id(id: &str) -> Option<&'static EnemyTemplate> {
    FACTION_NAMED.iter().find(|t| t.id == id)
}
