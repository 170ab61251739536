use serde::{Deserialize, Serialize};

use crate::constants::{MAX_CRIT_THRESHOLD, MIN_CRIT_THRESHOLD};

/// Core combat stats shared by every actor kind.
///
/// `cri` is a d66 threshold, not a chance: after a hit the attacker keeps
/// rolling bonus damage while the d66 comes up at or above `cri`, so lower
/// thresholds are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub atk: u32,
    pub def: u32,
    pub agi: u32,
    pub cri: u32,
}

impl StatBlock {
    pub fn new(atk: u32, def: u32, agi: u32, cri: u32) -> Self {
        Self { atk, def, agi, cri }
    }
}

/// Stat block carried by an equipped item. Flat additive bonuses; a nonzero
/// `cri` replaces the wearer's threshold when it is an improvement.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GearStats {
    #[serde(default)]
    pub hp: u32,
    #[serde(default)]
    pub atk: u32,
    #[serde(default)]
    pub def: u32,
    #[serde(default)]
    pub agi: u32,
    #[serde(default)]
    pub cri: u32,
}

/// Which stat a multiplicative bonus applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatKind {
    Hp,
    Atk,
    Def,
    Agi,
}

/// A multiplicative modifier, e.g. a progression-level bonus of +10% atk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatBonus {
    pub stat: StatKind,
    pub percent: f64,
}

impl StatBonus {
    pub fn new(stat: StatKind, percent: f64) -> Self {
        Self { stat, percent }
    }
}

/// Declarative effect carried by an opponent template or actor record and
/// merged into the resolved fighter before combat starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InnateEffect {
    /// Permanent multiplicative stat bonus.
    StatUp { stat: StatKind, percent: f64 },
    /// Chance (out of 100) each strike to use a named skill instead of a
    /// normal attack. Skills always land and roll `power` extra damage dice.
    Skill {
        name: String,
        chance: u32,
        power: u32,
    },
}

/// A fully resolved combat profile. Ephemeral: built fresh per battle from
/// persistent actor + equipment records, never itself persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub stats: StatBlock,
    #[serde(default)]
    pub innate_effects: Vec<InnateEffect>,
}

impl Fighter {
    pub fn new(name: String, hp: u32, stats: StatBlock) -> Self {
        let hp = hp.max(1);
        Self {
            name,
            hp,
            max_hp: hp,
            stats: StatBlock {
                atk: stats.atk.max(1),
                def: stats.def,
                agi: stats.agi.max(1),
                cri: stats.cri.clamp(MIN_CRIT_THRESHOLD, MAX_CRIT_THRESHOLD),
            },
            innate_effects: Vec::new(),
        }
    }

    pub fn with_effects(mut self, effects: Vec<InnateEffect>) -> Self {
        self.innate_effects = effects;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// The skill this fighter may open a strike with, if any.
    pub fn skill(&self) -> Option<(&str, u32, u32)> {
        self.innate_effects.iter().find_map(|e| match e {
            InnateEffect::Skill {
                name,
                chance,
                power,
            } => Some((name.as_str(), *chance, *power)),
            _ => None,
        })
    }
}

/// Terminal battle outcome from the invoking side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

/// One entry in the append-only battle log. The serialized tag names are
/// read directly by dashboards and must stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BattleLogEntry {
    Round {
        number: u32,
    },
    Attack {
        attacker: String,
        defender: String,
        hit: bool,
        damage: u32,
        is_crit: bool,
        text: String,
    },
    SkillAttack {
        attacker: String,
        defender: String,
        skill: String,
        damage: u32,
        text: String,
    },
    End {
        outcome: Outcome,
        #[serde(skip_serializing_if = "Option::is_none")]
        winner: Option<String>,
    },
}

/// Result of one battle invocation: the full log plus terminal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleReport {
    pub log: Vec<BattleLogEntry>,
    pub outcome: Outcome,
    pub self_hp: u32,
    pub opponent_hp: u32,
}
