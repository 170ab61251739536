//! Outcome post-processing.
//!
//! Maps a terminal battle or duel result onto reward and loss effects, all
//! committed through guarded updates. Pure branching: every roll already
//! happened inside the turn loop. A failed guard here means a concurrent
//! settlement got there first and is reported as an effect, not an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::combat::duel::{DuelMode, DuelReport};
use crate::combat::types::{BattleReport, Outcome};
use crate::constants::{
    COL_PER_DAMAGE, DEFEAT_PENALTY_DIVISOR, DUEL_WIN_EXP, EXP_PER_OPPONENT_HP,
    FACTION_BOUNTY_DIVISOR,
};
use crate::faction::logic::{claim_loot_col, deposit_loot, mark_member_dead, KillOutcome};
use crate::faction::types::FactionRoster;
use crate::market::Listing;
use crate::progression::{grant_exp, Progress};
use crate::raid::BossState;
use crate::store::{ContestedStore, MemoryCollection, StoreError, UpdateOutcome};
use crate::wallet::{credit, try_debit, Wallet};

/// Persistent record of a hired companion. The death flag is a one-shot
/// transition, same as a faction member's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionRecord {
    pub id: String,
    pub name: String,
    pub alive: bool,
    #[serde(default)]
    pub hired_by: Option<String>,
}

/// One collection per shared aggregate the settlement paths touch.
/// Callers hold this (usually behind an `Arc`) for the process lifetime.
#[derive(Debug)]
pub struct WorldStores {
    pub wallets: MemoryCollection<Wallet>,
    pub progress: MemoryCollection<Progress>,
    pub companions: MemoryCollection<CompanionRecord>,
    pub factions: MemoryCollection<FactionRoster>,
    pub bosses: MemoryCollection<BossState>,
    pub listings: MemoryCollection<Listing>,
}

impl WorldStores {
    pub fn new() -> Self {
        Self {
            wallets: MemoryCollection::new("wallets"),
            progress: MemoryCollection::new("progress"),
            companions: MemoryCollection::new("companions"),
            factions: MemoryCollection::new("factions"),
            bosses: MemoryCollection::new("bosses"),
            listings: MemoryCollection::new("listings"),
        }
    }
}

impl Default for WorldStores {
    fn default() -> Self {
        Self::new()
    }
}

/// Effects produced by settling one battle. The caller broadcasts these and
/// appends them to the durable action log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RewardEffect {
    ColGained { player: String, amount: u64 },
    ColLost { player: String, amount: u64 },
    ExpGained { player: String, amount: u64, levels_gained: u32 },
    CompanionDied { companion_id: String },
    FactionMemberFelled { member_id: String, disbanded: bool },
    /// A concurrent settlement already resolved this kill; no bounty here.
    KillAlreadyClaimed { member_id: String },
    LootClaimed { player: String, col: u64 },
    LootBanked { col: u64 },
    WagerTransferred { from: String, to: String, amount: u64 },
    /// The loser could not cover the loss; hand off to the external
    /// bankruptcy procedure.
    Bankruptcy { player: String },
    /// Total-loss duel lost; hand off to the external deletion procedure.
    CharacterLost { player: String },
}

/// One-shot alive -> dead transition for a companion.
pub fn mark_companion_dead<S: ContestedStore<CompanionRecord>>(
    store: &S,
    companion_id: &str,
) -> Result<UpdateOutcome<CompanionRecord>, StoreError> {
    store.update_if(companion_id, |c| c.alive, |c| c.alive = false)
}

/// Faction context for a battle that was provisioned from the roster.
#[derive(Debug, Clone, Copy)]
pub struct FactionFight<'a> {
    pub faction_key: &'a str,
    /// Set when the opponent was a named elite; grunts have no roster entry
    /// (the caller consumed one via `take_grunt` when provisioning).
    pub member_id: Option<&'a str>,
}

/// Settles a PvE battle result into guarded reward/loss mutations.
pub fn settle_pve(
    stores: &WorldStores,
    player: &str,
    companion_id: Option<&str>,
    faction: Option<FactionFight<'_>>,
    report: &BattleReport,
    opponent_max_hp: u64,
    now: DateTime<Utc>,
) -> Result<Vec<RewardEffect>, StoreError> {
    let mut effects = Vec::new();

    match report.outcome {
        Outcome::Win => {
            let col = opponent_max_hp * COL_PER_DAMAGE;
            credit(&stores.wallets, player, col)?;
            effects.push(RewardEffect::ColGained {
                player: player.to_string(),
                amount: col,
            });

            let exp = opponent_max_hp * EXP_PER_OPPONENT_HP;
            let grant = grant_exp(&stores.progress, player, exp)?;
            effects.push(RewardEffect::ExpGained {
                player: player.to_string(),
                amount: exp,
                levels_gained: grant.levels_applied,
            });

            if let Some(fight) = faction {
                if let Some(member_id) = fight.member_id {
                    match mark_member_dead(&stores.factions, fight.faction_key, member_id, player, now)? {
                        KillOutcome::MemberKilled { disbanded, .. } => {
                            effects.push(RewardEffect::FactionMemberFelled {
                                member_id: member_id.to_string(),
                                disbanded,
                            });
                            // Elite kills pay a bounty out of the stash when
                            // it can cover one.
                            let bounty = col / FACTION_BOUNTY_DIVISOR;
                            if bounty > 0
                                && claim_loot_col(&stores.factions, fight.faction_key, bounty)?
                                    .is_applied()
                            {
                                credit(&stores.wallets, player, bounty)?;
                                effects.push(RewardEffect::LootClaimed {
                                    player: player.to_string(),
                                    col: bounty,
                                });
                            }
                        }
                        KillOutcome::AlreadyDead => {
                            effects.push(RewardEffect::KillAlreadyClaimed {
                                member_id: member_id.to_string(),
                            });
                        }
                    }
                }
            }
        }
        Outcome::Lose => {
            if let Some(companion_id) = companion_id {
                if mark_companion_dead(&stores.companions, companion_id)?.is_applied() {
                    effects.push(RewardEffect::CompanionDied {
                        companion_id: companion_id.to_string(),
                    });
                }
            }

            let penalty = opponent_max_hp * COL_PER_DAMAGE / DEFEAT_PENALTY_DIVISOR;
            if penalty == 0 {
                return Ok(effects);
            }
            if try_debit(&stores.wallets, player, penalty)?.is_applied() {
                effects.push(RewardEffect::ColLost {
                    player: player.to_string(),
                    amount: penalty,
                });
                // A faction victory feeds its war chest.
                if let Some(fight) = faction {
                    if deposit_loot(&stores.factions, fight.faction_key, penalty, &[], &[])?
                        .is_applied()
                    {
                        effects.push(RewardEffect::LootBanked { col: penalty });
                    }
                }
            } else {
                effects.push(RewardEffect::Bankruptcy {
                    player: player.to_string(),
                });
            }
        }
        Outcome::Draw => {}
    }

    Ok(effects)
}

/// Settles a duel: wager transfer, winner experience and the total-loss
/// handoff.
pub fn settle_duel(
    stores: &WorldStores,
    duel: &DuelReport,
) -> Result<Vec<RewardEffect>, StoreError> {
    let mut effects = Vec::new();

    if duel.wager > 0 {
        if try_debit(&stores.wallets, &duel.loser, duel.wager)?.is_applied() {
            credit(&stores.wallets, &duel.winner, duel.wager)?;
            effects.push(RewardEffect::WagerTransferred {
                from: duel.loser.clone(),
                to: duel.winner.clone(),
                amount: duel.wager,
            });
        } else {
            effects.push(RewardEffect::Bankruptcy {
                player: duel.loser.clone(),
            });
        }
    }

    let grant = grant_exp(&stores.progress, &duel.winner, DUEL_WIN_EXP)?;
    effects.push(RewardEffect::ExpGained {
        player: duel.winner.clone(),
        amount: DUEL_WIN_EXP,
        levels_gained: grant.levels_applied,
    });

    if duel.mode == DuelMode::TotalLoss {
        effects.push(RewardEffect::CharacterLost {
            player: duel.loser.clone(),
        });
    }

    Ok(effects)
}
