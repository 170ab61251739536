//! Balance constants shared across combat, opponents and progression.

/// Maximum number of rounds before a battle is called.
pub const ROUND_CAP: u32 = 5;

/// A d66 reading of exactly this value is an automatic hit.
pub const GREAT_SUCCESS: u32 = 12;

/// Minimum damage any landed hit deals.
pub const MIN_HIT_DAMAGE: u32 = 1;

/// Crit thresholds are clamped to this range. Below 3 every d66 roll would
/// crit and the crit chain would never terminate; 13 disables crits.
pub const MIN_CRIT_THRESHOLD: u32 = 3;
pub const MAX_CRIT_THRESHOLD: u32 = 13;

/// A duel strike dealing at least this share of the target's max HP ends a
/// first-strike duel on the spot.
pub const FIRST_STRIKE_PERCENT: u32 = 10;

/// HP share at or below which a half-loss duel ends.
pub const HALF_LOSS_PERCENT: u32 = 50;

// =============================================================================
// Opponent provisioning
// =============================================================================

/// Chance (out of 100) of drawing the rare wild tier.
pub const RARE_TIER_PERCENT: u32 = 5;

/// Stat multipliers used to synthesize the rare tier from the strongest
/// common tier available at the player's depth.
pub const RARE_TIER_HP_MULT: f64 = 1.6;
pub const RARE_TIER_STAT_MULT: f64 = 1.5;

/// Per-depth scale applied to wild enemy templates.
pub const WILD_DEPTH_STEP: f64 = 0.05;

/// Grunt stats scale linearly with depth: 1 + (depth - 10) * 0.1.
pub const GRUNT_SCALE_PIVOT: u32 = 10;
pub const GRUNT_SCALE_STEP: f64 = 0.1;

/// Grunts never scale below half their template stats.
pub const GRUNT_SCALE_FLOOR: f64 = 0.5;

// =============================================================================
// Progression
// =============================================================================

/// XP curve: required = XP_CURVE_BASE * level ^ XP_CURVE_EXPONENT.
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;

/// Interference retries allowed when settling level-ups under concurrent
/// grants. Far above anything realistic; the loop normally ends because the
/// remaining exp no longer covers a level.
pub const LEVEL_SETTLE_RETRY_LIMIT: u32 = 32;

// =============================================================================
// Rewards
// =============================================================================

/// Col granted per point of damage dealt to a defeated PvE opponent.
pub const COL_PER_DAMAGE: u64 = 2;

/// Exp granted for a PvE win, per opponent max HP point.
pub const EXP_PER_OPPONENT_HP: u64 = 3;

/// A PvE defeat costs this fraction of the win payout for the same
/// opponent.
pub const DEFEAT_PENALTY_DIVISOR: u64 = 2;

/// Felling a named faction elite pays this fraction of the win payout as a
/// bounty out of the faction stash, stash balance permitting.
pub const FACTION_BOUNTY_DIVISOR: u64 = 2;

/// Flat exp grant for winning a duel, regardless of wager.
pub const DUEL_WIN_EXP: u64 = 150;
