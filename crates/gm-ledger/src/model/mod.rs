//! Campaign data model.
//!
//! Plain serializable data plus the in-memory mutations the ledger runs
//! inside a transaction. Nothing here locks or persists.

mod campaign;
mod config;
mod crew;
mod faction;
mod last_roll;
mod player;

pub use campaign::{Campaign, Counter, MetaValues, Scope};
pub use config::{Config, HouseRules, Rules};
pub use crew::{Crew, CrewPatch};
pub use faction::Faction;
pub use last_roll::{LastRoll, Modifiers, RollKind, TargetClock};
pub use player::{ACTIONS, Harm, MAX_STRESS, Player};

/// Convert banked XP into advances in one division.
///
/// Does nothing when `threshold` is not positive or `xp` is below it.
pub(crate) fn advance_rollover(xp: &mut i32, advances: &mut i32, threshold: i32) {
    if threshold > 0 && *xp >= threshold {
        *advances += *xp / threshold;
        *xp %= threshold;
    }
}
