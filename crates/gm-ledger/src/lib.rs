//! The campaign ledger: authoritative, mutable game state.
//!
//! A [`Ledger`] holds any number of named campaigns, exactly one of which
//! is active. Every mutation runs as a transaction against a single
//! campaign: the campaign's lock is held for the whole read-modify-write
//! cycle, the change is applied to a draft, persisted through a [`Store`],
//! and only then made visible. Different campaigns never share a lock.

/// Persistence backend selection.
pub mod config;
/// Error types used throughout the crate.
pub mod error;
/// The ledger, campaign handles, and transactions.
pub mod ledger;
/// Campaign data model.
pub mod model;
/// Typed direct operations on a campaign.
pub mod ops;
/// Persistence backends.
pub mod store;

/// Re-export configuration.
pub use config::LedgerConfig;
/// Re-export error types.
pub use error::{ErrorKind, LedgerError, LedgerResult};
/// Re-export ledger types.
pub use ledger::{CampaignHandle, CampaignSnapshot, Ledger};
/// Re-export model types.
pub use model::{
    ACTIONS, Campaign, Config, Counter, Crew, CrewPatch, Faction, Harm, HouseRules, LastRoll,
    MetaValues, Modifiers, Player, RollKind, Rules, Scope, TargetClock,
};
/// Re-export operations.
pub use ops::LedgerOp;
/// Re-export stores.
pub use store::{JsonFileStore, LedgerRoot, MemoryStore, Store};
