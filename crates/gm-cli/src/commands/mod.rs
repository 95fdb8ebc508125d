pub mod campaign;
pub mod clock;
pub mod crew;
pub mod faction;
pub mod journal;
pub mod meta;
pub mod player;
pub mod resolve;
pub mod roll;
pub mod rules;
pub mod scene;
pub mod show;
pub mod step;

use std::path::Path;
use std::sync::Arc;

use gm_ledger::{CampaignHandle, Ledger, LedgerConfig, LedgerOp};
use gm_session::{Resolver, SessionConfig};
use serde::Serialize;
use tracing::debug;

/// State shared by every command: the opened ledger and the dice seed.
pub struct Context {
    ledger: Arc<Ledger>,
    seed: Option<u64>,
}

impl Context {
    /// Open the ledger backed by the state file at `state`.
    pub fn open(state: &Path, seed: Option<u64>) -> Result<Self, String> {
        let config = LedgerConfig::default().with_path(state);
        let ledger = Ledger::open(&config)
            .map_err(|e| format!("failed to open {}: {e}", state.display()))?;
        debug!(state = %state.display(), campaign = %ledger.current_name(), "state opened");
        Ok(Self {
            ledger: Arc::new(ledger),
            seed,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn active(&self) -> Result<CampaignHandle, String> {
        self.ledger.active().map_err(|e| e.to_string())
    }

    /// A resolver over this ledger, seeded if `--seed` was given.
    pub fn resolver(&self) -> Resolver {
        let mut config = SessionConfig::default();
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Resolver::new(Arc::clone(&self.ledger), config)
    }

    /// Apply one operation to the active campaign and print the result.
    pub fn apply(&self, op: LedgerOp) -> Result<(), String> {
        let campaign = self.active()?.apply(&op).map_err(|e| e.to_string())?;
        print_json(&campaign)
    }

    pub fn close(&self) -> Result<(), String> {
        self.ledger.close().map_err(|e| e.to_string())
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}
