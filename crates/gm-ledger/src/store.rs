//! Persistence backends.
//!
//! A store sees the whole logical root (`currentCampaign` plus every
//! campaign by name) but is only ever written one campaign at a time, from
//! inside that campaign's transaction.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::LedgerResult;
use crate::model::Campaign;

/// The persisted layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LedgerRoot {
    /// Name of the active campaign.
    pub current_campaign: String,
    /// Every campaign by name.
    pub campaigns: BTreeMap<String, Campaign>,
}

/// A persistence backend.
pub trait Store: Send + Sync {
    /// Read everything persisted so far.
    fn load(&self) -> LedgerResult<LedgerRoot>;

    /// Persist one campaign.
    fn save_campaign(&self, name: &str, campaign: &Campaign) -> LedgerResult<()>;

    /// Persist the active campaign name.
    fn save_current(&self, name: &str) -> LedgerResult<()>;

    /// Write out anything buffered.
    fn flush(&self) -> LedgerResult<()> {
        Ok(())
    }
}

fn lock(root: &Mutex<LedgerRoot>) -> MutexGuard<'_, LedgerRoot> {
    root.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Keeps state in memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    root: Mutex<LedgerRoot>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load(&self) -> LedgerResult<LedgerRoot> {
        Ok(lock(&self.root).clone())
    }

    fn save_campaign(&self, name: &str, campaign: &Campaign) -> LedgerResult<()> {
        lock(&self.root)
            .campaigns
            .insert(name.to_string(), campaign.clone());
        Ok(())
    }

    fn save_current(&self, name: &str) -> LedgerResult<()> {
        lock(&self.root).current_campaign = name.to_string();
        Ok(())
    }
}

/// Keeps the root in a single pretty-printed JSON file.
///
/// Every save rewrites the file through a temporary sibling and a rename,
/// so a crash leaves either the old or the new state on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    mirror: Mutex<LedgerRoot>,
}

impl JsonFileStore {
    /// Open (or prepare to create) a state file.
    pub fn open(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let path = path.into();
        let root = if path.exists() {
            let text = fs::read_to_string(&path)?;
            serde_json::from_str(&text)?
        } else {
            LedgerRoot::default()
        };
        Ok(Self {
            path,
            mirror: Mutex::new(root),
        })
    }

    /// Path of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, root: &LedgerRoot) -> LedgerResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(root)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> LedgerResult<LedgerRoot> {
        Ok(lock(&self.mirror).clone())
    }

    fn save_campaign(&self, name: &str, campaign: &Campaign) -> LedgerResult<()> {
        let mut root = lock(&self.mirror);
        let previous = root.campaigns.insert(name.to_string(), campaign.clone());
        if let Err(e) = self.write(&root) {
            match previous {
                Some(prev) => root.campaigns.insert(name.to_string(), prev),
                None => root.campaigns.remove(name),
            };
            return Err(e);
        }
        Ok(())
    }

    fn save_current(&self, name: &str) -> LedgerResult<()> {
        let mut root = lock(&self.mirror);
        let previous = std::mem::replace(&mut root.current_campaign, name.to_string());
        if let Err(e) = self.write(&root) {
            root.current_campaign = previous;
            return Err(e);
        }
        Ok(())
    }

    fn flush(&self) -> LedgerResult<()> {
        self.write(&lock(&self.mirror))
    }
}
