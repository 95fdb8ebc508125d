//! Configuration for opening a ledger.

use std::path::PathBuf;

/// Where and how a [`crate::Ledger`] keeps its state.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// JSON state file; `None` keeps everything in memory.
    pub path: Option<PathBuf>,
    /// Campaign created when the store is empty.
    pub default_campaign: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: None,
            default_campaign: "default".to_string(),
        }
    }
}

impl LedgerConfig {
    /// Persist to a JSON file.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the name of the campaign created in an empty store.
    pub fn with_default_campaign(mut self, name: impl Into<String>) -> Self {
        self.default_campaign = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = LedgerConfig::default();
        assert!(cfg.path.is_none());
        assert_eq!(cfg.default_campaign, "default");
    }

    #[test]
    fn builder_methods() {
        let cfg = LedgerConfig::default()
            .with_path("state.json")
            .with_default_campaign("Doskvol");
        assert_eq!(cfg.path.unwrap().to_str(), Some("state.json"));
        assert_eq!(cfg.default_campaign, "Doskvol");
    }
}
