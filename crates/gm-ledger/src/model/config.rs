use std::collections::BTreeMap;

use gm_mechanics::rules::preset::{self, DEFAULT_TRIGGER_PRESET};
use gm_mechanics::{ConsequenceTable, Trigger};
use serde::{Deserialize, Serialize};

/// Per-campaign game configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Automatic side effects and advance thresholds.
    pub house_rules: HouseRules,
    /// Trigger table, consequence table, and scene presets.
    pub rules: Rules,
}

/// Automatic side effects applied by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HouseRules {
    /// Adjust rep and heat from action roll quality.
    pub auto_rep_heat: bool,
    /// Grant player XP on desperate rolls.
    pub auto_xp_desperate: bool,
    /// Player XP per advance.
    pub advance_threshold_player: i32,
    /// Crew XP per advance.
    pub advance_threshold_crew: i32,
}

impl Default for HouseRules {
    fn default() -> Self {
        Self {
            auto_rep_heat: true,
            auto_xp_desperate: true,
            advance_threshold_player: 8,
            advance_threshold_crew: 8,
        }
    }
}

/// Data-driven rule tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rules {
    /// Ordered trigger list; first match wins.
    pub triggers: Vec<Trigger>,
    /// Name of the preset the triggers were loaded from.
    pub active_preset: String,
    /// Consequence lines by position and quality.
    pub consequences: ConsequenceTable,
    /// Named snapshots of suggestion lists.
    pub consequence_presets: BTreeMap<String, Vec<String>>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            triggers: preset::general(),
            active_preset: DEFAULT_TRIGGER_PRESET.to_string(),
            consequences: preset::default_consequences(),
            consequence_presets: BTreeMap::new(),
        }
    }
}
