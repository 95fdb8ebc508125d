use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::advance_rollover;

/// The campaign's crew sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Crew {
    /// Crew name.
    pub name: String,
    /// Crew playbook.
    pub playbook: String,
    /// Tier.
    pub tier: i32,
    /// Hold (e.g. weak, strong).
    pub hold: String,
    /// Upgrades with arbitrary values.
    pub upgrades: BTreeMap<String, serde_json::Value>,
    /// Banked experience.
    pub xp: i32,
    /// Earned advances.
    pub advances: i32,
}

impl Default for Crew {
    fn default() -> Self {
        Self {
            name: "Shadows".to_string(),
            playbook: "Shadows".to_string(),
            tier: 0,
            hold: "weak".to_string(),
            upgrades: BTreeMap::new(),
            xp: 0,
            advances: 0,
        }
    }
}

/// Field-level crew update; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrewPatch {
    /// New name.
    pub name: Option<String>,
    /// New playbook.
    pub playbook: Option<String>,
    /// New tier.
    pub tier: Option<i32>,
    /// New hold.
    pub hold: Option<String>,
    /// Replacement upgrades map.
    pub upgrades: Option<BTreeMap<String, serde_json::Value>>,
}

impl Crew {
    /// Apply every field present in the patch.
    pub fn apply(&mut self, patch: &CrewPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(playbook) = &patch.playbook {
            self.playbook = playbook.clone();
        }
        if let Some(tier) = patch.tier {
            self.tier = tier;
        }
        if let Some(hold) = &patch.hold {
            self.hold = hold.clone();
        }
        if let Some(upgrades) = &patch.upgrades {
            self.upgrades = upgrades.clone();
        }
    }

    /// Bank XP and roll it over into advances at `threshold`.
    pub fn add_xp(&mut self, n: i32, threshold: i32) {
        self.xp = self.xp.saturating_add(n);
        advance_rollover(&mut self.xp, &mut self.advances, threshold);
    }
}
