use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::advance_rollover;

/// The twelve action ratings every player sheet carries.
pub const ACTIONS: [&str; 12] = [
    "Hunt", "Study", "Survey", "Tinker", "Finesse", "Prowl", "Skirmish", "Wreck", "Command",
    "Consort", "Sway", "Attune",
];

/// Stress ceiling; anything above converts into pending trauma.
pub const MAX_STRESS: i32 = 9;

fn generic_kind() -> String {
    "generic".to_string()
}

/// An injury record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Harm {
    /// Severity, 1 to 3.
    pub level: u8,
    /// Free text, e.g. "Broken arm".
    pub label: String,
    /// Free-form category.
    #[serde(default = "generic_kind")]
    pub kind: String,
}

impl Harm {
    /// Build a harm; a missing kind becomes `generic`.
    pub fn new(level: u8, label: impl Into<String>, kind: Option<String>) -> Self {
        Self {
            level,
            label: label.into(),
            kind: kind.unwrap_or_else(generic_kind),
        }
    }
}

/// A player character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Player {
    /// Action ratings by action name.
    pub actions: BTreeMap<String, i32>,
    /// Current stress, `0..=9`.
    pub stress: i32,
    /// Acquired traumas, in order, without duplicates.
    pub trauma: Vec<String>,
    /// Stress overflows not yet turned into a named trauma.
    pub pending_trauma: u32,
    /// Active injuries; removal is by position.
    pub harms: Vec<Harm>,
    /// Banked experience.
    pub xp: i32,
    /// Earned advances.
    pub advances: i32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            actions: ACTIONS.iter().map(|a| (a.to_string(), 0)).collect(),
            stress: 0,
            trauma: Vec::new(),
            pending_trauma: 0,
            harms: Vec::new(),
            xp: 0,
            advances: 0,
        }
    }
}

impl Player {
    /// Rating for an action, if the sheet has it.
    pub fn rating(&self, action: &str) -> Option<i32> {
        self.actions.get(action).copied()
    }

    /// Set stress. Values above 9 become one pending trauma and reset
    /// stress to 0; everything else is clamped to `0..=9`.
    pub fn set_stress(&mut self, value: i32) {
        if value > MAX_STRESS {
            self.pending_trauma += 1;
            self.stress = 0;
        } else {
            self.stress = value.clamp(0, MAX_STRESS);
        }
    }

    /// Add stress on top of the current value, through [`Self::set_stress`].
    pub fn add_stress(&mut self, delta: i32) {
        self.set_stress(self.stress.saturating_add(delta));
    }

    /// Add a trauma unless it is empty or already present. Returns true if added.
    pub fn add_trauma(&mut self, label: &str) -> bool {
        if label.is_empty() || self.trauma.iter().any(|t| t == label) {
            return false;
        }
        self.trauma.push(label.to_string());
        true
    }

    /// Spend one pending trauma, naming it if a label is given.
    ///
    /// Does nothing (the label is not added) when none is pending.
    pub fn consume_pending_trauma(&mut self, label: Option<&str>) {
        if self.pending_trauma == 0 {
            return;
        }
        self.pending_trauma -= 1;
        if let Some(label) = label {
            self.add_trauma(label);
        }
    }

    /// Remove the harm at `index`; out of range is a no-op.
    pub fn clear_harm(&mut self, index: usize) -> Option<Harm> {
        (index < self.harms.len()).then(|| self.harms.remove(index))
    }

    /// Dice-pool penalty from the worst harm: level 3 costs two dice,
    /// level 2 one, level 1 none. Lower harms do not stack.
    pub fn harm_penalty(&self) -> i32 {
        match self.harms.iter().map(|h| h.level).max().unwrap_or(0) {
            3.. => 2,
            2 => 1,
            _ => 0,
        }
    }

    /// Bank XP and roll it over into advances at `threshold`.
    pub fn add_xp(&mut self, n: i32, threshold: i32) {
        self.xp = self.xp.saturating_add(n);
        advance_rollover(&mut self.xp, &mut self.advances, threshold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_harms(levels: &[u8]) -> Player {
        let mut p = Player::default();
        for &level in levels {
            p.harms.push(Harm::new(level, "wound", None));
        }
        p
    }

    #[test]
    fn fresh_sheet_has_all_actions() {
        let p = Player::default();
        assert_eq!(p.actions.len(), 12);
        assert_eq!(p.rating("Prowl"), Some(0));
        assert_eq!(p.rating("Juggle"), None);
    }

    #[test]
    fn stress_overflow_becomes_pending_trauma() {
        let mut p = Player::default();
        p.set_stress(10);
        assert_eq!(p.stress, 0);
        assert_eq!(p.pending_trauma, 1);
    }

    #[test]
    fn stress_clamps_low_and_at_nine() {
        let mut p = Player::default();
        p.set_stress(-4);
        assert_eq!(p.stress, 0);
        p.set_stress(9);
        assert_eq!(p.stress, 9);
        assert_eq!(p.pending_trauma, 0);
    }

    #[test]
    fn add_stress_overflows() {
        let mut p = Player::default();
        p.set_stress(8);
        p.add_stress(3);
        assert_eq!(p.stress, 0);
        assert_eq!(p.pending_trauma, 1);
    }

    #[test]
    fn trauma_is_a_set() {
        let mut p = Player::default();
        assert!(p.add_trauma("Cold"));
        assert!(!p.add_trauma("Cold"));
        assert!(!p.add_trauma(""));
        assert!(p.add_trauma("Haunted"));
        assert_eq!(p.trauma, vec!["Cold", "Haunted"]);
    }

    #[test]
    fn consume_pending_trauma() {
        let mut p = Player::default();
        p.consume_pending_trauma(Some("Reckless"));
        assert!(p.trauma.is_empty());

        p.pending_trauma = 2;
        p.consume_pending_trauma(Some("Reckless"));
        assert_eq!(p.pending_trauma, 1);
        assert_eq!(p.trauma, vec!["Reckless"]);

        p.consume_pending_trauma(None);
        assert_eq!(p.pending_trauma, 0);
        assert_eq!(p.trauma.len(), 1);
    }

    #[test]
    fn harm_penalty_uses_worst_harm() {
        assert_eq!(with_harms(&[1, 3]).harm_penalty(), 2);
        assert_eq!(with_harms(&[1, 2]).harm_penalty(), 1);
        assert_eq!(with_harms(&[1]).harm_penalty(), 0);
        assert_eq!(with_harms(&[]).harm_penalty(), 0);
        assert_eq!(with_harms(&[2, 2, 2]).harm_penalty(), 1);
    }

    #[test]
    fn clear_harm_by_index() {
        let mut p = with_harms(&[1, 2, 3]);
        assert_eq!(p.clear_harm(1).map(|h| h.level), Some(2));
        assert_eq!(p.harms.len(), 2);
        assert!(p.clear_harm(5).is_none());
        assert_eq!(p.harms.len(), 2);
    }

    #[test]
    fn large_xp_grant_rolls_over_once() {
        let mut p = Player::default();
        p.add_xp(27, 8);
        assert_eq!(p.advances, 3);
        assert_eq!(p.xp, 3);
    }

    #[test]
    fn harm_kind_defaults_on_deserialize() {
        let h: Harm = serde_json::from_str(r#"{"level":2,"label":"Gashed"}"#).unwrap();
        assert_eq!(h.kind, "generic");
    }
}
