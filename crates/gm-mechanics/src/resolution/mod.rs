//! Grading dice pools into outcomes.
//!
//! Every check reads the single highest die of a d6 pool:
//! - two or more sixes: critical
//! - a six: full success
//! - 4 or 5: partial success (succeed at a cost)
//! - 1 to 3: bad outcome
//!
//! A pool reduced to zero (or fewer) dice rolls two and keeps the worst.

pub mod action;
pub mod resistance;

pub use action::{ActionOutcome, action_outcome, fortune_outcome};
pub use resistance::{ResistanceOutcome, resistance_outcome};

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Graded outcome of an action or fortune roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Two or more sixes.
    Critical,
    /// Best die is a six.
    Full,
    /// Best die is 4 or 5.
    Partial,
    /// Best die is 1 to 3.
    Bad,
}

impl Quality {
    /// Grade a kept die value and the number of sixes in the pool.
    pub fn grade(best: u32, sixes: usize) -> Self {
        HighestDie::default().grade(best, sixes)
    }

    /// Whether a target clock ticks on this outcome.
    pub fn advances_clock(self) -> bool {
        !matches!(self, Self::Bad)
    }

    /// Whether fallout should be suggested for this outcome.
    pub fn has_consequences(self) -> bool {
        matches!(self, Self::Partial | Self::Bad)
    }

    /// Consequence-table key: anything but `partial` reads as `bad`.
    pub fn consequence_key(self) -> &'static str {
        match self {
            Self::Partial => "partial",
            _ => "bad",
        }
    }

    /// Lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Full => "full",
            Self::Partial => "partial",
            Self::Bad => "bad",
        }
    }

    /// Parse a label case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "critical" | "crit" => Some(Self::Critical),
            "full" | "success" => Some(Self::Full),
            "partial" => Some(Self::Partial),
            "bad" | "failure" => Some(Self::Bad),
            _ => None,
        }
    }
}

impl std::str::FromStr for Quality {
    type Err = MechError;

    fn from_str(s: &str) -> MechResult<Self> {
        Self::parse(s).ok_or_else(|| MechError::UnknownQuality(s.to_string()))
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Highest-die thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HighestDie {
    /// Minimum kept value for a partial success.
    pub partial_min: u32,
    /// Minimum kept value for a full success.
    pub success_min: u32,
    /// Sixes needed for a critical.
    pub critical_sixes: usize,
}

impl Default for HighestDie {
    fn default() -> Self {
        Self {
            partial_min: 4,
            success_min: 6,
            critical_sixes: 2,
        }
    }
}

impl HighestDie {
    /// Grade a kept value.
    pub fn grade(&self, best: u32, sixes: usize) -> Quality {
        if sixes >= self.critical_sixes {
            Quality::Critical
        } else if best >= self.success_min {
            Quality::Full
        } else if best >= self.partial_min {
            Quality::Partial
        } else {
            Quality::Bad
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grading_table() {
        assert_eq!(Quality::grade(6, 2), Quality::Critical);
        assert_eq!(Quality::grade(6, 1), Quality::Full);
        assert_eq!(Quality::grade(5, 0), Quality::Partial);
        assert_eq!(Quality::grade(4, 0), Quality::Partial);
        assert_eq!(Quality::grade(3, 0), Quality::Bad);
        assert_eq!(Quality::grade(1, 0), Quality::Bad);
    }

    #[test]
    fn consequence_key_normalizes() {
        assert_eq!(Quality::Partial.consequence_key(), "partial");
        assert_eq!(Quality::Bad.consequence_key(), "bad");
        assert_eq!(Quality::Full.consequence_key(), "bad");
        assert_eq!(Quality::Critical.consequence_key(), "bad");
    }

    #[test]
    fn clock_and_consequence_flags() {
        assert!(Quality::Critical.advances_clock());
        assert!(Quality::Partial.advances_clock());
        assert!(!Quality::Bad.advances_clock());
        assert!(Quality::Partial.has_consequences());
        assert!(Quality::Bad.has_consequences());
        assert!(!Quality::Full.has_consequences());
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Quality::Critical).unwrap(),
            "\"critical\""
        );
        let q: Quality = serde_json::from_str("\"partial\"").unwrap();
        assert_eq!(q, Quality::Partial);
    }

    #[test]
    fn parse_labels() {
        assert_eq!(Quality::parse("Full"), Some(Quality::Full));
        assert!("nope".parse::<Quality>().is_err());
    }
}
