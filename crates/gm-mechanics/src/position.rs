//! Narrative position and effect tiers.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Narrative risk tier for a roll, from least to most dangerous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    /// The character acts on their own terms.
    Controlled,
    /// The default: things can go wrong.
    Risky,
    /// Serious trouble; failure hurts.
    Desperate,
}

impl Position {
    /// All positions in ascending danger.
    pub const ALL: [Position; 3] = [Self::Controlled, Self::Risky, Self::Desperate];

    /// Canonical label, also used as the consequence-table key.
    pub fn label(self) -> &'static str {
        match self {
            Self::Controlled => "Controlled",
            Self::Risky => "Risky",
            Self::Desperate => "Desperate",
        }
    }

    /// Parse a label case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "controlled" => Some(Self::Controlled),
            "risky" => Some(Self::Risky),
            "desperate" => Some(Self::Desperate),
            _ => None,
        }
    }

    /// Starting position of a scene from an engagement roll's best die.
    pub fn from_engagement(best: u32) -> Self {
        match best {
            0..=3 => Self::Desperate,
            4 | 5 => Self::Risky,
            _ => Self::Controlled,
        }
    }
}

impl std::str::FromStr for Position {
    type Err = MechError;

    fn from_str(s: &str) -> MechResult<Self> {
        Self::parse(s).ok_or_else(|| MechError::UnknownPosition(s.to_string()))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Narrative impact tier of a successful action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Effect {
    /// Reduced impact.
    Low,
    /// Normal impact.
    #[default]
    Standard,
    /// Increased impact.
    High,
}

impl Effect {
    /// Clock segments ticked by this effect on a successful roll.
    pub fn segments(self) -> u32 {
        match self {
            Self::Low => 1,
            Self::Standard => 2,
            Self::High => 3,
        }
    }

    /// Canonical label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Standard => "Standard",
            Self::High => "High",
        }
    }

    /// Parse a label case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "limited" => Some(Self::Low),
            "standard" | "normal" => Some(Self::Standard),
            "high" | "great" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::str::FromStr for Effect {
    type Err = MechError;

    fn from_str(s: &str) -> MechResult<Self> {
        Self::parse(s).ok_or_else(|| MechError::UnknownEffect(s.to_string()))
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Clock segments for an effect; an unknown effect counts as Standard.
pub fn effect_to_segments(effect: Option<Effect>) -> u32 {
    effect.unwrap_or_default().segments()
}
