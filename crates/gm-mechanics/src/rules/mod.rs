//! Rule triggers and consequence tables.
//!
//! Both are data, not code: a campaign stores an ordered trigger list and a
//! consequence table, and the functions here only read them. Shipped
//! defaults live in [`preset`].

pub mod preset;

use std::collections::BTreeMap;

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::position::{Effect, Position};
use crate::resolution::Quality;

/// A free-text pattern that implies a position and effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Case-insensitive regular expression.
    pub pattern: String,
    /// Position implied by a match.
    pub position: Position,
    /// Effect implied by a match.
    pub effect: Effect,
}

impl Trigger {
    /// Build a trigger.
    pub fn new(pattern: impl Into<String>, position: Position, effect: Effect) -> Self {
        Self {
            pattern: pattern.into(),
            position,
            effect,
        }
    }
}

/// Position and effect inferred from free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inference {
    /// Inferred position.
    pub position: Position,
    /// Inferred effect.
    pub effect: Effect,
    /// The pattern that matched.
    pub pattern: String,
}

/// Return the first trigger whose pattern matches `text`.
///
/// Matching is case-insensitive against the lower-cased text. Empty or
/// malformed patterns never match.
pub fn infer_position_effect(text: &str, triggers: &[Trigger]) -> Option<Inference> {
    let lowered = text.to_lowercase();
    triggers.iter().find_map(|trigger| {
        if trigger.pattern.is_empty() {
            return None;
        }
        let re = match RegexBuilder::new(&trigger.pattern)
            .case_insensitive(true)
            .build()
        {
            Ok(re) => re,
            Err(e) => {
                tracing::warn!(pattern = %trigger.pattern, error = %e, "skipping malformed trigger pattern");
                return None;
            }
        };
        re.is_match(&lowered).then(|| Inference {
            position: trigger.position,
            effect: trigger.effect,
            pattern: trigger.pattern.clone(),
        })
    })
}

/// Suggested fallout lines for one position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsequenceLines {
    /// Lines for a partial success.
    #[serde(default)]
    pub partial: Vec<String>,
    /// Lines for a bad outcome.
    #[serde(default)]
    pub bad: Vec<String>,
}

impl ConsequenceLines {
    /// Lines for a quality; anything but partial reads the `bad` list.
    pub fn for_quality(&self, quality: Quality) -> &[String] {
        match quality {
            Quality::Partial => &self.partial,
            _ => &self.bad,
        }
    }

    /// Replace the lines for a quality.
    pub fn set_for(&mut self, quality: Quality, lines: Vec<String>) {
        match quality {
            Quality::Partial => self.partial = lines,
            _ => self.bad = lines,
        }
    }
}

/// Consequence lines keyed by position label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsequenceTable {
    /// Entries keyed by position label (e.g. "Risky").
    pub entries: BTreeMap<String, ConsequenceLines>,
}

impl ConsequenceTable {
    /// Position consulted when the requested one has no entry.
    pub const FALLBACK: &'static str = "Risky";

    /// Lines for a position label, if present.
    pub fn get(&self, position: &str) -> Option<&ConsequenceLines> {
        self.entries.get(position)
    }

    /// Replace the lines for a position and quality, creating the entry.
    pub fn set(&mut self, position: impl Into<String>, quality: Quality, lines: Vec<String>) {
        self.entries
            .entry(position.into())
            .or_default()
            .set_for(quality, lines);
    }
}

/// Suggest fallout for a roll at `position` with `quality`.
///
/// An unknown position falls back to the `Risky` entry; if that is also
/// missing the result is empty. Never fails.
pub fn suggest_consequences(
    position: &str,
    quality: Quality,
    table: &ConsequenceTable,
) -> Vec<String> {
    table
        .get(position)
        .or_else(|| table.get(ConsequenceTable::FALLBACK))
        .map(|lines| lines.for_quality(quality).to_vec())
        .unwrap_or_default()
}
