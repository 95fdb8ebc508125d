//! Applying a suggested consequence line to the ledger.
//!
//! Suggestion lines are free text ("Severe wound (harm 3)", "Heat +2",
//! "Threat clock +1", "Fill hostile clock:2"). A handful of patterns
//! recognise what a line asks for; anything else is left to the GM.

use std::sync::LazyLock;

use gm_ledger::{Campaign, CampaignHandle, Counter, LedgerResult, Scope};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Clock ticked when a line names no clock and only a capacity is given.
pub const SCENE_CLOCK: &str = "Scene consequence";

/// Prefix of clocks created for complications.
pub const COMPLICATION_PREFIX: &str = "Complication: ";

/// Capacity of a complication clock when none is given.
pub const COMPLICATION_SEGMENTS: u32 = 4;

static HARM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)harm\s*(\d)").expect("valid regex"));
static HARM_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(.*?harm.*?\)").expect("valid regex"));
static HEAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)heat\s*\+\s*(\d+)").expect("valid regex"));
static CLOCK_TICK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)clock[^\d+]*\+\s*(\d+)").expect("valid regex"));
static TRAILING_TICK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*(\d+)\s*$").expect("valid regex"));
static COMPLICATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)complicat").expect("valid regex"));
static PLUS_N: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+\s*(\d+)").expect("valid regex"));

/// What applying a suggestion did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "applied", rename_all = "snake_case")]
pub enum AppliedSuggestion {
    /// A harm was recorded.
    Harm {
        /// Injured player.
        actor: String,
        /// Harm level.
        level: u8,
        /// Harm label.
        label: String,
    },
    /// Heat was raised.
    Heat {
        /// Heat added.
        delta: i32,
    },
    /// A clock was ticked.
    ClockFill {
        /// Clock name.
        clock: String,
        /// Segments ticked.
        delta: u32,
        /// Fill afterwards.
        filled: u32,
    },
    /// A complication clock was created (if needed) and ticked.
    ComplicationClock {
        /// Clock name.
        clock: String,
        /// Segments ticked.
        delta: u32,
        /// Fill afterwards.
        filled: u32,
    },
    /// Nothing recognisable, or a required target was missing.
    Noop {
        /// Why nothing happened.
        note: String,
    },
}

/// Optional targets a suggestion line may need.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionTarget<'a> {
    /// Player a harm line applies to.
    pub actor: Option<&'a str>,
    /// Clock a tick line applies to.
    pub clock: Option<&'a str>,
    /// Capacity for clocks that have to be created.
    pub default_segments: Option<u32>,
}

fn capture<T: std::str::FromStr>(re: &Regex, line: &str) -> Option<T> {
    re.captures(line)?.get(1)?.as_str().parse().ok()
}

/// Apply one suggestion line to a campaign in memory.
///
/// Patterns are tried in order: `harm N` (needs an actor), `heat +N`,
/// a clock tick (`clock .. +N` or a trailing `:N`, needs a clock or a
/// default capacity), then `complication`. Ticking a named clock that does
/// not exist fails with `NotFound`.
pub fn apply_suggestion(
    c: &mut Campaign,
    line: &str,
    target: SuggestionTarget<'_>,
) -> LedgerResult<AppliedSuggestion> {
    if let (Some(level), Some(actor)) = (capture::<u8>(&HARM, line), target.actor) {
        let stripped = HARM_MARKER.replace_all(line, "");
        let label = stripped.trim_matches(|ch: char| matches!(ch, ' ' | '-' | '–' | ':'));
        let label = if label.is_empty() {
            format!("Harm {level}")
        } else {
            label.to_string()
        };
        c.add_harm(actor, level, &label, None)?;
        return Ok(AppliedSuggestion::Harm {
            actor: actor.to_string(),
            level,
            label,
        });
    }

    if let Some(delta) = capture::<i32>(&HEAT, line) {
        c.adjust(Counter::Heat, delta);
        return Ok(AppliedSuggestion::Heat { delta });
    }

    let tick = capture::<u32>(&CLOCK_TICK, line).or_else(|| capture(&TRAILING_TICK, line));
    if let Some(delta) = tick {
        match (target.clock, target.default_segments) {
            (Some(clock), _) => {
                let filled = c.fill_clock(&Scope::Campaign, clock, delta)?;
                return Ok(AppliedSuggestion::ClockFill {
                    clock: clock.to_string(),
                    delta,
                    filled,
                });
            }
            (None, Some(segments)) => {
                c.upsert_clock(&Scope::Campaign, SCENE_CLOCK, segments);
                let filled = c.fill_clock(&Scope::Campaign, SCENE_CLOCK, delta)?;
                return Ok(AppliedSuggestion::ClockFill {
                    clock: SCENE_CLOCK.to_string(),
                    delta,
                    filled,
                });
            }
            (None, None) => {}
        }
    }

    if COMPLICATION.is_match(line) {
        let clock = target.clock.map(str::to_string).unwrap_or_else(|| {
            let head: String = line.chars().take(32).collect();
            format!("{COMPLICATION_PREFIX}{head}")
        });
        if c.clock(&Scope::Campaign, &clock).is_none() {
            let segments = target.default_segments.unwrap_or(COMPLICATION_SEGMENTS);
            c.upsert_clock(&Scope::Campaign, &clock, segments);
        }
        let delta = capture::<u32>(&PLUS_N, line).unwrap_or(1);
        let filled = c.fill_clock(&Scope::Campaign, &clock, delta)?;
        return Ok(AppliedSuggestion::ComplicationClock {
            clock,
            delta,
            filled,
        });
    }

    Ok(AppliedSuggestion::Noop {
        note: "unrecognised line, or it needs an actor or clock".to_string(),
    })
}

/// Apply a suggestion line as one transaction on `campaign`.
pub fn apply_to(
    campaign: &CampaignHandle,
    line: &str,
    target: SuggestionTarget<'_>,
) -> LedgerResult<AppliedSuggestion> {
    let applied = campaign.transact(|c| apply_suggestion(c, line, target))?;
    debug!(campaign = campaign.name(), line, ?applied, "suggestion applied");
    Ok(applied)
}
