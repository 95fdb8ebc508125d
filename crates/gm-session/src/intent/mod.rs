//! Structured intents: what the narrator asks the engine to resolve.
//!
//! An intent arrives as `{"intent": kind, "proposed": {..}}`. The kind is
//! closed: each of the five resolvable kinds carries its own proposal
//! type, and anything else is rejected up front instead of silently
//! falling through.

pub mod lenient;

use gm_ledger::TargetClock;
use gm_mechanics::{Effect, MAX_POOL, Position};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SessionError, SessionResult};

/// Kinds that carry no mechanical request.
pub const NARRATION_ONLY: [&str; 2] = ["narration_only", "none"];

/// A resolvable game beat.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", content = "proposed", rename_all = "snake_case")]
pub enum Intent {
    /// Action roll against a rating.
    ActionRoll(ActionProposal),
    /// Resistance roll paying stress.
    Resist(RollProposal),
    /// Fortune roll with no actor stakes.
    Fortune(RollProposal),
    /// Engagement roll setting the scene's starting position.
    Engagement(RollProposal),
    /// Downtime acknowledgement.
    Downtime(DowntimeProposal),
}

/// Parameters proposed for an action roll. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionProposal {
    /// Acting player.
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    /// Action to rate.
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Proposed position.
    #[serde(deserialize_with = "lenient::position", skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Proposed effect.
    #[serde(deserialize_with = "lenient::effect", skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
    /// Pool used when no rating can be looked up.
    #[serde(deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub dice_guess: Option<i32>,
    /// Flat bonus dice.
    #[serde(deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub bonus: Option<i32>,
    /// Assisted by a teammate.
    #[serde(deserialize_with = "lenient::flag")]
    pub assist: bool,
    /// Who assists; pays 1 stress.
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub assist_actor: Option<String>,
    /// Pushed.
    #[serde(deserialize_with = "lenient::flag")]
    pub push: bool,
    /// Devil's bargain taken.
    #[serde(deserialize_with = "lenient::flag")]
    pub bargain: bool,
    /// Set up by a teammate.
    #[serde(deserialize_with = "lenient::flag")]
    pub setup: bool,
    /// Group action.
    #[serde(deserialize_with = "lenient::flag")]
    pub group_action: bool,
    /// Group action leader.
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,
    /// Failed group members; the leader pays this much stress.
    #[serde(deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub group_failures: Option<i32>,
    /// Clock to advance on success.
    #[serde(deserialize_with = "lenient::target_clock", skip_serializing_if = "Option::is_none")]
    pub target_clock: Option<TargetClock>,
    /// Offered bargains.
    #[serde(deserialize_with = "lenient::strings", skip_serializing_if = "Vec::is_empty")]
    pub devils_bargains: Vec<String>,
    /// Reasoning.
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Parameters for resistance, fortune, and engagement rolls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollProposal {
    /// Acting player, if any.
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    /// Pool size; defaults to 1.
    #[serde(deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub dice_guess: Option<i32>,
    /// Reasoning.
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Parameters for a downtime beat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DowntimeProposal {
    /// Player taking the activity.
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    /// Activity name.
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    /// Free text.
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ActionProposal {
    /// Pool to use when no rating is known, at most [`MAX_POOL`].
    pub fn guess(&self) -> i32 {
        self.dice_guess.unwrap_or(1).min(MAX_POOL)
    }
}

impl RollProposal {
    /// Requested pool; defaults to 1 and caps at [`MAX_POOL`].
    pub fn pool(&self) -> i32 {
        self.dice_guess.unwrap_or(1).min(MAX_POOL)
    }
}

impl Intent {
    /// Canonical kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ActionRoll(_) => "action_roll",
            Self::Resist(_) => "resist",
            Self::Fortune(_) => "fortune",
            Self::Engagement(_) => "engagement",
            Self::Downtime(_) => "downtime",
        }
    }

    /// Decode an intent object.
    ///
    /// Returns `Ok(None)` for narration-only intents. Kind names from the
    /// narrator prompt (`ask_for_action_roll`, `resist_prompt`,
    /// `fortune_roll`) are accepted alongside the canonical ones.
    pub fn from_value(value: &Value) -> SessionResult<Option<Self>> {
        let kind = value
            .get("intent")
            .and_then(Value::as_str)
            .ok_or_else(|| SessionError::InvalidIntent("missing \"intent\" field".into()))?;
        let proposed = match value.get("proposed") {
            Some(p @ Value::Object(_)) => p.clone(),
            _ => Value::Object(serde_json::Map::new()),
        };
        let kind = kind.trim().to_lowercase();
        if NARRATION_ONLY.contains(&kind.as_str()) {
            return Ok(None);
        }
        let intent = match kind.as_str() {
            "action_roll" | "ask_for_action_roll" => Self::ActionRoll(decode(proposed)?),
            "resist" | "resist_prompt" | "resistance" => Self::Resist(decode(proposed)?),
            "fortune" | "fortune_roll" => Self::Fortune(decode(proposed)?),
            "engagement" | "engagement_roll" => Self::Engagement(decode(proposed)?),
            "downtime" => Self::Downtime(decode(proposed)?),
            other => {
                return Err(SessionError::InvalidIntent(format!(
                    "unknown intent kind: {other}"
                )));
            }
        };
        Ok(Some(intent))
    }
}

fn decode<T: serde::de::DeserializeOwned>(proposed: Value) -> SessionResult<T> {
    serde_json::from_value(proposed).map_err(|e| SessionError::InvalidIntent(e.to_string()))
}
