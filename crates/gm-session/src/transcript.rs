//! The chat transcript seam.
//!
//! The engine never talks to a language model itself. A
//! [`NarrationBackend`] produces the narrator's raw reply; this module
//! splits the fenced JSON intent block out of it.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SessionResult;

/// System prompt describing the intent block the narrator must emit.
pub const SYSTEM_PROMPT: &str = r#"You are the game master of a heist-and-scoundrels tabletop game.
Never invent roll results; the engine rolls the dice.

Start every reply with a fenced ```json block:
{
  "intent": "ask_for_action_roll" | "narration_only" | "fortune_roll" | "downtime" | "engagement" | "resist_prompt",
  "proposed": {
    "actor": "character name",
    "action": "Hunt/Study/Survey/Tinker/Finesse/Prowl/Skirmish/Wreck/Command/Consort/Sway/Attune",
    "position": "Controlled/Risky/Desperate",
    "effect": "Low/Standard/High",
    "dice_guess": 1,
    "assist": false,
    "push": false,
    "bargain": false,
    "bonus": 0,
    "setup": false,
    "assist_actor": "helper name",
    "group_action": false,
    "leader": "leader name",
    "group_failures": 0,
    "notes": "why",
    "devils_bargains": ["short offer"],
    "target_clock": {"name": "...", "segments": 4}
  }
}
Then write 10 to 14 lines of narration. Leave out fields you do not know."#;

static JSON_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```json\s*(\{.*?\})\s*```").expect("valid regex")
});

/// One message of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// `user`, `assistant`, or `system`.
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatTurn {
    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// An assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Something that can produce the narrator's reply.
pub trait NarrationBackend: Send + Sync {
    /// Reply to `turns` under `system`. An unreachable backend reports
    /// [`crate::SessionError::Unavailable`].
    fn chat(&self, system: &str, turns: &[ChatTurn]) -> SessionResult<String>;
}

/// A backend that always answers with the same recorded reply.
///
/// Used to replay transcripts offline.
#[derive(Debug, Clone)]
pub struct ReplayBackend {
    reply: String,
}

impl ReplayBackend {
    /// Answer every request with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl NarrationBackend for ReplayBackend {
    fn chat(&self, _system: &str, _turns: &[ChatTurn]) -> SessionResult<String> {
        Ok(self.reply.clone())
    }
}

/// Split a raw reply into its intent object and the narration.
///
/// The first fenced JSON block is the intent; malformed JSON yields no
/// intent. Every fenced JSON block is removed from the narration.
pub fn extract_intent(raw: &str) -> (Option<Value>, String) {
    let intent = JSON_BLOCK
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| serde_json::from_str::<Value>(m.as_str()).ok());
    let narration = JSON_BLOCK.replace_all(raw, "").trim().to_string();
    (intent, narration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_intent_from_narration() {
        let raw = "```json\n{\"intent\": \"fortune_roll\", \"proposed\": {\"dice_guess\": 2}}\n```\nThe fog thickens.";
        let (intent, narration) = extract_intent(raw);
        let intent = intent.unwrap();
        assert_eq!(intent["intent"], "fortune_roll");
        assert_eq!(narration, "The fog thickens.");
    }

    #[test]
    fn malformed_json_is_no_intent() {
        let raw = "```json\n{\"intent\": oops}\n```\nStill narrating.";
        let (intent, narration) = extract_intent(raw);
        assert!(intent.is_none());
        assert_eq!(narration, "Still narrating.");
    }

    #[test]
    fn plain_text_passes_through() {
        let (intent, narration) = extract_intent("  Rain on the canals.  ");
        assert!(intent.is_none());
        assert_eq!(narration, "Rain on the canals.");
    }

    #[test]
    fn fence_tag_is_case_insensitive() {
        let (intent, _) = extract_intent("```JSON {\"intent\": \"downtime\"} ```");
        assert_eq!(intent.unwrap()["intent"], "downtime");
    }

    #[test]
    fn replay_backend_echoes() {
        let backend = ReplayBackend::new("hello");
        assert_eq!(backend.chat(SYSTEM_PROMPT, &[ChatTurn::user("hi")]).unwrap(), "hello");
    }
}
