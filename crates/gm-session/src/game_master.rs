//! One narrated step: ask the narrator, extract its intent, resolve it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::SessionResult;
use crate::intent::Intent;
use crate::journal::{Journal, JournalRecord};
use crate::orchestrator::Resolver;
use crate::result::ToolResult;
use crate::transcript::{ChatTurn, NarrationBackend, SYSTEM_PROMPT, extract_intent};

/// Everything a step produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutcome {
    /// The narrator's reply, untouched.
    pub raw: String,
    /// The reply without its intent block.
    pub narration: String,
    /// The intent object, if the reply carried a readable one.
    pub intent: Option<Value>,
    /// What the engine resolved, if anything.
    pub tool_result: Option<ToolResult>,
}

/// Drives a conversation: narrator in, resolved beats out.
pub struct GameMaster<B> {
    backend: B,
    resolver: Resolver,
    journal: Journal,
}

impl<B: NarrationBackend> GameMaster<B> {
    /// Create a game master over a backend and a resolver.
    pub fn new(backend: B, resolver: Resolver) -> Self {
        Self {
            backend,
            resolver,
            journal: Journal::new(),
        }
    }

    /// Steps taken so far.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// The resolver in use.
    pub fn resolver(&mut self) -> &mut Resolver {
        &mut self.resolver
    }

    /// Run one step against the active campaign.
    ///
    /// Only an unreachable backend fails the step. An unreadable intent or
    /// a failed resolution still returns the narration, without a tool
    /// result.
    pub fn step(&mut self, history: &[ChatTurn], user: &str) -> SessionResult<StepOutcome> {
        let mut turns = history.to_vec();
        turns.push(ChatTurn::user(user));
        let raw = self.backend.chat(SYSTEM_PROMPT, &turns)?;
        let (intent, narration) = extract_intent(&raw);

        let tool_result = intent.as_ref().and_then(|v| match Intent::from_value(v) {
            Ok(Some(parsed)) => match self.resolver.resolve_active(&parsed, user) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!(error = %e, kind = parsed.kind(), "resolution failed, narration only");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "unreadable intent, narration only");
                None
            }
        });

        self.journal.append(JournalRecord {
            user: user.to_string(),
            narration: narration.clone(),
            intent: intent.clone(),
            tool_result: tool_result.clone(),
            timestamp: Utc::now(),
        });

        Ok(StepOutcome {
            raw,
            narration,
            intent,
            tool_result,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gm_ledger::{ErrorKind, Ledger, LedgerConfig, RollKind};

    use super::*;
    use crate::config::SessionConfig;
    use crate::error::SessionError;
    use crate::transcript::ReplayBackend;

    struct Offline;

    impl NarrationBackend for Offline {
        fn chat(&self, _system: &str, _turns: &[ChatTurn]) -> SessionResult<String> {
            Err(SessionError::Unavailable("connection refused".into()))
        }
    }

    fn resolver() -> (Arc<Ledger>, Resolver) {
        let ledger = Arc::new(Ledger::open(&LedgerConfig::default()).unwrap());
        let resolver = Resolver::new(Arc::clone(&ledger), SessionConfig::default().with_seed(5));
        (ledger, resolver)
    }

    #[test]
    fn step_resolves_engagement() {
        let (ledger, resolver) = resolver();
        let reply = "```json\n{\"intent\": \"engagement\", \"proposed\": {\"dice_guess\": 2}}\n```\nYou slip into the manor.";
        let mut gm = GameMaster::new(ReplayBackend::new(reply), resolver);
        let out = gm.step(&[], "We go in").unwrap();
        assert_eq!(out.narration, "You slip into the manor.");
        assert!(matches!(out.tool_result, Some(ToolResult::Engagement(_))));
        let last = ledger.active().unwrap().snapshot().last_roll.unwrap();
        assert_eq!(last.kind, RollKind::Engagement);
        assert_eq!(gm.journal().len(), 1);
    }

    #[test]
    fn narration_only_has_no_tool_result() {
        let (ledger, resolver) = resolver();
        let reply = "```json\n{\"intent\": \"narration_only\"}\n```\nQuiet night.";
        let mut gm = GameMaster::new(ReplayBackend::new(reply), resolver);
        let out = gm.step(&[ChatTurn::assistant("Earlier.")], "Wait").unwrap();
        assert!(out.intent.is_some());
        assert!(out.tool_result.is_none());
        assert!(ledger.active().unwrap().snapshot().last_roll.is_none());
    }

    #[test]
    fn unknown_intent_keeps_narration() {
        let (_, resolver) = resolver();
        let reply = "```json\n{\"intent\": \"sing\"}\n```\nA song rises.";
        let mut gm = GameMaster::new(ReplayBackend::new(reply), resolver);
        let out = gm.step(&[], "Sing").unwrap();
        assert_eq!(out.narration, "A song rises.");
        assert!(out.tool_result.is_none());
    }

    #[test]
    fn offline_backend_is_unavailable() {
        let (_, resolver) = resolver();
        let mut gm = GameMaster::new(Offline, resolver);
        let err = gm.step(&[], "Hello?").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert!(gm.journal().is_empty());
    }

    #[test]
    fn step_outcome_wire_shape() {
        let out = StepOutcome {
            raw: "r".into(),
            narration: "n".into(),
            intent: None,
            tool_result: None,
        };
        let v = serde_json::to_value(&out).unwrap();
        assert!(v.get("toolResult").is_some());
    }
}
