//! Journal record type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::result::ToolResult;

/// One narrated step and what the engine did with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalRecord {
    /// What the player said.
    pub user: String,
    /// Narration with the intent block removed.
    pub narration: String,
    /// The intent object as the narrator wrote it.
    pub intent: Option<Value>,
    /// What the engine resolved, if anything.
    pub tool_result: Option<ToolResult>,
    /// When the step happened.
    pub timestamp: DateTime<Utc>,
}

impl JournalRecord {
    /// Intent kind as written, or empty.
    pub fn intent_kind(&self) -> &str {
        self.proposed_or_root("intent", false)
    }

    /// Proposed actor, or empty.
    pub fn actor(&self) -> &str {
        self.proposed_or_root("actor", true)
    }

    /// Proposed action, or empty.
    pub fn action(&self) -> &str {
        self.proposed_or_root("action", true)
    }

    fn proposed_or_root(&self, key: &str, proposed: bool) -> &str {
        let Some(intent) = &self.intent else {
            return "";
        };
        let scope = if proposed { intent.get("proposed") } else { Some(intent) };
        scope
            .and_then(|v| v.get(key))
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}
