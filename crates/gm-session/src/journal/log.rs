//! Journal storage and export.

use serde::{Deserialize, Serialize};

use super::entry::JournalRecord;
use crate::error::SessionResult;

/// CSV header written by [`Journal::export_csv`].
pub const CSV_HEADER: [&str; 9] = [
    "user",
    "narration",
    "intent",
    "actor",
    "action",
    "tool_type",
    "rolls",
    "best",
    "quality",
];

/// A chronological log of narrated steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    records: Vec<JournalRecord>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON-lines export back; blank lines are skipped.
    pub fn from_jsonl(text: &str) -> SessionResult<Self> {
        let records = text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(serde_json::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    /// Append a record.
    pub fn append(&mut self, record: JournalRecord) {
        self.records.push(record);
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[JournalRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One compact JSON object per line.
    pub fn export_jsonl(&self) -> SessionResult<String> {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Flat CSV, one row per record.
    pub fn export_csv(&self) -> SessionResult<String> {
        let mut out = String::new();
        push_row(&mut out, CSV_HEADER.iter().map(|h| h.to_string()));
        for r in &self.records {
            let tool = r.tool_result.as_ref();
            let rolls = match tool.and_then(|t| t.rolls()) {
                Some(rolls) => serde_json::to_string(rolls)?,
                None => "[]".to_string(),
            };
            push_row(
                &mut out,
                [
                    r.user.clone(),
                    r.narration.clone(),
                    r.intent_kind().to_string(),
                    r.actor().to_string(),
                    r.action().to_string(),
                    tool.map(|t| t.type_name().to_string()).unwrap_or_default(),
                    rolls,
                    tool.and_then(|t| t.best()).map(|b| b.to_string()).unwrap_or_default(),
                    tool.and_then(|t| t.quality()).map(|q| q.to_string()).unwrap_or_default(),
                ],
            );
        }
        Ok(out)
    }
}

fn push_row(out: &mut String, fields: impl IntoIterator<Item = String>) {
    let cells: Vec<String> = fields.into_iter().map(|f| escape(&f)).collect();
    out.push_str(&cells.join(","));
    out.push_str("\r\n");
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use gm_mechanics::{Quality, Roll};
    use serde_json::json;

    use super::*;
    use crate::result::{FortuneResult, ToolResult};

    fn record(user: &str) -> JournalRecord {
        JournalRecord {
            user: user.to_string(),
            narration: "The bell tolls, twice.".to_string(),
            intent: Some(json!({"intent": "fortune_roll", "proposed": {"actor": "Anna"}})),
            tool_result: Some(ToolResult::Fortune(FortuneResult {
                dice: 2,
                rolls: Roll::from_values(vec![3, 5]),
                best: 5,
                quality: Quality::Partial,
                crit: false,
            })),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn empty_journal() {
        let j = Journal::new();
        assert!(j.is_empty());
        assert_eq!(j.len(), 0);
        assert_eq!(j.export_jsonl().unwrap(), "");
    }

    #[test]
    fn jsonl_reads_back() {
        let mut j = Journal::new();
        j.append(record("Do we hear anything?"));
        j.append(record("And now?"));
        let text = j.export_jsonl().unwrap();
        assert_eq!(text.lines().count(), 2);
        let back = Journal::from_jsonl(&format!("{text}\n\n")).unwrap();
        assert_eq!(back.records(), j.records());
    }

    #[test]
    fn csv_columns() {
        let mut j = Journal::new();
        j.append(record("Do we hear anything?"));
        let csv = j.export_csv().unwrap();
        let mut lines = csv.split("\r\n");
        assert_eq!(
            lines.next(),
            Some("user,narration,intent,actor,action,tool_type,rolls,best,quality")
        );
        assert_eq!(
            lines.next(),
            Some(
                "Do we hear anything?,\"The bell tolls, twice.\",fortune_roll,Anna,,fortune,\"[3,5]\",5,partial"
            )
        );
    }

    #[test]
    fn csv_without_tool_result() {
        let mut j = Journal::new();
        let mut r = record("hi");
        r.intent = None;
        r.tool_result = None;
        j.append(r);
        let csv = j.export_csv().unwrap();
        assert!(csv.contains("hi,\"The bell tolls, twice.\",,,,,[],,"));
    }

    #[test]
    fn escape_quotes() {
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("plain"), "plain");
    }
}
