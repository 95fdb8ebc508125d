use std::fs;
use std::path::Path;

use clap::ValueEnum;
use gm_session::Journal;

#[derive(Clone, Copy, ValueEnum)]
pub enum JournalFormat {
    Jsonl,
    Csv,
}

/// Read a JSON-lines journal; a missing file is an empty journal.
pub fn load(path: &Path) -> Result<Journal, String> {
    if !path.exists() {
        return Ok(Journal::new());
    }
    let text =
        fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    Journal::from_jsonl(&text).map_err(|e| format!("bad journal {}: {e}", path.display()))
}

pub fn run(path: &Path, format: JournalFormat) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("journal not found: {}", path.display()));
    }
    let journal = load(path)?;
    let out = match format {
        JournalFormat::Jsonl => journal.export_jsonl(),
        JournalFormat::Csv => journal.export_csv(),
    }
    .map_err(|e| e.to_string())?;
    print!("{out}");
    Ok(())
}
