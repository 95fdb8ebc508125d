use std::fs;
use std::path::Path;

use gm_session::{GameMaster, Journal, ReplayBackend};

use super::{Context, print_json};

/// Play one step with `reply` standing in for the narrator.
pub fn run(ctx: &Context, user: &str, reply: &str, journal: Option<&Path>) -> Result<(), String> {
    let mut gm = GameMaster::new(ReplayBackend::new(reply), ctx.resolver());
    let outcome = gm.step(&[], user).map_err(|e| e.to_string())?;

    if let Some(path) = journal {
        let mut log = super::journal::load(path)?;
        for record in gm.journal().records() {
            log.append(record.clone());
        }
        save(&log, path)?;
    }

    print_json(&outcome)
}

fn save(log: &Journal, path: &Path) -> Result<(), String> {
    let text = log.export_jsonl().map_err(|e| e.to_string())?;
    fs::write(path, text).map_err(|e| format!("failed to write {}: {e}", path.display()))
}
