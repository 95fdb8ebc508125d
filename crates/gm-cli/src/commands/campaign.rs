use std::fs;
use std::path::PathBuf;

use clap::Subcommand;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::{Context, print_json};

#[derive(Subcommand)]
pub enum CampaignCommand {
    /// Start a fresh campaign (replacing one of the same name) and activate it
    Create {
        /// Campaign name
        name: String,
    },

    /// Make an existing campaign active
    Switch {
        /// Campaign name
        name: String,
    },

    /// List campaigns
    List,

    /// Export the active campaign as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a campaign export and activate it
    Import {
        /// JSON export file
        file: PathBuf,

        /// Name to import under (default: the export's own name)
        #[arg(short, long)]
        name: Option<String>,
    },
}

pub fn run(ctx: &Context, cmd: CampaignCommand) -> Result<(), String> {
    let ledger = ctx.ledger();
    match cmd {
        CampaignCommand::Create { name } => {
            let handle = ledger.create_campaign(&name).map_err(|e| e.to_string())?;
            print_json(&handle.snapshot())
        }
        CampaignCommand::Switch { name } => {
            ledger.switch_campaign(&name).map_err(|e| e.to_string())?;
            print_json(&ctx.active()?.snapshot())
        }
        CampaignCommand::List => {
            let current = ledger.current_name();
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Campaign", "Players", "Clocks", ""]);
            for name in ledger.list_campaigns() {
                let handle = ledger.campaign(&name).map_err(|e| e.to_string())?;
                let (players, clocks) = handle.read(|c| (c.players.len(), c.clocks.len()));
                let marker = if name == current { "active" } else { "" };
                table.add_row(vec![
                    name,
                    players.to_string(),
                    clocks.to_string(),
                    marker.to_string(),
                ]);
            }
            println!("{table}");
            println!();
            println!("  active: {}", current.bold());
            Ok(())
        }
        CampaignCommand::Export { output } => {
            let snapshot = ledger.export().map_err(|e| e.to_string())?;
            match output {
                Some(path) => {
                    let text = serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?;
                    fs::write(&path, text)
                        .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
                    eprintln!("  exported {} to {}", snapshot.current_campaign, path.display());
                    Ok(())
                }
                None => print_json(&snapshot),
            }
        }
        CampaignCommand::Import { file, name } => {
            let text = fs::read_to_string(&file)
                .map_err(|e| format!("failed to read {}: {e}", file.display()))?;
            let payload: serde_json::Value =
                serde_json::from_str(&text).map_err(|e| format!("invalid JSON: {e}"))?;
            let handle = ledger
                .import(payload, name.as_deref())
                .map_err(|e| e.to_string())?;
            print_json(&handle.snapshot())
        }
    }
}
