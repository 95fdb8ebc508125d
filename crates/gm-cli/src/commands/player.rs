use clap::Subcommand;
use comfy_table::{ContentArrangement, Table};
use gm_ledger::{ACTIONS, LedgerOp};

use super::Context;

#[derive(Subcommand)]
pub enum PlayerCommand {
    /// Add a player with default ratings
    Add {
        /// Player name
        name: String,
    },

    /// Set an action rating
    Action {
        /// Player name
        name: String,
        /// Action (Hunt, Study, Survey, Tinker, Finesse, Prowl, Skirmish, Wreck, Command, Consort, Sway, Attune)
        action: String,
        /// New rating
        rating: i32,
    },

    /// Set stress; values above 9 reset it and add pending trauma
    Stress {
        /// Player name
        name: String,
        /// New stress
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },

    /// Add a trauma
    Trauma {
        /// Player name
        name: String,
        /// Trauma label
        label: String,
    },

    /// Spend one pending trauma, optionally recording which
    ConsumeTrauma {
        /// Player name
        name: String,
        /// Trauma to record
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Record a harm
    Harm {
        /// Player name
        name: String,
        /// Harm level (1-3)
        level: u8,
        /// Harm label
        label: String,
        /// Harm category
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Remove a harm by its index in `player harms`
    ClearHarm {
        /// Player name
        name: String,
        /// Zero-based index
        index: usize,
    },

    /// List a player's harms
    Harms {
        /// Player name
        name: String,
    },

    /// Grant XP
    Xp {
        /// Player name
        name: String,
        /// XP to grant
        #[arg(allow_negative_numbers = true)]
        n: i32,
    },

    /// Pay stress for a flashback
    Flashback {
        /// Player name
        name: String,
        /// Stress paid
        stress_cost: i32,
    },
}

pub fn run(ctx: &Context, cmd: PlayerCommand) -> Result<(), String> {
    let op = match cmd {
        PlayerCommand::Harms { name } => return list_harms(ctx, &name),
        PlayerCommand::Add { name } => LedgerOp::UpsertPlayer { name },
        PlayerCommand::Action {
            name,
            action,
            rating,
        } => LedgerOp::SetActionRating {
            name,
            action: canonical_action(&action)?,
            rating,
        },
        PlayerCommand::Stress { name, value } => LedgerOp::SetStress { name, value },
        PlayerCommand::Trauma { name, label } => LedgerOp::AddTrauma { name, label },
        PlayerCommand::ConsumeTrauma { name, label } => {
            LedgerOp::ConsumePendingTrauma { name, label }
        }
        PlayerCommand::Harm {
            name,
            level,
            label,
            kind,
        } => LedgerOp::AddHarm {
            name,
            level,
            label,
            kind,
        },
        PlayerCommand::ClearHarm { name, index } => LedgerOp::ClearHarm { name, index },
        PlayerCommand::Xp { name, n } => LedgerOp::AddPlayerXp { name, n },
        PlayerCommand::Flashback { name, stress_cost } => {
            LedgerOp::Flashback { name, stress_cost }
        }
    };
    ctx.apply(op)
}

/// Match an action name case-insensitively against the sheet's actions.
fn canonical_action(action: &str) -> Result<String, String> {
    ACTIONS
        .iter()
        .find(|a| a.eq_ignore_ascii_case(action.trim()))
        .map(|a| a.to_string())
        .ok_or_else(|| {
            format!(
                "unknown action \"{action}\" (expected one of {})",
                ACTIONS.join(", ")
            )
        })
}

fn list_harms(ctx: &Context, name: &str) -> Result<(), String> {
    let harms = ctx
        .active()?
        .read(|c| c.player(name).map(|p| p.harms.clone()).unwrap_or_default());

    if harms.is_empty() {
        println!("  No harms for {name}.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Level", "Label", "Kind"]);
    for (i, harm) in harms.iter().enumerate() {
        table.add_row(vec![
            i.to_string(),
            harm.level.to_string(),
            harm.label.clone(),
            harm.kind.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}
