use std::collections::BTreeMap;

use clap::Subcommand;
use gm_ledger::{CrewPatch, LedgerOp};

use super::Context;

#[derive(Subcommand)]
pub enum CrewCommand {
    /// Update crew fields; omitted fields stay as they are
    Set {
        /// Crew name
        #[arg(long)]
        name: Option<String>,
        /// Crew playbook
        #[arg(long)]
        playbook: Option<String>,
        /// Tier
        #[arg(long)]
        tier: Option<i32>,
        /// Hold (weak or strong)
        #[arg(long)]
        hold: Option<String>,
        /// Upgrades as a JSON object, replacing the current ones
        #[arg(long)]
        upgrades: Option<String>,
    },

    /// Grant crew XP
    Xp {
        /// XP to grant
        #[arg(allow_negative_numbers = true)]
        n: i32,
    },
}

pub fn run(ctx: &Context, cmd: CrewCommand) -> Result<(), String> {
    let op = match cmd {
        CrewCommand::Set {
            name,
            playbook,
            tier,
            hold,
            upgrades,
        } => {
            let upgrades = upgrades
                .map(|text| {
                    serde_json::from_str::<BTreeMap<String, serde_json::Value>>(&text)
                        .map_err(|e| format!("upgrades must be a JSON object: {e}"))
                })
                .transpose()?;
            LedgerOp::UpdateCrew {
                patch: CrewPatch {
                    name,
                    playbook,
                    tier,
                    hold,
                    upgrades,
                },
            }
        }
        CrewCommand::Xp { n } => LedgerOp::AddCrewXp { n },
    };
    ctx.apply(op)
}
