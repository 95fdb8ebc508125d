use clap::Subcommand;
use gm_ledger::LedgerOp;

use super::Context;

#[derive(Subcommand)]
pub enum FactionCommand {
    /// Add a faction
    Add {
        /// Faction name
        name: String,
    },

    /// Set a faction's status with the crew
    Status {
        /// Faction name
        name: String,
        /// New status (any integer)
        #[arg(allow_negative_numbers = true)]
        status: i32,
    },
}

pub fn run(ctx: &Context, cmd: FactionCommand) -> Result<(), String> {
    let op = match cmd {
        FactionCommand::Add { name } => LedgerOp::UpsertFaction { name },
        FactionCommand::Status { name, status } => LedgerOp::SetFactionStatus { name, status },
    };
    ctx.apply(op)
}
