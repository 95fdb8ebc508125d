use clap::Subcommand;
use gm_ledger::{LedgerOp, Scope};

use super::Context;

#[derive(Subcommand)]
pub enum ClockCommand {
    /// Create a clock, or resize it keeping its progress
    Create {
        /// Clock name
        name: String,
        /// Number of segments
        segments: u32,
        /// Put the clock on this faction
        #[arg(short, long)]
        faction: Option<String>,
    },

    /// Tick an existing clock
    Fill {
        /// Clock name
        name: String,
        /// Segments to tick
        #[arg(default_value_t = 1)]
        n: u32,
        /// Look the clock up on this faction
        #[arg(short, long)]
        faction: Option<String>,
    },
}

pub fn run(ctx: &Context, cmd: ClockCommand) -> Result<(), String> {
    let op = match cmd {
        ClockCommand::Create {
            name,
            segments,
            faction,
        } => {
            if segments == 0 {
                return Err("a clock needs at least one segment".into());
            }
            LedgerOp::UpsertClock {
                scope: Scope::from_faction(faction),
                name,
                segments,
            }
        }
        ClockCommand::Fill { name, n, faction } => LedgerOp::FillClock {
            scope: Scope::from_faction(faction),
            name,
            n,
        },
    };
    ctx.apply(op)
}
