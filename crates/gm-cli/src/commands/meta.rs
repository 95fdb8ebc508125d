use clap::Subcommand;
use gm_ledger::{Counter, LedgerOp, MetaValues};

use super::Context;

#[derive(Subcommand)]
pub enum MetaCommand {
    /// Overwrite any of the counters
    Set {
        /// Heat
        #[arg(long, allow_negative_numbers = true)]
        heat: Option<i32>,
        /// Wanted level
        #[arg(long, allow_negative_numbers = true)]
        wanted: Option<i32>,
        /// Reputation
        #[arg(long, allow_negative_numbers = true)]
        rep: Option<i32>,
        /// Coin
        #[arg(long, allow_negative_numbers = true)]
        coin: Option<i32>,
    },

    /// Add a delta to one counter
    Adjust {
        /// heat, wanted, rep or coin
        counter: String,
        /// Signed change
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
}

pub fn run(ctx: &Context, cmd: MetaCommand) -> Result<(), String> {
    let op = match cmd {
        MetaCommand::Set {
            heat,
            wanted,
            rep,
            coin,
        } => {
            if heat.is_none() && wanted.is_none() && rep.is_none() && coin.is_none() {
                return Err("nothing to set: pass --heat, --wanted, --rep or --coin".into());
            }
            LedgerOp::SetMeta {
                values: MetaValues {
                    heat,
                    wanted,
                    rep,
                    coin,
                },
            }
        }
        MetaCommand::Adjust { counter, delta } => LedgerOp::AdjustMeta {
            counter: Counter::parse(&counter).ok_or_else(|| {
                format!("unknown counter \"{counter}\" (expected heat, wanted, rep or coin)")
            })?,
            delta,
        },
    };
    ctx.apply(op)
}
