use clap::{Args, Subcommand};
use gm_ledger::TargetClock;
use gm_mechanics::{Effect, Position, Roll, roll_d6};
use gm_session::{ActionProposal, Intent, RollProposal};
use serde::Serialize;

use super::{Context, print_json};

#[derive(Subcommand)]
pub enum RollCommand {
    /// Action roll: rating plus modifiers, graded, with clock and house rules
    Action(ActionArgs),

    /// Resistance roll; the stress cost is charged to the actor
    Resist(PoolArgs),

    /// Fortune roll; only recorded as the last roll
    Fortune(PoolArgs),

    /// Engagement roll setting the starting position
    Engagement(PoolArgs),

    /// Plain d6 draw with no effect on the campaign
    D6 {
        /// Number of dice
        #[arg(default_value_t = 1)]
        n: i32,
    },

    /// Roll resistance for a player and charge the stress
    ResistApply {
        /// Player name
        name: String,
        /// Dice pool
        pool: i32,
    },
}

#[derive(Args)]
pub struct ActionArgs {
    /// Acting player
    #[arg(long)]
    actor: Option<String>,
    /// Action to rate (e.g. Prowl)
    #[arg(long)]
    action: Option<String>,
    /// Controlled, Risky or Desperate (inferred from --text if omitted)
    #[arg(long)]
    position: Option<String>,
    /// Low, Standard or High (inferred from --text if omitted)
    #[arg(long)]
    effect: Option<String>,
    /// Pool used when no rating is on file
    #[arg(long)]
    dice: Option<i32>,
    /// Extra dice
    #[arg(long, allow_negative_numbers = true)]
    bonus: Option<i32>,
    /// A teammate assists
    #[arg(long)]
    assist: bool,
    /// Who assists; pays 1 stress
    #[arg(long)]
    assist_actor: Option<String>,
    /// Push yourself
    #[arg(long)]
    push: bool,
    /// Take a devil's bargain
    #[arg(long)]
    bargain: bool,
    /// A teammate set you up
    #[arg(long)]
    setup: bool,
    /// Clock to advance on success
    #[arg(long)]
    clock: Option<String>,
    /// Segments if the clock has to be created
    #[arg(long, requires = "clock")]
    clock_segments: Option<u32>,
    /// What the player is attempting, for trigger inference
    #[arg(long, default_value = "")]
    text: String,
}

#[derive(Args)]
pub struct PoolArgs {
    /// Player rolling
    #[arg(long)]
    actor: Option<String>,
    /// Dice pool
    #[arg(long, default_value_t = 1)]
    dice: i32,
}

impl From<PoolArgs> for RollProposal {
    fn from(args: PoolArgs) -> Self {
        RollProposal {
            actor: args.actor,
            dice_guess: Some(args.dice),
            notes: None,
        }
    }
}

#[derive(Serialize)]
struct Draw {
    rolls: Roll,
    best: u32,
}

pub fn run(ctx: &Context, cmd: RollCommand) -> Result<(), String> {
    let mut resolver = ctx.resolver();
    let (intent, text) = match cmd {
        RollCommand::D6 { n } => {
            let rolls = roll_d6(n, resolver.rng());
            let best = rolls.highest();
            return print_json(&Draw { rolls, best });
        }
        RollCommand::ResistApply { name, pool } => {
            let result = resolver
                .resist_apply(&ctx.active()?, &name, pool)
                .map_err(|e| e.to_string())?;
            return print_json(&result);
        }
        RollCommand::Action(args) => {
            let text = args.text.clone();
            (Intent::ActionRoll(proposal(args)?), text)
        }
        RollCommand::Resist(args) => (Intent::Resist(args.into()), String::new()),
        RollCommand::Fortune(args) => (Intent::Fortune(args.into()), String::new()),
        RollCommand::Engagement(args) => (Intent::Engagement(args.into()), String::new()),
    };
    let result = resolver
        .resolve_active(&intent, &text)
        .map_err(|e| e.to_string())?;
    print_json(&result)
}

fn proposal(args: ActionArgs) -> Result<ActionProposal, String> {
    let position = args
        .position
        .map(|p| Position::parse(&p).ok_or_else(|| format!("unknown position \"{p}\"")))
        .transpose()?;
    let effect = args
        .effect
        .map(|e| Effect::parse(&e).ok_or_else(|| format!("unknown effect \"{e}\"")))
        .transpose()?;
    Ok(ActionProposal {
        actor: args.actor,
        action: args.action,
        position,
        effect,
        dice_guess: args.dice,
        bonus: args.bonus,
        assist: args.assist || args.assist_actor.is_some(),
        assist_actor: args.assist_actor,
        push: args.push,
        bargain: args.bargain,
        setup: args.setup,
        target_clock: args.clock.map(|name| TargetClock {
            name,
            segments: args.clock_segments,
        }),
        ..ActionProposal::default()
    })
}
