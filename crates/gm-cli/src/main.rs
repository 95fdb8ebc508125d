//! CLI frontend for the heist GM engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::Context;
use commands::campaign::CampaignCommand;
use commands::clock::ClockCommand;
use commands::crew::CrewCommand;
use commands::faction::FactionCommand;
use commands::journal::JournalFormat;
use commands::meta::MetaCommand;
use commands::player::PlayerCommand;
use commands::roll::RollCommand;
use commands::rules::RulesCommand;
use commands::scene::SceneCommand;

#[derive(Parser)]
#[command(
    name = "gm",
    about = "Dice, rules and campaign ledger for heist tabletop games",
    version,
    propagate_version = true
)]
struct Cli {
    /// Campaign state file
    #[arg(
        long,
        global = true,
        env = "GM_STATE_PATH",
        default_value = "gm-state.json"
    )]
    state: PathBuf,

    /// Seed for reproducible dice
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, switch, list, export and import campaigns
    #[command(subcommand)]
    Campaign(CampaignCommand),

    /// Edit player sheets
    #[command(subcommand)]
    Player(PlayerCommand),

    /// Edit the crew
    #[command(subcommand)]
    Crew(CrewCommand),

    /// Edit factions
    #[command(subcommand)]
    Faction(FactionCommand),

    /// Create and tick progress clocks
    #[command(subcommand)]
    Clock(ClockCommand),

    /// Set or adjust heat, wanted, rep and coin
    #[command(subcommand)]
    Meta(MetaCommand),

    /// Configure triggers, thresholds, house rules and consequences
    #[command(subcommand)]
    Rules(RulesCommand),

    /// Work with the last roll's suggested consequences
    #[command(subcommand)]
    Scene(SceneCommand),

    /// Roll dice against the active campaign
    #[command(subcommand)]
    Roll(RollCommand),

    /// Resolve a structured intent against the active campaign
    Resolve {
        /// Intent as a JSON object, e.g. {"intent":"fortune","proposed":{}}
        #[arg(long)]
        intent: String,

        /// Player text used to infer missing position and effect
        #[arg(long, default_value = "")]
        text: String,
    },

    /// Run one narrated step from a recorded narrator reply
    Step {
        /// What the player said
        #[arg(long)]
        user: String,

        /// The narrator's reply, possibly carrying a fenced json intent
        #[arg(long)]
        reply: String,

        /// Append the step to this JSON-lines journal
        #[arg(long)]
        journal: Option<PathBuf>,
    },

    /// Export a resolution journal
    Journal {
        /// JSON-lines journal file
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "jsonl")]
        format: JournalFormat,
    },

    /// Print the active campaign
    Show {
        /// Human-readable overview instead of JSON
        #[arg(long)]
        summary: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GM_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let command = match cli.command {
        // Journals live outside the state file.
        Commands::Journal { path, format } => return commands::journal::run(&path, format),
        other => other,
    };

    let ctx = Context::open(&cli.state, cli.seed)?;
    let result = match command {
        Commands::Campaign(cmd) => commands::campaign::run(&ctx, cmd),
        Commands::Player(cmd) => commands::player::run(&ctx, cmd),
        Commands::Crew(cmd) => commands::crew::run(&ctx, cmd),
        Commands::Faction(cmd) => commands::faction::run(&ctx, cmd),
        Commands::Clock(cmd) => commands::clock::run(&ctx, cmd),
        Commands::Meta(cmd) => commands::meta::run(&ctx, cmd),
        Commands::Rules(cmd) => commands::rules::run(&ctx, cmd),
        Commands::Scene(cmd) => commands::scene::run(&ctx, cmd),
        Commands::Roll(cmd) => commands::roll::run(&ctx, cmd),
        Commands::Resolve { intent, text } => commands::resolve::run(&ctx, &intent, &text),
        Commands::Step {
            user,
            reply,
            journal,
        } => commands::step::run(&ctx, &user, &reply, journal.as_deref()),
        Commands::Show { summary } => commands::show::run(&ctx, summary),
        Commands::Journal { .. } => Ok(()),
    };
    ctx.close()?;
    result
}
