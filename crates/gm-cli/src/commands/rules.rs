use clap::Subcommand;
use colored::Colorize;
use gm_ledger::LedgerOp;
use gm_mechanics::rules::{infer_position_effect, preset};
use gm_mechanics::{Position, Quality};

use super::{Context, print_json};

#[derive(Subcommand)]
pub enum RulesCommand {
    /// Load a shipped trigger preset
    Preset {
        /// general, occult, diplomacy or infiltration
        name: String,
    },

    /// List the shipped trigger presets
    Presets,

    /// Set XP needed per advance
    Thresholds {
        /// Player XP per advance
        #[arg(long)]
        player: Option<i32>,
        /// Crew XP per advance
        #[arg(long)]
        crew: Option<i32>,
    },

    /// Toggle house rules
    House {
        /// Adjust rep and heat from action roll quality
        #[arg(long)]
        auto_rep_heat: Option<bool>,
        /// Grant XP for desperate action rolls
        #[arg(long)]
        auto_xp_desperate: Option<bool>,
    },

    /// Replace the suggested consequences for a position and outcome
    Consequences {
        /// Controlled, Risky or Desperate
        position: String,
        /// partial or bad
        quality: String,
        /// Consequence lines
        #[arg(required = true)]
        lines: Vec<String>,
    },

    /// Show the position and effect the triggers infer from some text
    Suggest {
        /// Free text to match
        text: String,
    },
}

pub fn run(ctx: &Context, cmd: RulesCommand) -> Result<(), String> {
    let op = match cmd {
        RulesCommand::Presets => return list_presets(ctx),
        RulesCommand::Suggest { text } => {
            let triggers = ctx.active()?.read(|c| c.config.rules.triggers.clone());
            return print_json(&infer_position_effect(&text, &triggers));
        }
        RulesCommand::Preset { name } => LedgerOp::UseTriggerPreset { name },
        RulesCommand::Thresholds { player, crew } => LedgerOp::SetThresholds { player, crew },
        RulesCommand::House {
            auto_rep_heat,
            auto_xp_desperate,
        } => LedgerOp::SetHouseRules {
            auto_rep_heat,
            auto_xp_desperate,
        },
        RulesCommand::Consequences {
            position,
            quality,
            lines,
        } => {
            let position = Position::parse(&position)
                .ok_or_else(|| format!("unknown position \"{position}\""))?;
            let quality = match Quality::parse(&quality) {
                Some(q) if q.has_consequences() => q,
                _ => return Err(format!("quality must be partial or bad, got \"{quality}\"")),
            };
            LedgerOp::SetConsequences {
                position: position.label().to_string(),
                quality,
                lines,
            }
        }
    };
    ctx.apply(op)
}

fn list_presets(ctx: &Context) -> Result<(), String> {
    let active = ctx.active()?.read(|c| c.config.rules.active_preset.clone());
    for name in preset::TRIGGER_PRESETS {
        if name == active {
            println!("  {} {}", name.bold(), "(active)".green());
        } else {
            println!("  {name}");
        }
    }
    Ok(())
}
