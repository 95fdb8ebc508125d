use clap::Subcommand;
use gm_ledger::LedgerOp;
use gm_mechanics::rules::suggest_consequences;
use gm_mechanics::{Position, Quality};
use gm_session::SuggestionTarget;
use gm_session::suggestion::apply_to;

use super::{Context, print_json};

#[derive(Subcommand)]
pub enum SceneCommand {
    /// Suggest consequences from the table, or add a line to the last roll
    Suggest {
        /// Position to look up (Controlled, Risky, Desperate; others use Risky)
        #[arg(long, requires = "quality", conflicts_with = "line")]
        position: Option<String>,
        /// Outcome to look up (partial or bad)
        #[arg(long, requires = "position", conflicts_with = "line")]
        quality: Option<String>,
        /// Line to append to the last roll's suggestions
        #[arg(required_unless_present = "position")]
        line: Option<String>,
    },

    /// Save the last roll's suggestions under a name
    SavePreset {
        /// Preset name
        name: String,
    },

    /// Replace the last roll's suggestions with a saved preset
    ApplyPreset {
        /// Preset name
        name: String,
    },

    /// List saved scene presets
    Presets,

    /// Apply a suggestion line to the campaign (harm, heat, clock ticks)
    Apply {
        /// The suggestion line, e.g. "Take harm 2 (Harm 2)" or "Heat +1"
        line: String,
        /// Player who takes harm
        #[arg(long)]
        actor: Option<String>,
        /// Clock to tick
        #[arg(long)]
        clock: Option<String>,
        /// Segments for a clock created on the fly
        #[arg(long)]
        segments: Option<u32>,
    },
}

pub fn run(ctx: &Context, cmd: SceneCommand) -> Result<(), String> {
    let op = match cmd {
        SceneCommand::Suggest {
            position: Some(position),
            quality: Some(quality),
            ..
        } => return suggest(ctx, &position, &quality),
        SceneCommand::Suggest { line: Some(line), .. } => {
            LedgerOp::AppendLastRollSuggestion { line }
        }
        SceneCommand::Suggest { .. } => {
            return Err("pass a line, or --position and --quality".into());
        }
        SceneCommand::SavePreset { name } => LedgerOp::SaveSceneConsequencePreset { name },
        SceneCommand::ApplyPreset { name } => LedgerOp::ApplySceneConsequencePreset { name },
        SceneCommand::Presets => {
            let names = ctx.active()?.read(|c| c.scene_consequence_presets());
            if names.is_empty() {
                println!("  No scene presets saved.");
            }
            for name in names {
                println!("  {name}");
            }
            return Ok(());
        }
        SceneCommand::Apply {
            line,
            actor,
            clock,
            segments,
        } => {
            let target = SuggestionTarget {
                actor: actor.as_deref(),
                clock: clock.as_deref(),
                default_segments: segments,
            };
            let applied = apply_to(&ctx.active()?, &line, target).map_err(|e| e.to_string())?;
            return print_json(&applied);
        }
    };
    ctx.apply(op)
}

fn suggest(ctx: &Context, position: &str, quality: &str) -> Result<(), String> {
    // Unknown positions fall through to the table's Risky entry.
    let position = Position::parse(position).map_or(position, |p| p.label());
    let quality =
        Quality::parse(quality).ok_or_else(|| format!("unknown quality \"{quality}\""))?;
    let lines = ctx
        .active()?
        .read(|c| suggest_consequences(position, quality, &c.config.rules.consequences));
    print_json(&lines)
}
