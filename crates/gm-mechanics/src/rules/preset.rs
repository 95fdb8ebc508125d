//! Shipped trigger presets and the default consequence table.

use crate::error::{MechError, MechResult};
use crate::position::{Effect, Position};
use crate::resolution::Quality;
use crate::rules::{ConsequenceTable, Trigger};

/// Names of the shipped trigger presets, in display order.
pub const TRIGGER_PRESETS: [&str; 4] = ["general", "occult", "diplomacy", "infiltration"];

/// Preset active in a fresh campaign.
pub const DEFAULT_TRIGGER_PRESET: &str = "general";

/// Look up a shipped trigger preset by name.
pub fn trigger_preset(name: &str) -> MechResult<Vec<Trigger>> {
    let triggers = match name.trim().to_lowercase().as_str() {
        "general" => general(),
        "occult" => occult(),
        "diplomacy" => diplomacy(),
        "infiltration" => infiltration(),
        _ => return Err(MechError::UnknownPreset(name.to_string())),
    };
    Ok(triggers)
}

/// Everyday scoundrel work.
pub fn general() -> Vec<Trigger> {
    vec![
        Trigger::new("shoot|gunfire|firefight", Position::Risky, Effect::Standard),
        Trigger::new("lock|lockpick|break in", Position::Risky, Effect::Low),
        Trigger::new(
            "negotiat|persuad|blackmail",
            Position::Controlled,
            Effect::Standard,
        ),
        Trigger::new("sneak|stealth", Position::Risky, Effect::Standard),
        Trigger::new("ritual|ghost|demon", Position::Desperate, Effect::High),
    ]
}

/// The supernatural.
pub fn occult() -> Vec<Trigger> {
    vec![
        Trigger::new(
            "ritual|ghost|demon|darkness|ether",
            Position::Desperate,
            Effect::High,
        ),
        Trigger::new("lore|research", Position::Controlled, Effect::Standard),
        Trigger::new("desecrat|curse", Position::Risky, Effect::High),
    ]
}

/// Talking instead of fighting.
pub fn diplomacy() -> Vec<Trigger> {
    vec![
        Trigger::new(
            "negotiat|blackmail|persuad|deal",
            Position::Controlled,
            Effect::Standard,
        ),
        Trigger::new("public|crowd|market", Position::Risky, Effect::Low),
        Trigger::new("noble|council|official", Position::Risky, Effect::Standard),
    ]
}

/// Getting in where you should not be.
pub fn infiltration() -> Vec<Trigger> {
    vec![
        Trigger::new("lock|lockpick|mechanism|door", Position::Risky, Effect::Low),
        Trigger::new("tool|solder|explosi", Position::Desperate, Effect::High),
        Trigger::new("sneak|at night|guard", Position::Risky, Effect::Standard),
    ]
}

/// The three-position consequence table of a fresh campaign.
pub fn default_consequences() -> ConsequenceTable {
    let mut table = ConsequenceTable::default();
    let rows: [(Position, &[&str], &[&str]); 3] = [
        (
            Position::Desperate,
            &[
                "Moderate wound (harm 2)",
                "Complication (temporary -1d)",
                "Fill hostile clock:1",
            ],
            &[
                "Severe wound (harm 3)",
                "Fill hostile clock:2",
                "Threat escalates (alarm/reinforcements)",
                "Heat +2",
            ],
        ),
        (
            Position::Risky,
            &[
                "Lesser wound (harm 1)",
                "Complication in the scene",
                "Threat clock +1",
            ],
            &[
                "Moderate wound (harm 2)",
                "Lose position",
                "Heat +1",
                "Threat clock +2",
            ],
        ),
        (
            Position::Controlled,
            &["Minor hitch", "Temporary risk", "Spend a resource"],
            &[
                "Lesser wound (harm 1)",
                "Fall back / lose the advantage",
                "Threat clock +1",
            ],
        ),
    ];
    for (position, partial, bad) in rows {
        table.set(position.label(), Quality::Partial, own(partial));
        table.set(position.label(), Quality::Bad, own(bad));
    }
    table
}

fn own(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_named_preset_resolves() {
        for name in TRIGGER_PRESETS {
            assert!(!trigger_preset(name).unwrap().is_empty(), "{name}");
        }
    }

    #[test]
    fn preset_lookup_ignores_case() {
        assert_eq!(trigger_preset("Occult").unwrap(), occult());
    }

    #[test]
    fn unknown_preset_errors() {
        let err = trigger_preset("piracy").unwrap_err();
        assert!(matches!(err, MechError::UnknownPreset(ref n) if n == "piracy"));
    }

    #[test]
    fn default_table_covers_all_positions() {
        let table = default_consequences();
        for p in Position::ALL {
            let lines = table.get(p.label()).unwrap();
            assert!(!lines.partial.is_empty());
            assert!(!lines.bad.is_empty());
        }
    }

    #[test]
    fn shipped_patterns_compile() {
        for name in TRIGGER_PRESETS {
            for t in trigger_preset(name).unwrap() {
                assert!(regex::Regex::new(&t.pattern).is_ok(), "{}", t.pattern);
            }
        }
    }
}
