//! Direct ledger operations.
//!
//! One variant per mutation a caller may request. [`Campaign::apply`] runs
//! an operation against a campaign in memory; the ledger wraps it in a
//! transaction.

use gm_mechanics::Quality;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::model::{Campaign, Counter, CrewPatch, LastRoll, MetaValues, Scope};

/// A single typed mutation of one campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum LedgerOp {
    /// Create a clock or resize it, keeping progress.
    UpsertClock {
        /// Owning collection.
        #[serde(default)]
        scope: Scope,
        /// Clock name.
        name: String,
        /// Capacity.
        segments: u32,
    },
    /// Tick an existing clock; fails with `NotFound` if absent.
    FillClock {
        /// Owning collection.
        #[serde(default)]
        scope: Scope,
        /// Clock name.
        name: String,
        /// Segments to tick.
        n: u32,
    },
    /// Add a delta to a counter.
    AdjustMeta {
        /// Which counter.
        counter: Counter,
        /// Signed change.
        delta: i32,
    },
    /// Overwrite any subset of the counters.
    SetMeta {
        /// New values.
        values: MetaValues,
    },
    /// Create a player if absent.
    UpsertPlayer {
        /// Player name.
        name: String,
    },
    /// Set one action rating.
    SetActionRating {
        /// Player name.
        name: String,
        /// Action name.
        action: String,
        /// New rating.
        rating: i32,
    },
    /// Set stress, converting overflow into pending trauma.
    SetStress {
        /// Player name.
        name: String,
        /// Requested stress.
        value: i32,
    },
    /// Add a trauma.
    AddTrauma {
        /// Player name.
        name: String,
        /// Trauma label.
        label: String,
    },
    /// Spend one pending trauma.
    ConsumePendingTrauma {
        /// Player name.
        name: String,
        /// Trauma to record, if any.
        #[serde(default)]
        label: Option<String>,
    },
    /// Record a harm.
    AddHarm {
        /// Player name.
        name: String,
        /// Level 1 to 3.
        level: u8,
        /// Harm label.
        label: String,
        /// Category; defaults to `generic`.
        #[serde(default)]
        kind: Option<String>,
    },
    /// Remove a harm by position.
    ClearHarm {
        /// Player name.
        name: String,
        /// Zero-based index.
        index: usize,
    },
    /// Grant player XP.
    AddPlayerXp {
        /// Player name.
        name: String,
        /// XP granted.
        n: i32,
    },
    /// Grant crew XP.
    AddCrewXp {
        /// XP granted.
        n: i32,
    },
    /// Update crew fields.
    UpdateCrew {
        /// Fields to change.
        patch: CrewPatch,
    },
    /// Create a faction if absent.
    UpsertFaction {
        /// Faction name.
        name: String,
    },
    /// Set a faction's status.
    SetFactionStatus {
        /// Faction name.
        name: String,
        /// New status.
        status: i32,
    },
    /// Replace or clear the last roll.
    SetLastRoll {
        /// New record.
        #[serde(default)]
        record: Option<LastRoll>,
    },
    /// Append a suggestion to the last roll.
    AppendLastRollSuggestion {
        /// Suggestion line.
        line: String,
    },
    /// Snapshot the last roll's suggestions.
    SaveSceneConsequencePreset {
        /// Preset name.
        name: String,
    },
    /// Load a saved preset into the last roll.
    ApplySceneConsequencePreset {
        /// Preset name.
        name: String,
    },
    /// Swap in a shipped trigger preset.
    UseTriggerPreset {
        /// Preset name.
        name: String,
    },
    /// Change advance thresholds.
    SetThresholds {
        /// Player XP per advance.
        #[serde(default)]
        player: Option<i32>,
        /// Crew XP per advance.
        #[serde(default)]
        crew: Option<i32>,
    },
    /// Toggle house rules.
    SetHouseRules {
        /// Rep/heat from roll quality.
        #[serde(default)]
        auto_rep_heat: Option<bool>,
        /// XP on desperate rolls.
        #[serde(default)]
        auto_xp_desperate: Option<bool>,
    },
    /// Replace consequence lines for a position and quality.
    SetConsequences {
        /// Position label.
        position: String,
        /// Partial or bad.
        quality: Quality,
        /// New lines.
        lines: Vec<String>,
    },
    /// Pay stress for a flashback.
    Flashback {
        /// Player name.
        name: String,
        /// Stress paid.
        stress_cost: i32,
    },
}

impl LedgerOp {
    /// Operation name as used in the wire tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpsertClock { .. } => "upsert_clock",
            Self::FillClock { .. } => "fill_clock",
            Self::AdjustMeta { .. } => "adjust_meta",
            Self::SetMeta { .. } => "set_meta",
            Self::UpsertPlayer { .. } => "upsert_player",
            Self::SetActionRating { .. } => "set_action_rating",
            Self::SetStress { .. } => "set_stress",
            Self::AddTrauma { .. } => "add_trauma",
            Self::ConsumePendingTrauma { .. } => "consume_pending_trauma",
            Self::AddHarm { .. } => "add_harm",
            Self::ClearHarm { .. } => "clear_harm",
            Self::AddPlayerXp { .. } => "add_player_xp",
            Self::AddCrewXp { .. } => "add_crew_xp",
            Self::UpdateCrew { .. } => "update_crew",
            Self::UpsertFaction { .. } => "upsert_faction",
            Self::SetFactionStatus { .. } => "set_faction_status",
            Self::SetLastRoll { .. } => "set_last_roll",
            Self::AppendLastRollSuggestion { .. } => "append_last_roll_suggestion",
            Self::SaveSceneConsequencePreset { .. } => "save_scene_consequence_preset",
            Self::ApplySceneConsequencePreset { .. } => "apply_scene_consequence_preset",
            Self::UseTriggerPreset { .. } => "use_trigger_preset",
            Self::SetThresholds { .. } => "set_thresholds",
            Self::SetHouseRules { .. } => "set_house_rules",
            Self::SetConsequences { .. } => "set_consequences",
            Self::Flashback { .. } => "flashback",
        }
    }
}

impl Campaign {
    /// Apply one operation in memory.
    pub fn apply(&mut self, op: &LedgerOp) -> LedgerResult<()> {
        match op {
            LedgerOp::UpsertClock {
                scope,
                name,
                segments,
            } => {
                self.upsert_clock(scope, name, *segments);
            }
            LedgerOp::FillClock { scope, name, n } => {
                self.fill_clock(scope, name, *n)?;
            }
            LedgerOp::AdjustMeta { counter, delta } => self.adjust(*counter, *delta),
            LedgerOp::SetMeta { values } => self.set_meta(*values),
            LedgerOp::UpsertPlayer { name } => {
                self.player_mut(name);
            }
            LedgerOp::SetActionRating {
                name,
                action,
                rating,
            } => {
                self.player_mut(name)
                    .actions
                    .insert(action.clone(), *rating);
            }
            LedgerOp::SetStress { name, value } => self.player_mut(name).set_stress(*value),
            LedgerOp::AddTrauma { name, label } => {
                self.player_mut(name).add_trauma(label);
            }
            LedgerOp::ConsumePendingTrauma { name, label } => {
                self.player_mut(name)
                    .consume_pending_trauma(label.as_deref());
            }
            LedgerOp::AddHarm {
                name,
                level,
                label,
                kind,
            } => self.add_harm(name, *level, label, kind.clone())?,
            LedgerOp::ClearHarm { name, index } => {
                self.player_mut(name).clear_harm(*index);
            }
            LedgerOp::AddPlayerXp { name, n } => self.add_player_xp(name, *n),
            LedgerOp::AddCrewXp { n } => self.add_crew_xp(*n),
            LedgerOp::UpdateCrew { patch } => self.crew.apply(patch),
            LedgerOp::UpsertFaction { name } => {
                self.factions.entry(name.clone()).or_default();
            }
            LedgerOp::SetFactionStatus { name, status } => {
                self.factions.entry(name.clone()).or_default().status = *status;
            }
            LedgerOp::SetLastRoll { record } => self.last_roll = record.clone(),
            LedgerOp::AppendLastRollSuggestion { line } => self.append_last_roll_suggestion(line),
            LedgerOp::SaveSceneConsequencePreset { name } => {
                self.save_scene_consequence_preset(name)
            }
            LedgerOp::ApplySceneConsequencePreset { name } => {
                self.apply_scene_consequence_preset(name)?
            }
            LedgerOp::UseTriggerPreset { name } => self.use_trigger_preset(name)?,
            LedgerOp::SetThresholds { player, crew } => {
                for t in [player, crew].into_iter().flatten() {
                    if *t < 1 {
                        return Err(LedgerError::InvalidArgument(format!(
                            "advance threshold must be positive, got {t}"
                        )));
                    }
                }
                let rules = &mut self.config.house_rules;
                if let Some(t) = player {
                    rules.advance_threshold_player = *t;
                }
                if let Some(t) = crew {
                    rules.advance_threshold_crew = *t;
                }
            }
            LedgerOp::SetHouseRules {
                auto_rep_heat,
                auto_xp_desperate,
            } => {
                let rules = &mut self.config.house_rules;
                if let Some(v) = auto_rep_heat {
                    rules.auto_rep_heat = *v;
                }
                if let Some(v) = auto_xp_desperate {
                    rules.auto_xp_desperate = *v;
                }
            }
            LedgerOp::SetConsequences {
                position,
                quality,
                lines,
            } => self.set_consequences(position, *quality, lines.clone()),
            LedgerOp::Flashback { name, stress_cost } => {
                self.player_mut(name).add_stress(*stress_cost)
            }
        }
        Ok(())
    }
}
