//! Structured results of resolved intents.

use gm_ledger::Modifiers;
use gm_mechanics::{Effect, Inference, Position, Quality, Roll};
use serde::{Deserialize, Serialize};

/// Kind-specific payload describing what a resolution did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolResult {
    /// An action roll.
    ActionRoll(ActionResult),
    /// A resistance roll.
    Resistance(ResistResult),
    /// A fortune roll.
    Fortune(FortuneResult),
    /// An engagement roll.
    Engagement(EngagementResult),
    /// A downtime acknowledgement.
    DowntimeAck(DowntimeAck),
}

impl ToolResult {
    /// Wire name of the result type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ActionRoll(_) => "action_roll",
            Self::Resistance(_) => "resistance",
            Self::Fortune(_) => "fortune",
            Self::Engagement(_) => "engagement",
            Self::DowntimeAck(_) => "downtime_ack",
        }
    }

    /// Raw dice, if the result rolled any.
    pub fn rolls(&self) -> Option<&Roll> {
        match self {
            Self::ActionRoll(r) => Some(&r.rolls),
            Self::Resistance(r) => Some(&r.rolls),
            Self::Fortune(r) => Some(&r.rolls),
            Self::Engagement(r) => Some(&r.rolls),
            Self::DowntimeAck(_) => None,
        }
    }

    /// Kept die, if the result rolled any.
    pub fn best(&self) -> Option<u32> {
        match self {
            Self::ActionRoll(r) => Some(r.best),
            Self::Resistance(r) => Some(r.best),
            Self::Fortune(r) => Some(r.best),
            Self::Engagement(r) => Some(r.best),
            Self::DowntimeAck(_) => None,
        }
    }

    /// Graded quality, for kinds that grade.
    pub fn quality(&self) -> Option<Quality> {
        match self {
            Self::ActionRoll(r) => Some(r.quality),
            Self::Fortune(r) => Some(r.quality),
            Self::Engagement(r) => Some(r.quality),
            Self::Resistance(_) | Self::DowntimeAck(_) => None,
        }
    }
}

/// Where a target clock stands after an action roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockProgress {
    /// Clock name.
    pub name: String,
    /// Segments ticked by this roll.
    pub ticked: u32,
    /// Fill after the roll.
    pub filled: u32,
    /// Capacity.
    pub segments: u32,
    /// The clock did not exist and was created.
    pub created: bool,
}

/// Outcome of an action roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Pool after modifiers (0 means worst of two).
    pub dice: i32,
    /// Raw dice.
    pub rolls: Roll,
    /// Kept die.
    pub best: u32,
    /// Graded outcome.
    pub quality: Quality,
    /// Two or more sixes.
    pub crit: bool,
    /// Acting player.
    pub actor: Option<String>,
    /// Action rated.
    pub action: Option<String>,
    /// Position, proposed or inferred.
    pub position: Option<Position>,
    /// Effect, proposed or inferred; Standard when unknown.
    pub effect: Effect,
    /// Trigger that filled a missing position or effect.
    pub inferred: Option<Inference>,
    /// Suggested fallout.
    pub consequences: Vec<String>,
    /// Modifiers applied to the pool.
    pub modifiers: Modifiers,
    /// Target clock after the roll, if one was advanced.
    pub clock: Option<ClockProgress>,
}

/// Outcome of a resistance roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResistResult {
    /// Requested pool.
    pub dice: i32,
    /// Raw dice.
    pub rolls: Roll,
    /// Kept die.
    pub best: u32,
    /// Stress paid.
    pub stress_cost: u32,
    /// Player who paid it.
    pub actor: Option<String>,
}

/// Outcome of a fortune roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FortuneResult {
    /// Requested pool.
    pub dice: i32,
    /// Raw dice.
    pub rolls: Roll,
    /// Kept die.
    pub best: u32,
    /// Graded outcome.
    pub quality: Quality,
    /// Two or more sixes.
    pub crit: bool,
}

/// Outcome of an engagement roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementResult {
    /// Requested pool.
    pub dice: i32,
    /// Raw dice.
    pub rolls: Roll,
    /// Kept die.
    pub best: u32,
    /// Graded outcome.
    pub quality: Quality,
    /// Two or more sixes.
    pub crit: bool,
    /// Position the scene starts at.
    pub start_position: Position,
}

/// Acknowledgement of a downtime beat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DowntimeAck {
    /// Player taking the activity.
    pub actor: Option<String>,
    /// Activity name.
    pub activity: Option<String>,
}
