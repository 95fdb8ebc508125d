use gm_mechanics::{Effect, Position, Quality, Roll};
use serde::{Deserialize, Serialize};

/// What produced a [`LastRoll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollKind {
    /// Action roll.
    Action,
    /// Resistance roll.
    Resist,
    /// Fortune roll.
    Fortune,
    /// Engagement roll.
    Engagement,
    /// Downtime acknowledgement.
    Downtime,
    /// Placeholder created to carry suggestion lines.
    System,
}

/// Pool modifiers as applied to an action roll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Modifiers {
    /// Set up by a teammate.
    pub setup: bool,
    /// Assisted (+1d).
    pub assist: bool,
    /// Who assisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist_actor: Option<String>,
    /// Pushed (+1d).
    pub push: bool,
    /// Devil's bargain (+1d).
    pub bargain: bool,
    /// Flat bonus dice.
    pub bonus: i32,
    /// Dice removed for harm.
    pub harm_penalty: i32,
}

/// Clock an action roll advances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetClock {
    /// Clock name.
    pub name: String,
    /// Capacity if the clock has to be created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<u32>,
}

/// The most recently resolved roll of a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRoll {
    /// Roll kind.
    pub kind: RollKind,
    /// Acting player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    /// Action rated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Position the roll was made at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Effect of the roll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
    /// Requested pool size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dice: Option<i32>,
    /// Raw dice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolls: Option<Roll>,
    /// Kept die.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best: Option<u32>,
    /// Graded outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    /// Two or more sixes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crit: Option<bool>,
    /// Stress paid on a resistance roll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_cost: Option<u32>,
    /// Scene start position from an engagement roll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_position: Option<Position>,
    /// Modifiers on an action roll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Modifiers>,
    /// Clock the roll targeted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_clock: Option<TargetClock>,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Suggested consequence lines.
    #[serde(default)]
    pub consequences: Vec<String>,
}

impl LastRoll {
    /// An empty record of the given kind.
    pub fn new(kind: RollKind) -> Self {
        Self {
            kind,
            actor: None,
            action: None,
            position: None,
            effect: None,
            dice: None,
            rolls: None,
            best: None,
            quality: None,
            crit: None,
            stress_cost: None,
            start_position: None,
            modifiers: None,
            target_clock: None,
            notes: None,
            consequences: Vec::new(),
        }
    }

    /// Append a suggestion unless it is already listed. Returns true if added.
    pub fn add_suggestion(&mut self, line: &str) -> bool {
        if self.consequences.iter().any(|l| l == line) {
            return false;
        }
        self.consequences.push(line.to_string());
        true
    }
}
