use gm_mechanics::Clock;
use serde::{Deserialize, Serialize};

/// A faction's standing and its own clocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Faction {
    /// Standing with the crew; unclamped.
    pub status: i32,
    /// Faction-scoped clocks.
    pub clocks: Vec<Clock>,
}
