//! Progress clocks.
//!
//! A clock is a named tracker with a fixed number of segments and a fill
//! count that only ever grows and saturates at capacity.

use serde::{Deserialize, Serialize};

/// A named, segmented progress tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    /// Name, unique within the owning collection.
    pub name: String,
    /// Capacity (at least 1).
    pub segments: u32,
    /// Ticked segments, `0..=segments`.
    pub filled: u32,
}

impl Clock {
    /// Create an empty clock with at least one segment.
    pub fn new(name: impl Into<String>, segments: u32) -> Self {
        Self {
            name: name.into(),
            segments: segments.max(1),
            filled: 0,
        }
    }

    /// Tick `n` segments, saturating at capacity. Returns the new fill.
    pub fn fill(&mut self, n: u32) -> u32 {
        self.filled = self.filled.saturating_add(n).min(self.segments);
        self.filled
    }

    /// Change capacity, keeping progress but never above the new capacity.
    pub fn resize(&mut self, segments: u32) {
        self.segments = segments.max(1);
        self.filled = self.filled.min(self.segments);
    }

    /// Returns true once every segment is ticked.
    pub fn is_complete(&self) -> bool {
        self.filled >= self.segments
    }
}

impl std::fmt::Display for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}/{}", self.name, self.filled, self.segments)
    }
}
