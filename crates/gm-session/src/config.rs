//! Configuration for a resolution session.

/// Configuration for a [`crate::Resolver`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible rolls; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Capacity of target clocks created on the fly.
    pub default_clock_segments: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            default_clock_segments: 4,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the capacity of auto-created clocks (at least 1).
    pub fn with_default_clock_segments(mut self, segments: u32) -> Self {
        self.default_clock_segments = segments.max(1);
        self
    }
}
