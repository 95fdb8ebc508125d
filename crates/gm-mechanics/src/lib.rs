//! Game mechanics for a heist-and-scoundrels tabletop engine.
//!
//! Provides d6 pool rolling with highest-die grading, resistance and
//! fortune rolls, position/effect tiers, saturating progress clocks, and
//! the data-driven rule triggers and consequence tables that infer
//! position/effect from free text and suggest fallout.
//! Everything here is pure: no state besides the RNG handed in.

pub mod clock;
pub mod dice;
pub mod error;
pub mod position;
pub mod resolution;
pub mod rules;

pub use clock::Clock;
pub use dice::{MAX_POOL, Roll, roll_d6};
pub use error::{MechError, MechResult};
pub use position::{Effect, Position, effect_to_segments};
pub use resolution::{
    ActionOutcome, Quality, ResistanceOutcome, action_outcome, fortune_outcome,
    resistance_outcome,
};
pub use rules::{ConsequenceLines, ConsequenceTable, Inference, Trigger};
