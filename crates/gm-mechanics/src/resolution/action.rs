//! Action and fortune rolls.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::dice::{Roll, roll_d6};
use crate::resolution::Quality;

/// Graded result of an action or fortune roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Raw faces in draw order.
    pub rolls: Roll,
    /// The kept die: highest normally, lowest for a zero-dice pool.
    pub best: u32,
    /// Graded outcome.
    pub quality: Quality,
    /// Two or more sixes were rolled.
    pub crit: bool,
}

impl ActionOutcome {
    /// Grade already-drawn faces. `zero_dice` keeps the lowest die instead
    /// of the highest.
    pub fn grade(rolls: Roll, zero_dice: bool) -> Self {
        let best = if zero_dice {
            rolls.lowest()
        } else {
            rolls.highest()
        };
        let sixes = rolls.sixes();
        let quality = Quality::grade(best, sixes);
        Self {
            crit: sixes >= 2,
            rolls,
            best,
            quality,
        }
    }
}

/// Roll an action pool.
///
/// A requested pool of zero or less rolls two dice and keeps the worst;
/// any positive pool (including exactly one) keeps the best.
pub fn action_outcome(pool: i32, rng: &mut StdRng) -> ActionOutcome {
    let zero_dice = pool <= 0;
    let rolls = if zero_dice {
        roll_d6(2, rng)
    } else {
        roll_d6(pool, rng)
    };
    ActionOutcome::grade(rolls, zero_dice)
}

/// Roll a fortune or engagement pool. Graded exactly like an action.
pub fn fortune_outcome(pool: i32, rng: &mut StdRng) -> ActionOutcome {
    action_outcome(pool, rng)
}
