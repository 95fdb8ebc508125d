//! Resistance rolls: stress paid to avoid a consequence.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::dice::{D6_SIDES, Roll, roll_d6};

/// Result of a resistance roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResistanceOutcome {
    /// Raw faces in draw order.
    pub rolls: Roll,
    /// Highest die.
    pub best: u32,
    /// Stress paid: six minus the best die.
    pub stress_cost: u32,
}

impl ResistanceOutcome {
    /// Price already-drawn faces.
    pub fn grade(rolls: Roll) -> Self {
        let best = rolls.highest();
        Self {
            stress_cost: D6_SIDES.saturating_sub(best),
            rolls,
            best,
        }
    }
}

/// Roll `max(1, pool)` dice and price the resistance.
pub fn resistance_outcome(pool: i32, rng: &mut StdRng) -> ResistanceOutcome {
    ResistanceOutcome::grade(roll_d6(pool, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn six_is_free() {
        let out = ResistanceOutcome::grade(Roll::from_values([2, 6]));
        assert_eq!(out.stress_cost, 0);
    }

    #[test]
    fn one_costs_five() {
        let out = ResistanceOutcome::grade(Roll::from_values([1]));
        assert_eq!(out.stress_cost, 5);
    }

    proptest! {
        #[test]
        fn stress_cost_is_six_minus_best(pool in -3i32..10, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = resistance_outcome(pool, &mut rng);
            prop_assert_eq!(out.rolls.count(), pool.max(1) as usize);
            prop_assert_eq!(out.best, out.rolls.highest());
            prop_assert_eq!(out.stress_cost, 6u32.saturating_sub(out.best));
        }
    }
}
