//! Six-sided dice pools.
//!
//! Every roll in the system is a pool of d6s. A pool can never be truly
//! empty when dice must be drawn: asking for zero or fewer dice still
//! draws one. Nor can it grow without bound: pools cap at [`MAX_POOL`].

pub mod roll;

pub use roll::Roll;

use rand::Rng;
use rand::rngs::StdRng;

/// Number of faces on every die.
pub const D6_SIDES: u32 = 6;

/// Largest pool ever drawn. Bigger requests are clamped to this.
pub const MAX_POOL: i32 = 30;

/// Draw `n` uniformly random d6 values, clamped to `1..=MAX_POOL`.
pub fn roll_d6(n: i32, rng: &mut StdRng) -> Roll {
    let count = n.clamp(1, MAX_POOL) as usize;
    let values = (0..count)
        .map(|_| rng.random_range(1..=D6_SIDES))
        .collect();
    Roll { values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn draws_requested_count() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(roll_d6(4, &mut rng).count(), 4);
    }

    #[test]
    fn never_draws_zero_dice() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(roll_d6(0, &mut rng).count(), 1);
        assert_eq!(roll_d6(-3, &mut rng).count(), 1);
    }

    #[test]
    fn huge_pools_are_capped() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(roll_d6(MAX_POOL + 1, &mut rng).count(), MAX_POOL as usize);
        assert_eq!(roll_d6(i32::MAX, &mut rng).count(), MAX_POOL as usize);
    }

    #[test]
    fn values_are_d6_faces() {
        let mut rng = StdRng::seed_from_u64(7);
        let roll = roll_d6(50, &mut rng);
        assert!(roll.values.iter().all(|v| (1..=D6_SIDES).contains(v)));
    }

    #[test]
    fn deterministic_with_seed() {
        let mut rng1 = StdRng::seed_from_u64(99);
        let mut rng2 = StdRng::seed_from_u64(99);
        assert_eq!(roll_d6(5, &mut rng1).values, roll_d6(5, &mut rng2).values);
    }
}
