use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::DEFAULT_RNG_SEED;

/// # Random
/// The generator behind `RND`.
/// Draws are a pure function of the seed and the number of draws since seeding.
#[derive(Debug, Clone)]
pub struct Random {
    seed: u64,
    rng: StdRng,
}

impl Random {
    pub fn new(seed: u64) -> Self {
        Random {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&mut self, seed: u64) {
        *self = Random::new(seed);
    }

    /// Rewinds to the start of the current seed's sequence
    pub fn reset(&mut self) {
        self.seed(self.seed);
    }

    pub fn current_seed(&self) -> u64 {
        self.seed
    }

    /// A value in [0, bound); always 0 when `bound` is 0
    pub fn next(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }
}

impl Default for Random {
    fn default() -> Self {
        Random::new(DEFAULT_RNG_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(random: &mut Random) -> Vec<u32> {
        [1, 2, 10, 0x1_0000, 7, 100]
            .iter()
            .map(|&bound| random.next(bound))
            .collect()
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Random::new(42);
        let mut b = Random::new(42);
        assert_eq!(draws(&mut a), draws(&mut b));
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut random = Random::new(7);
        let first = draws(&mut random);
        random.seed(7);
        assert_eq!(draws(&mut random), first);
        random.reset();
        assert_eq!(draws(&mut random), first);
    }

    #[test]
    fn test_draws_stay_in_bounds() {
        let mut random = Random::default();
        for bound in 1..200 {
            assert!(random.next(bound) < bound);
        }
        assert_eq!(random.next(1), 0);
        assert_eq!(random.next(0), 0);
    }
}
