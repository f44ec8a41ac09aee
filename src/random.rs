//! Abstraction over the random number source, so that readings can be made deterministic.
//! See [Port].

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Interface for the random draws made while generating readings.
/// See [`Gateway`] for implementation.
#[cfg_attr(test, mockall::automock)]
pub trait Port: Send {
    /// Select an index uniformly from `0..len`. `len` must be greater than zero.
    fn choose_index(&mut self, len: usize) -> usize;
    /// Select an integer uniformly from the inclusive range `low..=high`.
    fn int_in_range(&mut self, low: i32, high: i32) -> i32;
}

/// Implementation of [`Port`] backed by [`StdRng`].
pub struct Gateway {
    rng: StdRng,
}

impl Gateway {
    /// Construct a new [`Gateway`] seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Construct a new [`Gateway`] with a fixed `seed`. Two gateways with the same seed produce
    /// the same sequence of draws.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Port for Gateway {
    fn choose_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn int_in_range(&mut self, low: i32, high: i32) -> i32 {
        self.rng.gen_range(low..=high)
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::{Gateway, Port};

    #[test]
    fn test_seeded_gateways_agree() {
        let mut a = Gateway::seeded(7);
        let mut b = Gateway::seeded(7);
        for _ in 0..100 {
            assert_eq!(a.choose_index(5), b.choose_index(5));
            assert_eq!(a.int_in_range(-5, 40), b.int_in_range(-5, 40));
        }
    }

    #[test]
    fn test_int_in_range_is_inclusive() {
        let mut gateway = Gateway::seeded(1);
        let seen: HashSet<i32> = (0..10_000).map(|_| gateway.int_in_range(-5, 40)).collect();
        assert!(seen.iter().all(|t| (-5..=40).contains(t)));
        assert!(seen.contains(&-5));
        assert!(seen.contains(&40));
        assert_eq!(46, seen.len());
    }

    #[test]
    fn test_choose_index_covers_all() {
        let mut gateway = Gateway::from_entropy();
        let seen: HashSet<usize> = (0..1_000).map(|_| gateway.choose_index(5)).collect();
        assert_eq!((0..5).collect::<HashSet<usize>>(), seen);
    }
}
