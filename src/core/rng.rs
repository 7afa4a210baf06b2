//! Deterministic random number generation for search.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Samplers**: uniform, weighted-index, Dirichlet and arbitrary
//!   `rand_distr` distributions in one place
//!
//! ```
//! use rust_mcts::core::SearchRng;
//!
//! let mut rng = SearchRng::new(42);
//! let mut again = SearchRng::new(42);
//! assert_eq!(rng.uniform(), again.uniform());
//! assert_eq!(rng.choose_weighted(&[0.0, 2.0]), Some(1));
//! ```

use rand::distributions::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Dirichlet;

use super::error::{MctsError, Result};

/// Deterministic RNG threaded explicitly through the search.
///
/// Uses ChaCha8 for speed while maintaining good statistical quality.
#[derive(Clone, Debug)]
pub struct SearchRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SearchRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Choose an index with probability proportional to its weight.
    ///
    /// Weights do not need to sum to 1.0. Returns `None` if weights are
    /// empty or sum to zero.
    pub fn choose_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return None;
        }

        let mut threshold = self.uniform() * total;

        for (i, &weight) in weights.iter().enumerate() {
            threshold -= weight;
            if threshold <= 0.0 && weight > 0.0 {
                return Some(i);
            }
        }

        // Floating point edge case - return last non-zero weight
        weights.iter().rposition(|&w| w > 0.0)
    }

    /// Draw from a symmetric or asymmetric Dirichlet distribution.
    ///
    /// A single concentration yields `[1.0]`, the only point of the
    /// one-dimensional simplex.
    pub fn dirichlet(&mut self, alpha: &[f64]) -> Result<Vec<f64>> {
        match alpha {
            [] => Err(MctsError::Distribution("dirichlet needs at least one concentration".into())),
            [a] if *a > 0.0 => Ok(vec![1.0]),
            [a] => Err(MctsError::Distribution(format!("concentration must be positive, got {a}"))),
            _ => {
                let dirichlet =
                    Dirichlet::new(alpha).map_err(|e| MctsError::Distribution(e.to_string()))?;
                Ok(dirichlet.sample(&mut self.inner))
            }
        }
    }

    /// Draw a single value from any `f64` distribution.
    pub fn sample<D: Distribution<f64>>(&mut self, distribution: &D) -> f64 {
        distribution.sample(&mut self.inner)
    }
}
