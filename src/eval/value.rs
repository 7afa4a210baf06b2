//! Value estimates returned by evaluators.
//!
//! A value estimate is a point or a distribution over the value of a state
//! for its acting player. The search backs up `mean()` by default, and
//! `sample()` when configured for sampled backups.

use std::fmt::Debug;

use rand_distr::{Beta, Normal};

use crate::core::{MctsError, Result, SearchRng};

/// Polymorphic value of a state for its acting player.
pub trait ValueEstimate: Debug + Send + Sync {
    /// Point estimate.
    fn mean(&self) -> f64;

    /// A stochastic draw. Point estimates return their mean.
    fn sample(&self, rng: &mut SearchRng) -> f64;
}

/// The point estimate used by AlphaZero-style evaluators.
impl ValueEstimate for f64 {
    fn mean(&self) -> f64 {
        *self
    }

    fn sample(&self, _rng: &mut SearchRng) -> f64 {
        *self
    }
}

/// Normally distributed value estimate.
#[derive(Clone, Copy, Debug)]
pub struct GaussianValue {
    distribution: Normal<f64>,
}

impl GaussianValue {
    /// Create an estimate with the given mean and standard deviation.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        let distribution =
            Normal::new(mean, std_dev).map_err(|e| MctsError::Distribution(e.to_string()))?;
        Ok(Self { distribution })
    }

    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.distribution.std_dev()
    }
}

impl ValueEstimate for GaussianValue {
    fn mean(&self) -> f64 {
        self.distribution.mean()
    }

    fn sample(&self, rng: &mut SearchRng) -> f64 {
        rng.sample(&self.distribution)
    }
}

/// Beta-distributed value estimate on `[0, 1]`, e.g. a win probability
/// tracked from `alpha - 1` wins and `beta - 1` losses.
#[derive(Clone, Copy, Debug)]
pub struct BetaValue {
    alpha: f64,
    beta: f64,
    distribution: Beta<f64>,
}

impl BetaValue {
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        let distribution =
            Beta::new(alpha, beta).map_err(|e| MctsError::Distribution(e.to_string()))?;
        Ok(Self {
            alpha,
            beta,
            distribution,
        })
    }
}

impl ValueEstimate for BetaValue {
    fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    fn sample(&self, rng: &mut SearchRng) -> f64 {
        rng.sample(&self.distribution)
    }
}
