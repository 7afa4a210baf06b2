//! Dirichlet noise for the root prior.
//!
//! Mixed into the prior before the root is expanded, to keep self-play
//! from always following the evaluator's favourite line:
//! P' = (1 - epsilon) * P + epsilon * noise

use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::core::{MctsError, Result, SearchRng};
use crate::eval::ActionProbabilities;

/// Symmetric Dirichlet noise with concentration `alpha`, mixed in with
/// weight `epsilon`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirichletNoise {
    pub alpha: f64,
    pub epsilon: f64,
}

impl DirichletNoise {
    pub fn new(alpha: f64, epsilon: f64) -> Self {
        Self { alpha, epsilon }
    }

    /// Whether mixing leaves every prior unchanged.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.epsilon == 0.0
    }

    /// Mix noise into `prior`, one draw over all of its actions.
    ///
    /// With `epsilon == 0` the prior is returned unchanged, bit for bit,
    /// and no randomness is consumed.
    pub fn apply_to_prior<A: Clone + Eq + Hash>(
        &self,
        prior: &ActionProbabilities<A>,
        rng: &mut SearchRng,
    ) -> Result<ActionProbabilities<A>> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(MctsError::Distribution(format!(
                "noise epsilon must be in [0, 1], got {}",
                self.epsilon
            )));
        }
        if self.is_noop() || prior.is_empty() {
            return Ok(prior.clone());
        }

        let alpha = vec![self.alpha; prior.len()];
        let noise = rng.dirichlet(&alpha)?;

        let eps = self.epsilon;
        Ok(prior
            .iter()
            .zip(noise)
            .map(|((action, &p), n)| (action.clone(), (1.0 - eps) * p + eps * n))
            .collect())
    }
}

impl Default for DirichletNoise {
    /// AlphaZero's chess settings.
    fn default() -> Self {
        Self::new(0.3, 0.25)
    }
}
