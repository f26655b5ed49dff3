use std::sync::Arc;

use fastrand::Rng;
use parking_lot::RwLock;

use crate::{
    core::Point,
    mcmc::Ensemble,
    traits::{EnsembleSampler, LogDensity},
    utils::SampleFloat,
    Float,
};

/// A per-walker Gaussian random-walk Metropolis stepper.
///
/// This is the reference implementation of [`EnsembleSampler`], mainly intended for tests,
/// benchmarks, and examples: every walker proposes an isotropic Gaussian perturbation of its
/// current position and accepts it with the Metropolis probability
/// `min{1, π(Y)/π(Xₖ)}`. Walkers do not interact, so mixing on strongly correlated posteriors is
/// slow; production analyses should plug in an affine-invariant or slice ensemble sampler
/// through the same trait.
#[derive(Clone, Debug)]
pub struct RandomWalk {
    sigma: Float,
    rng: Rng,
}

impl RandomWalk {
    /// Create a new [`RandomWalk`] with the given proposal standard deviation (applied to every
    /// dimension) and random number generator.
    pub fn new(sigma: Float, rng: Rng) -> Self {
        Self { sigma, rng }
    }
}

impl<U, E> EnsembleSampler<U, E> for RandomWalk {
    fn initialize(
        &mut self,
        func: &dyn LogDensity<U, E>,
        user_data: &mut U,
        ensemble: &mut Ensemble,
    ) -> Result<(), E> {
        ensemble.evaluate_latest(func, user_data)
    }

    fn step(
        &mut self,
        _i_step: usize,
        func: &dyn LogDensity<U, E>,
        user_data: &mut U,
        ensemble: &mut Ensemble,
    ) -> Result<(), E> {
        let mut positions = Vec::with_capacity(ensemble.len());
        for walker in ensemble.iter() {
            let current = walker.get_latest();
            // Xₖ -> Y = Xₖ + N(0, σ²I)
            let mut proposal = Point::from(
                current
                    .read()
                    .x
                    .map(|x_i| x_i + self.rng.normal(0.0, self.sigma)),
            );
            proposal.log_density(func, user_data)?;
            // Pr[accept] = min{1, π(Y)/π(Xₖ)}, computed in log space
            let r = proposal.fx_checked() - current.read().fx_checked();
            if r >= 0.0 || self.rng.float().ln() < r {
                positions.push(Arc::new(RwLock::new(proposal)));
            } else {
                // rejected: the walker re-pushes its current position, shared
                positions.push(current.clone());
            }
        }
        ensemble.push(positions);
        Ok(())
    }
}
