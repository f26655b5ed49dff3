use crate::{mcmc::Ensemble, traits::LogDensity};
use std::convert::Infallible;

/// A trait representing an ensemble-stepping MCMC algorithm.
///
/// The algorithm itself is an external collaborator: the
/// [`Inference`](`crate::mcmc::Inference`) session owns the driver loop and calls
/// [`initialize`](`EnsembleSampler::initialize`) once, then [`step`](`EnsembleSampler::step`)
/// once per sampling step, handing the sampler the log-posterior as an opaque [`LogDensity`] and
/// the walker [`Ensemble`] to advance. Implementations append exactly one position per walker per
/// step (re-pushing the shared current position on rejection) and may evaluate walkers in any
/// order, or in parallel.
pub trait EnsembleSampler<U = (), E = Infallible> {
    /// Any setup work done before the main steps of the algorithm, typically evaluating the
    /// log-density at every walker's seed position.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if a log-density evaluation fails. See [`LogDensity::log_density`] for
    /// more information.
    fn initialize(
        &mut self,
        func: &dyn LogDensity<U, E>,
        user_data: &mut U,
        ensemble: &mut Ensemble,
    ) -> Result<(), E>;

    /// The main "step" of the algorithm, which advances every walker in the ensemble by one
    /// position.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if a log-density evaluation fails. See [`LogDensity::log_density`] for
    /// more information.
    fn step(
        &mut self,
        i_step: usize,
        func: &dyn LogDensity<U, E>,
        user_data: &mut U,
        ensemble: &mut Ensemble,
    ) -> Result<(), E>;
}
