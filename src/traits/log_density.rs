use crate::{DVector, Float};
use std::convert::Infallible;

/// A trait which describes an unnormalized log-density $`\ln \pi(\mathbb{R}^n) \to \mathbb{R}`$
/// over parameter space.
///
/// This is the black-box callable handed to [`EnsembleSampler`](`super::EnsembleSampler`)s: the
/// sampler sees only a function of the parameter vector and knows nothing about datasets, models,
/// or priors. A `user_data: &mut U` field can be used to pass external arguments to the function
/// during sampling, and a generic `E` represents any possible errors returned during evaluation.
pub trait LogDensity<U = (), E = Infallible> {
    /// The evaluation of the log-density at a point `x` with the given arguments/user data.
    /// Out-of-support points are signalled with `-inf`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Implementors whose evaluation never fails
    /// should use [`std::convert::Infallible`].
    fn log_density(&self, x: &DVector<Float>, user_data: &mut U) -> Result<Float, E>;
}
