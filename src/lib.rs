//! `sedfit` provides Markov-Chain Monte-Carlo error estimation for astronomical model fits with a
//! straightforward, trait-based interface. The user supplies an observed [`Dataset`]
//! ($`x`$, $`y`$, $`\sigma_y`$), a [`Model`](`traits::Model`) implementing
//! $`f(\theta, x) \to \hat{y}`$, and per-parameter [`Bound`]s; the crate assembles the Gaussian
//! log-posterior
//! ```math
//! \ln \pi(\theta) = \ln p(\theta) - \frac{1}{2}\sum_i \left(\frac{y_i - f(\theta, x_i)}{\sigma_i}\right)^2
//! ```
//! and drives a walker ensemble over it. The ensemble-stepping algorithm and the corner-plot
//! renderer are both injected dependencies (the [`EnsembleSampler`](`traits::EnsembleSampler`) and
//! [`CornerCanvas`](`traits::CornerCanvas`) traits), so the inference core stays independent of
//! any particular sampler or plotting backend.
//!
//! # Quick Start
//!
//! Fitting a one-parameter linear model with the bundled random-walk reference sampler:
//!
//! ```rust
//! use fastrand::Rng;
//! use sedfit::prelude::*;
//! use sedfit::samplers::RandomWalk;
//! use std::convert::Infallible;
//!
//! struct Linear;
//! impl Model for Linear {
//!     fn predict(
//!         &self,
//!         theta: &DVector<Float>,
//!         x: &DVector<Float>,
//!         _user_data: &mut (),
//!     ) -> Result<DVector<Float>, Infallible> {
//!         Ok(x.map(|xi| theta[0] * xi))
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let data = Dataset::from_slices(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], &[0.1, 0.1, 0.1])?;
//!     let bounds: Bounds = vec![Bound::LowerAndUpperBound(0.0, 5.0)].into();
//!     let mut session = Inference::new(data, Linear, bounds);
//!     let mut rng = Rng::with_seed(0);
//!     session.init_walkers(&mut rng);
//!     let mut sampler = RandomWalk::new(0.1, Rng::with_seed(1));
//!     session.run(&mut sampler, 1000, 200, &mut ())?;
//!     let mean = session.posterior_mean().ok_or("empty chain")?;
//!     assert!((mean[0] - 2.0).abs() < 0.1);
//!     Ok(())
//! }
//! ```
//!
//! # Bounds and priors
//!
//! Parameter bounds double as the default prior: [`UniformPrior`](`traits::UniformPrior`) returns
//! `0` strictly inside the bounding box and `-inf` outside, which the posterior turns into a hard
//! rejection boundary without ever evaluating the model out of bounds. Any other prior can be
//! supplied as a [`LogPrior`](`traits::LogPrior`) implementation (closures over a parameter
//! vector work too).
//!
//! # Survey utilities
//!
//! The [`field`] module carries a strict box-membership cut for the COSMOS field, and [`labels`]
//! holds the plot label strings and physical constants shared by the analysis scripts built on
//! this crate.
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Module containing core data types ([`Bound`], [`Dataset`], [`Point`], [`Error`]).
pub mod core;
/// Module containing the sky-field membership cut.
pub mod field;
/// Module containing plot label strings and physical constants.
pub mod labels;
/// Module containing the walker ensemble, the Gaussian posterior, and the inference session.
pub mod mcmc;
/// Module containing corner-plot geometry and export collaborators.
pub mod plotting;
/// Module containing reference implementations of the sampler trait.
pub mod samplers;
/// Module containing the capability traits at the seams of the inference core.
pub mod traits;
/// Module containing random-sampling helper traits.
pub mod utils;

pub use crate::core::{Bound, Bounds, Dataset, Error, Point};

pub use nalgebra::{DMatrix, DVector};

/// Prelude module containing everything needed to run a fit end to end.
pub mod prelude {
    pub use crate::{
        core::{Bound, Bounds, Dataset, Error, Point},
        field, labels,
        mcmc::{Ensemble, Inference, Posterior, Walker},
        plotting::{ConfidenceEllipse, CornerOptions, OverlayOutcome, PickleCorner},
        samplers::RandomWalk,
        traits::{CornerCanvas, EnsembleSampler, LogDensity, LogPrior, Model, UniformPrior},
        utils::SampleFloat,
        DMatrix, DVector, Float, PI,
    };
}

/// The floating-point type used throughout the crate (`f64` by default, `f32` with the `f32`
/// feature).
#[cfg(not(feature = "f32"))]
pub type Float = f64;

/// The floating-point type used throughout the crate (`f64` by default, `f32` with the `f32`
/// feature).
#[cfg(feature = "f32")]
pub type Float = f32;

/// The mathematical constant π at the precision of [`Float`].
#[cfg(not(feature = "f32"))]
pub const PI: Float = std::f64::consts::PI;

/// The mathematical constant π at the precision of [`Float`].
#[cfg(feature = "f32")]
pub const PI: Float = std::f32::consts::PI;
