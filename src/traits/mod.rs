/// Module containing the [`CornerCanvas`] trait.
pub mod corner;
/// Module containing the [`LogDensity`] trait.
pub mod log_density;
/// Module containing the [`Model`] trait.
pub mod model;
/// Module containing the [`LogPrior`] trait and its implementations.
pub mod prior;
/// Module containing the [`EnsembleSampler`] trait.
pub mod sampler;

pub use corner::CornerCanvas;
pub use log_density::LogDensity;
pub use model::Model;
pub use prior::{LogPrior, UniformPrior};
pub use sampler::EnsembleSampler;
