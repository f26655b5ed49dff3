/// [`Bound`] and [`Bounds`] types for binding parameters to a range.
pub mod bound;
/// [`Dataset`] type holding the observed data of a fit.
pub mod dataset;
/// [`Error`] type for structured validation failures.
pub mod error;
/// [`Point`] type for defining a point in the parameter space.
pub mod point;

pub use bound::{Bound, Bounds};
pub use dataset::Dataset;
pub use error::Error;
pub use point::Point;
