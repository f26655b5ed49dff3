use thiserror::Error;

/// Structured errors raised by this crate's validating constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A named quantity does not have the expected dimension.
    #[error("dim({name}) is not {expected} (got {found})")]
    DimensionMismatch {
        /// The name of the offending quantity.
        name: &'static str,
        /// The dimension the quantity was expected to have.
        expected: usize,
        /// The dimension the quantity actually had.
        found: usize,
    },
}
