use crate::{utils::SampleFloat, DVector, Float};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
};

/// An enum that describes a bound/limit on a parameter of a fit.
///
/// [`Bound`]s are used both to seed walker ensembles (uniform draws inside the bound) and as the
/// support of the default uniform prior, where membership is tested on the open interval.
#[derive(Default, Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Bound {
    #[default]
    /// `(-inf, +inf)`
    NoBound,
    /// `(min, +inf)`
    LowerBound(Float),
    /// `(-inf, max)`
    UpperBound(Float),
    /// `(min, max)`
    LowerAndUpperBound(Float, Float),
}
impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lower(), self.upper())
    }
}
impl From<(Float, Float)> for Bound {
    fn from(value: (Float, Float)) -> Self {
        assert!(value.0 < value.1);
        match (value.0.is_finite(), value.1.is_finite()) {
            (true, true) => Self::LowerAndUpperBound(value.0, value.1),
            (true, false) => Self::LowerBound(value.0),
            (false, true) => Self::UpperBound(value.1),
            (false, false) => Self::NoBound,
        }
    }
}

impl Bound {
    /// Get a value in the uniform distribution between `lower` and `upper`.
    pub fn get_uniform(&self, rng: &mut Rng) -> Float {
        rng.range(self.lower(), self.upper())
    }
    /// Checks whether the given `value` is compatible with the bound (closed interval).
    pub fn contains(&self, value: Float) -> bool {
        match self {
            Self::NoBound => true,
            Self::LowerBound(lb) => value >= *lb,
            Self::UpperBound(ub) => value <= *ub,
            Self::LowerAndUpperBound(lb, ub) => value >= *lb && value <= *ub,
        }
    }
    /// Checks whether the given `value` lies strictly inside the bound (open interval; a value
    /// exactly at a bound edge is rejected).
    pub fn contains_interior(&self, value: Float) -> bool {
        match self {
            Self::NoBound => true,
            Self::LowerBound(lb) => value > *lb,
            Self::UpperBound(ub) => value < *ub,
            Self::LowerAndUpperBound(lb, ub) => value > *lb && value < *ub,
        }
    }
    /// Returns the lower bound or `-inf` if there is none.
    pub const fn lower(&self) -> Float {
        match self {
            Self::NoBound | Self::UpperBound(_) => Float::NEG_INFINITY,
            Self::LowerBound(lb) | Self::LowerAndUpperBound(lb, _) => *lb,
        }
    }
    /// Returns the upper bound or `+inf` if there is none.
    pub const fn upper(&self) -> Float {
        match self {
            Self::NoBound | Self::LowerBound(_) => Float::INFINITY,
            Self::UpperBound(ub) | Self::LowerAndUpperBound(_, ub) => *ub,
        }
    }
}

/// A struct that contains a list of [`Bound`]s, one per free parameter.
#[derive(Default, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bounds(Vec<Bound>);

impl Bounds {
    /// Returns the inner Vector of bounds.
    pub fn into_inner(self) -> Vec<Bound> {
        self.0
    }
    /// Draw a random vector uniformly distributed inside the bounds.
    pub fn sample_uniform(&self, rng: &mut Rng) -> DVector<Float> {
        DVector::from_iterator(self.len(), self.iter().map(|bound| bound.get_uniform(rng)))
    }
    /// Checks whether `x` lies strictly inside the bounding box on every dimension
    /// simultaneously.
    pub fn contains_interior(&self, x: &DVector<Float>) -> bool {
        x.len() == self.len()
            && x.iter()
                .zip(self.iter())
                .all(|(value, bound)| bound.contains_interior(*value))
    }
}

impl From<Vec<Bound>> for Bounds {
    fn from(value: Vec<Bound>) -> Self {
        Self(value)
    }
}
impl From<Vec<(Float, Float)>> for Bounds {
    fn from(value: Vec<(Float, Float)>) -> Self {
        Self(value.into_iter().map(Bound::from).collect())
    }
}

impl Deref for Bounds {
    type Target = Vec<Bound>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Bounds {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
