use crate::{core::Bounds, DVector, Float};

/// A trait which describes a log-prior density over parameter space.
///
/// Rejection is signalled with `-inf`, which the posterior treats as a hard boundary: the model
/// is never evaluated at a rejected point. Any closure `Fn(&DVector<Float>) -> Float` is a
/// [`LogPrior`].
pub trait LogPrior {
    /// The log-prior density at the parameter vector `theta`, `-inf` for rejected points.
    fn log_prior(&self, theta: &DVector<Float>) -> Float;
}

impl<F> LogPrior for F
where
    F: Fn(&DVector<Float>) -> Float,
{
    fn log_prior(&self, theta: &DVector<Float>) -> Float {
        self(theta)
    }
}

/// A flat prior over the open bounding box: `0` strictly inside the bounds on every dimension
/// simultaneously, `-inf` outside (a value exactly at a bound edge counts as outside).
#[derive(Clone, Debug, PartialEq)]
pub struct UniformPrior {
    bounds: Bounds,
}

impl UniformPrior {
    /// Create a flat prior supported on the interior of the given bounds.
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }
}

impl LogPrior for UniformPrior {
    fn log_prior(&self, theta: &DVector<Float>) -> Float {
        if self.bounds.contains_interior(theta) {
            0.0
        } else {
            Float::NEG_INFINITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn test_uniform_prior() {
        let prior = UniformPrior::new(vec![(0.0, 1.0), (0.0, 1.0)].into());
        assert_eq!(prior.log_prior(&dvector![0.5, 0.5]), 0.0);
        assert_eq!(
            prior.log_prior(&dvector![0.5, 1.5]),
            Float::NEG_INFINITY,
            "outside on one dimension rejects"
        );
        assert_eq!(
            prior.log_prior(&dvector![1.0, 0.5]),
            Float::NEG_INFINITY,
            "a point exactly on the boundary rejects"
        );
    }

    #[test]
    fn test_closure_prior() {
        let prior = |theta: &DVector<Float>| -0.5 * theta[0].powi(2);
        assert_eq!(LogPrior::log_prior(&prior, &dvector![2.0]), -2.0);
    }
}
