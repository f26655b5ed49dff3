use crate::{DMatrix, Float, PI};
use serde::{Deserialize, Serialize};

/// The rotation angle (in degrees) of the principal axis of a 2×2 covariance matrix,
/// ```math
/// \theta = \frac{1}{2}\arctan\left(\frac{2\,c_{10}}{c_{00} - c_{11}}\right)
/// ```
///
/// A diagonal covariance gives `0`. When `c_00 == c_11` the argument degenerates to ±∞ (or NaN
/// for an exactly diagonal matrix), which propagates through the arctangent as a degenerate
/// orientation rather than an error; callers that need a guaranteed-valid ellipse should go
/// through [`ConfidenceEllipse::from_covariance`].
///
/// # Panics
///
/// Panics if `cov` is not 2×2.
pub fn ellipse_angle(cov: &DMatrix<Float>) -> Float {
    assert_eq!(cov.shape(), (2, 2), "covariance submatrix must be 2x2");
    0.5 * 180.0 * (2.0 * cov[(1, 0)] / (cov[(0, 0)] - cov[(1, 1)])).atan() / PI
}

/// A confidence ellipse derived from a 2×2 covariance submatrix, in the coordinates of one
/// off-diagonal corner-plot panel.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceEllipse {
    /// The ellipse center (the mean of the parameter pair).
    pub center: (Float, Float),
    /// The full width along the first principal axis.
    pub width: Float,
    /// The full height along the second principal axis.
    pub height: Float,
    /// The rotation angle of the principal axis in degrees.
    pub angle: Float,
}

impl ConfidenceEllipse {
    /// Build the `sigma`-scaled confidence ellipse of a 2×2 covariance submatrix centered on
    /// `center`: the axis lengths are `2·sigma·√λ` for the eigenvalues `λ` of the submatrix,
    /// rotated by [`ellipse_angle`].
    ///
    /// Returns [`None`] when the eigendecomposition fails to converge or an eigenvalue is not
    /// strictly positive and finite (a singular or otherwise degenerate covariance), so callers
    /// can skip the affected panel explicitly instead of drawing garbage.
    ///
    /// # Panics
    ///
    /// Panics if `cov` is not 2×2.
    pub fn from_covariance(
        center: (Float, Float),
        cov: &DMatrix<Float>,
        sigma: Float,
    ) -> Option<Self> {
        assert_eq!(cov.shape(), (2, 2), "covariance submatrix must be 2x2");
        let eigen = cov.clone().try_symmetric_eigen(Float::EPSILON, 250)?;
        let (lambda_0, lambda_1) = (eigen.eigenvalues[0], eigen.eigenvalues[1]);
        if !(lambda_0.is_finite() && lambda_1.is_finite() && lambda_0 > 0.0 && lambda_1 > 0.0) {
            return None;
        }
        Some(Self {
            center,
            width: 2.0 * sigma * lambda_0.sqrt(),
            height: 2.0 * sigma * lambda_1.sqrt(),
            angle: ellipse_angle(cov),
        })
    }
}
