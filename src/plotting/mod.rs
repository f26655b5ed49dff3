use crate::{DMatrix, DVector, Float};
use serde::{Deserialize, Serialize};

/// [`ConfidenceEllipse`] geometry and the covariance-angle formula.
pub mod ellipse;
/// [`PickleCorner`] canvas exporting corner-plot payloads for Python renderers.
pub mod pickle;

pub use ellipse::{ellipse_angle, ConfidenceEllipse};
pub use pickle::PickleCorner;

/// The Gaussian-equivalent confidence-contour levels `1 - exp(-k²/2)` for `k = 1..=n`.
///
/// `sigma_levels(3)` gives the familiar 1σ/2σ/3σ contours used as the default for corner plots.
pub fn sigma_levels(n: usize) -> Vec<Float> {
    (1..=n)
        .map(|k| 1.0 - (-((k * k) as Float) / 2.0).exp())
        .collect()
}

/// Options controlling a corner-plot summary.
///
/// `truths` doubles as the set of ellipse centers: covariance ellipses are only overlaid when
/// both `truths` and `covariance` are supplied.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CornerOptions {
    /// Confidence-contour levels for the off-diagonal panels (default: [`sigma_levels`]`(3)`).
    pub levels: Vec<Float>,
    /// "True value" markers, one per parameter; also the ellipse centers.
    pub truths: Option<DVector<Float>>,
    /// The full parameter covariance matrix to overlay as per-pair confidence ellipses.
    pub covariance: Option<DMatrix<Float>>,
    /// Which σ multiples to draw one ellipse for (default: `[1.0]`).
    pub sigmas: Vec<Float>,
}

impl Default for CornerOptions {
    fn default() -> Self {
        Self {
            levels: sigma_levels(3),
            truths: None,
            covariance: None,
            sigmas: vec![1.0],
        }
    }
}

impl CornerOptions {
    /// Set the confidence-contour levels.
    pub fn with_levels(mut self, levels: Vec<Float>) -> Self {
        self.levels = levels;
        self
    }
    /// Set the "true value" markers (and ellipse centers).
    pub fn with_truths(mut self, truths: DVector<Float>) -> Self {
        self.truths = Some(truths);
        self
    }
    /// Set the covariance matrix used for the ellipse overlays.
    pub fn with_covariance(mut self, covariance: DMatrix<Float>) -> Self {
        self.covariance = Some(covariance);
        self
    }
    /// Set the σ multiples to draw ellipses for.
    pub fn with_sigmas(mut self, sigmas: Vec<Float>) -> Self {
        self.sigmas = sigmas;
        self
    }
}

/// The outcome of the ellipse overlay for one off-diagonal panel.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum OverlayOutcome {
    /// Every requested ellipse was drawn on the panel.
    Drawn,
    /// The panel's 2×2 covariance submatrix was singular or degenerate; the panel was skipped.
    SingularCovariance,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sigma_levels() {
        let levels = sigma_levels(3);
        assert_eq!(levels.len(), 3);
        assert_relative_eq!(levels[0], 0.3934693402873666, epsilon = 1e-12);
        assert_relative_eq!(levels[1], 0.8646647167633873, epsilon = 1e-12);
        assert_relative_eq!(levels[2], 0.9888910034617577, epsilon = 1e-12);
    }

    #[test]
    fn test_default_options() {
        let options = CornerOptions::default();
        assert_eq!(options.levels, sigma_levels(3));
        assert_eq!(options.sigmas, vec![1.0]);
        assert!(options.truths.is_none());
        assert!(options.covariance.is_none());
    }
}
