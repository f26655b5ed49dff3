use crate::{core::Error, DVector, Float};
use serde::{Deserialize, Serialize};

/// The observed data of a fit: an independent variable, a dependent variable, and per-point
/// measurement uncertainties (standard deviations).
///
/// All three columns must have the same length, which is checked at construction; the dataset is
/// immutable afterwards and owned by the [`Inference`](`crate::mcmc::Inference`) session built
/// from it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    x: DVector<Float>,
    y: DVector<Float>,
    yerr: DVector<Float>,
}

impl Dataset {
    /// Create a new [`Dataset`] from the three data columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `y` or `yerr` does not have the same length as
    /// `x`.
    pub fn new(x: DVector<Float>, y: DVector<Float>, yerr: DVector<Float>) -> Result<Self, Error> {
        if y.len() != x.len() {
            return Err(Error::DimensionMismatch {
                name: "y",
                expected: x.len(),
                found: y.len(),
            });
        }
        if yerr.len() != x.len() {
            return Err(Error::DimensionMismatch {
                name: "yerr",
                expected: x.len(),
                found: yerr.len(),
            });
        }
        Ok(Self { x, y, yerr })
    }

    /// Create a new [`Dataset`] from three slices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the slices do not all have the same length.
    pub fn from_slices(x: &[Float], y: &[Float], yerr: &[Float]) -> Result<Self, Error> {
        Self::new(
            DVector::from_column_slice(x),
            DVector::from_column_slice(y),
            DVector::from_column_slice(yerr),
        )
    }

    /// The number of observed points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the dataset contains no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The independent variable column.
    pub const fn x(&self) -> &DVector<Float> {
        &self.x
    }

    /// The dependent variable column.
    pub const fn y(&self) -> &DVector<Float> {
        &self.y
    }

    /// The measurement uncertainty column.
    pub const fn yerr(&self) -> &DVector<Float> {
        &self.yerr
    }

    /// The weighted sum of squared residuals of a model prediction against this dataset,
    /// $`\sum_i \left((y_i - \hat{y}_i)/\sigma_i\right)^2`$.
    ///
    /// # Panics
    ///
    /// Panics if the prediction does not have one value per observed point.
    pub fn chi_squared(&self, prediction: &DVector<Float>) -> Float {
        assert_eq!(
            prediction.len(),
            self.len(),
            "model prediction length does not match the dataset"
        );
        self.y
            .iter()
            .zip(prediction.iter())
            .zip(self.yerr.iter())
            .map(|((y, f), s)| ((y - f) / s).powi(2))
            .sum()
    }
}
