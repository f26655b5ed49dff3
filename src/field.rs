use crate::{core::Error, Float};

/// Half-side of the COSMOS field footprint in degrees (the field covers 2 deg²).
#[cfg(not(feature = "f32"))]
const COSMOS_HALF_WIDTH: Float = std::f64::consts::FRAC_1_SQRT_2;
/// Half-side of the COSMOS field footprint in degrees (the field covers 2 deg²).
#[cfg(feature = "f32")]
const COSMOS_HALF_WIDTH: Float = std::f32::consts::FRAC_1_SQRT_2;

/// An axis-aligned square sky region centered on `(alpha, delta)`, used to select survey
/// objects by position.
///
/// Membership is strict: an object exactly on an edge of the footprint is outside.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Field {
    /// Right ascension of the field center in degrees.
    pub alpha: Float,
    /// Declination of the field center in degrees.
    pub delta: Float,
    /// Half-side of the square footprint in degrees.
    pub half_width: Float,
}

/// The COSMOS field: a 2 deg² square centered on
/// `(α, δ) = (150.11916667, 2.20583333)` degrees.
pub const COSMOS: Field = Field {
    alpha: 150.11916667,
    delta: 2.20583333,
    half_width: COSMOS_HALF_WIDTH,
};

impl Field {
    /// Whether the position `(alpha, delta)` (in degrees) falls strictly inside the field
    /// footprint.
    pub fn contains(&self, alpha: Float, delta: Float) -> bool {
        alpha > self.alpha - self.half_width
            && alpha < self.alpha + self.half_width
            && delta > self.delta - self.half_width
            && delta < self.delta + self.half_width
    }

    /// The membership mask of a catalog: one boolean per `(alpha, delta)` pair, `true` for
    /// objects inside the field footprint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the two coordinate columns do not have the same
    /// length.
    pub fn cut(&self, alpha: &[Float], delta: &[Float]) -> Result<Vec<bool>, Error> {
        if delta.len() != alpha.len() {
            return Err(Error::DimensionMismatch {
                name: "declination",
                expected: alpha.len(),
                found: delta.len(),
            });
        }
        Ok(alpha
            .iter()
            .zip(delta.iter())
            .map(|(&a, &d)| self.contains(a, d))
            .collect())
    }
}
