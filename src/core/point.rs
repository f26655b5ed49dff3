use crate::{traits::LogDensity, DVector, Float};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A point in parameter space along with its (lazily cached) log-density value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Point {
    /// the point's position
    pub x: DVector<Float>,
    /// the point's evaluation (`None` if the point has not yet been evaluated)
    pub fx: Option<Float>,
}

impl Point {
    /// Evaluate the given log-density function at the point's coordinate and cache the result.
    /// Re-evaluation of an already-evaluated point is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Implementors whose evaluation never fails
    /// should use [`std::convert::Infallible`].
    pub fn log_density<U, E>(
        &mut self,
        func: &dyn LogDensity<U, E>,
        user_data: &mut U,
    ) -> Result<(), E> {
        if self.fx.is_none() {
            self.fx = Some(func.log_density(&self.x, user_data)?);
        }
        Ok(())
    }

    /// Move the point to a new position, resetting its evaluation.
    pub fn set_position(&mut self, x: DVector<Float>) {
        self.x = x;
        self.fx = None;
    }

    /// Get the current evaluation of the point, if it has been evaluated.
    ///
    /// # Panics
    ///
    /// This method will panic if the point is unevaluated.
    pub fn fx_checked(&self) -> Float {
        #[allow(clippy::expect_used)]
        self.fx.expect("Point value requested before evaluation")
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "x: {:?}, f(x): {:?}", self.x, self.fx)
    }
}

impl From<&[Float]> for Point {
    fn from(value: &[Float]) -> Self {
        Self {
            x: DVector::from_column_slice(value),
            fx: None,
        }
    }
}
impl From<Vec<Float>> for Point {
    fn from(value: Vec<Float>) -> Self {
        Self {
            x: DVector::from_vec(value),
            fx: None,
        }
    }
}
impl From<DVector<Float>> for Point {
    fn from(value: DVector<Float>) -> Self {
        Self { x: value, fx: None }
    }
}
