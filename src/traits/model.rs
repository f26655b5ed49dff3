use crate::{DVector, Float};
use std::convert::Infallible;

/// A trait which describes a fitting function $`f(\theta, x) \to \hat{y}`$.
///
/// Implementations should be pure: the prediction may depend only on the parameter vector, the
/// independent-variable column, and the (optionally mutable) user data.
pub trait Model<U = (), E = Infallible> {
    /// The model prediction at the parameter vector `theta` for every value of the
    /// independent-variable column `x`.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Implementors whose evaluation never fails
    /// should use [`std::convert::Infallible`].
    fn predict(
        &self,
        theta: &DVector<Float>,
        x: &DVector<Float>,
        user_data: &mut U,
    ) -> Result<DVector<Float>, E>;
}
