use crate::{plotting::ConfidenceEllipse, DVector, Float};

/// A trait representing an external corner-plot renderer.
///
/// The inference core never draws anything itself: [`Inference::plot`](`crate::mcmc::Inference::plot`)
/// hands the flat posterior sample set to [`draw`](`CornerCanvas::draw`) and then overlays
/// covariance ellipses pair by pair through
/// [`overlay_ellipse`](`CornerCanvas::overlay_ellipse`). Implementations may rasterize
/// immediately, buffer the payload for export (see
/// [`PickleCorner`](`crate::plotting::PickleCorner`)), or record calls for testing.
pub trait CornerCanvas {
    /// The error type returned by the canvas backend.
    type Error;

    /// Render the scatter/histogram matrix of the flat sample set, with optional "true value"
    /// markers and the confidence-contour `levels` to draw on the off-diagonal panels.
    ///
    /// # Errors
    ///
    /// Returns an `Err(Self::Error)` if the backend fails.
    fn draw(
        &mut self,
        samples: &[DVector<Float>],
        truths: Option<&DVector<Float>>,
        levels: &[Float],
    ) -> Result<(), Self::Error>;

    /// Overlay one confidence ellipse onto the off-diagonal panel for the parameter pair
    /// `(j, i)` with `j < i` (column `j`, row `i` of the matrix).
    ///
    /// # Errors
    ///
    /// Returns an `Err(Self::Error)` if the backend fails.
    fn overlay_ellipse(
        &mut self,
        pair: (usize, usize),
        ellipse: &ConfidenceEllipse,
    ) -> Result<(), Self::Error>;
}
