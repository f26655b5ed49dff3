use crate::{plotting::ConfidenceEllipse, traits::CornerCanvas, DVector, Float};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// A [`CornerCanvas`] that buffers the full corner-plot payload and exports it as a Python
/// pickle, to be rendered externally with `corner`/`matplotlib`.
///
/// The pickle contains a dict with the flat sample matrix (`samples`), the optional truth
/// markers (`truths`), the contour `levels`, and the overlaid `ellipses` as
/// `((j, i), {center, width, height, angle})` records.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PickleCorner {
    samples: Vec<Vec<Float>>,
    truths: Option<Vec<Float>>,
    levels: Vec<Float>,
    ellipses: Vec<((usize, usize), ConfidenceEllipse)>,
}

impl PickleCorner {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// The buffered ellipse overlays.
    pub fn ellipses(&self) -> &[((usize, usize), ConfidenceEllipse)] {
        &self.ellipses
    }

    /// Serialize the buffered payload into the given writer as a pickle.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_pickle::Error`] if serialization or the underlying writer fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), serde_pickle::Error> {
        serde_pickle::to_writer(&mut writer, self, Default::default())
    }
}

impl CornerCanvas for PickleCorner {
    type Error = serde_pickle::Error;

    fn draw(
        &mut self,
        samples: &[DVector<Float>],
        truths: Option<&DVector<Float>>,
        levels: &[Float],
    ) -> Result<(), Self::Error> {
        self.samples = samples
            .iter()
            .map(|sample| sample.iter().copied().collect())
            .collect();
        self.truths = truths.map(|t| t.iter().copied().collect());
        self.levels = levels.to_vec();
        self.ellipses.clear();
        Ok(())
    }

    fn overlay_ellipse(
        &mut self,
        pair: (usize, usize),
        ellipse: &ConfidenceEllipse,
    ) -> Result<(), Self::Error> {
        self.ellipses.push((pair, ellipse.clone()));
        Ok(())
    }
}
