use std::convert::Infallible;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use fastrand::Rng;
use sedfit::prelude::*;

// Linear model y = θ₀x + θ₁
struct Linear;
impl Model for Linear {
    fn predict(
        &self,
        theta: &DVector<Float>,
        x: &DVector<Float>,
        _user_data: &mut (),
    ) -> Result<DVector<Float>, Infallible> {
        Ok(x.map(|xi| theta[0] * xi + theta[1]))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Create and seed a random number generator
    let mut rng = Rng::with_seed(0);

    // Generate a synthetic catalog: y = 2x + 1 with σ = 0.5 Gaussian scatter
    let x: Vec<Float> = (0..50).map(|i| i as Float / 5.0).collect();
    let y: Vec<Float> = x
        .iter()
        .map(|&v| 2.0 * v + 1.0 + rng.normal(0.0, 0.5))
        .collect();
    let yerr = vec![0.5; x.len()];
    let data = Dataset::from_slices(&x, &y, &yerr)?;

    // Set up the session: slope in (0, 4), intercept in (-2, 4), 100 walkers seeded
    // uniformly inside the bounds
    let bounds: Bounds = vec![(0.0, 4.0), (-2.0, 4.0)].into();
    let mut session = Inference::new(data, Linear, bounds).with_walkers(100);
    session.init_walkers(&mut rng);

    // Run 2000 steps of the random-walk reference sampler, discarding the first 500
    let mut sampler = RandomWalk::new(0.05, Rng::with_seed(1));
    session.run(&mut sampler, 2000, 500, &mut ())?;

    let mean = session.posterior_mean().ok_or("empty chain")?;
    println!("posterior mean:\n{}", mean);
    let quantiles = session
        .posterior_quantiles(&labels::SIGMA_QUANTILES)
        .ok_or("empty chain")?;
    for (q, value) in labels::SIGMA_QUANTILES.iter().zip(&quantiles) {
        println!("q = {}:\n{}", q, value);
    }

    // Sample covariance of the posterior, used for the ellipse overlays
    let samples = session.flat_samples();
    let n = samples.len() as Float;
    let covariance = DMatrix::from_fn(2, 2, |i, j| {
        samples
            .iter()
            .map(|s| (s[i] - mean[i]) * (s[j] - mean[j]))
            .sum::<Float>()
            / n
    });

    // Export the corner-plot payload to a Python .pkl file to visualize via corner/matplotlib
    let mut canvas = PickleCorner::new();
    let options = CornerOptions::default()
        .with_truths(mean.clone())
        .with_covariance(covariance);
    let outcomes = session.plot(&mut canvas, &options)?;
    println!("ellipse overlays: {:?}", outcomes);
    let mut writer = BufWriter::new(File::create(Path::new("corner.pkl"))?);
    canvas.write_to(&mut writer)?;
    Ok(())
}
