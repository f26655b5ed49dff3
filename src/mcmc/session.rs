use fastrand::Rng;

use crate::{
    core::{Bounds, Dataset, Error},
    mcmc::{Ensemble, Posterior},
    plotting::{ConfidenceEllipse, CornerOptions, OverlayOutcome},
    traits::{CornerCanvas, EnsembleSampler, LogPrior, Model, UniformPrior},
    DMatrix, DVector, Float,
};

/// An MCMC inference session: the observed [`Dataset`], a [`Model`], parameter [`Bounds`], a
/// prior, and the sampling configuration, together with the posterior sample set of the most
/// recent run.
///
/// The session owns the driver loop but not the algorithm: sampling is delegated to any
/// [`EnsembleSampler`], and plotting to any [`CornerCanvas`]. A typical fit seeds the walkers,
/// runs the sampler, and summarizes:
///
/// ```text
/// let mut session = Inference::new(data, model, bounds).with_walkers(100);
/// session.init_walkers(&mut rng);
/// session.run(&mut sampler, 1000, 50, &mut ())?;
/// let mean = session.posterior_mean();
/// ```
///
/// Each call to [`run`](`Inference::run`) restarts from the stored walker seeds and replaces the
/// previous output; samples never accumulate across runs.
pub struct Inference<M, P = UniformPrior> {
    posterior: Posterior<M, P>,
    bounds: Bounds,
    n_walkers: usize,
    seeds: Vec<DVector<Float>>,
    output: Vec<DVector<Float>>,
}

impl<M> Inference<M> {
    /// The default number of walkers in the ensemble.
    pub const DEFAULT_WALKERS: usize = 100;

    /// Create a new session over the given dataset, model, and parameter bounds, with a
    /// [`UniformPrior`] over the same bounds and [`Self::DEFAULT_WALKERS`] walkers.
    ///
    /// The dimension of the problem is the number of bounds.
    pub fn new(data: Dataset, model: M, bounds: Bounds) -> Self {
        Self {
            posterior: Posterior::new(data, model, UniformPrior::new(bounds.clone())),
            bounds,
            n_walkers: Self::DEFAULT_WALKERS,
            seeds: Vec::new(),
            output: Vec::new(),
        }
    }
}

impl<M, P> Inference<M, P> {
    /// Replace the prior of the session.
    ///
    /// Walker seeds and previous output are kept; re-run the sampler for them to reflect the new
    /// prior.
    pub fn with_prior<P2: LogPrior>(self, prior: P2) -> Inference<M, P2> {
        let (data, model, _) = self.posterior.into_parts();
        Inference {
            posterior: Posterior::new(data, model, prior),
            bounds: self.bounds,
            n_walkers: self.n_walkers,
            seeds: self.seeds,
            output: self.output,
        }
    }

    /// Set the number of walkers in the ensemble (default: 100).
    pub fn with_walkers(mut self, n_walkers: usize) -> Self {
        self.n_walkers = n_walkers;
        self
    }

    /// The number of free parameters of the fit.
    pub fn dimension(&self) -> usize {
        self.bounds.len()
    }

    /// The number of walkers in the ensemble.
    pub const fn n_walkers(&self) -> usize {
        self.n_walkers
    }

    /// The parameter bounds of the fit.
    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// The log-posterior of the session.
    pub const fn posterior(&self) -> &Posterior<M, P> {
        &self.posterior
    }

    /// Seed every walker with a uniform random draw inside the parameter bounds.
    ///
    /// Must be called (or [`Inference::init_walkers_with`]) before [`Inference::run`].
    pub fn init_walkers(&mut self, rng: &mut Rng) {
        self.seeds = (0..self.n_walkers)
            .map(|_| self.bounds.sample_uniform(rng))
            .collect();
    }

    /// Seed every walker with a vector produced by the given generator, one call per walker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] (and leaves the previous seeds untouched) if a
    /// generated vector does not have one entry per free parameter.
    pub fn init_walkers_with<F>(&mut self, rng: &mut Rng, mut generator: F) -> Result<(), Error>
    where
        F: FnMut(&mut Rng) -> DVector<Float>,
    {
        let dimension = self.dimension();
        let seeds = (0..self.n_walkers)
            .map(|_| {
                let seed = generator(rng);
                if seed.len() == dimension {
                    Ok(seed)
                } else {
                    Err(Error::DimensionMismatch {
                        name: "walker",
                        expected: dimension,
                        found: seed.len(),
                    })
                }
            })
            .collect::<Result<Vec<_>, Error>>()?;
        self.seeds = seeds;
        Ok(())
    }

    /// Run `n_steps` of the given sampler from the stored walker seeds, then store the flat
    /// posterior sample set with the first `burn` sampled steps of every walker discarded.
    ///
    /// The previous output is replaced. If `burn >= n_steps` the output is empty.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if a log-density evaluation fails inside the sampler. See
    /// [`LogDensity::log_density`](`crate::traits::LogDensity::log_density`) for more
    /// information.
    ///
    /// # Panics
    ///
    /// This method will panic if the walkers have not been initialized.
    pub fn run<U, E>(
        &mut self,
        sampler: &mut dyn EnsembleSampler<U, E>,
        n_steps: usize,
        burn: usize,
        user_data: &mut U,
    ) -> Result<(), E>
    where
        M: Model<U, E>,
        P: LogPrior,
    {
        assert!(
            !self.seeds.is_empty(),
            "walkers must be initialized before running the sampler"
        );
        let mut ensemble = Ensemble::new(self.seeds.clone());
        sampler.initialize(&self.posterior, user_data, &mut ensemble)?;
        for i_step in 0..n_steps {
            sampler.step(i_step, &self.posterior, user_data, &mut ensemble)?;
        }
        self.output = ensemble.get_flat_chain(Some(burn), None);
        Ok(())
    }

    /// The flat posterior sample set of the most recent run (empty before the first run).
    pub fn flat_samples(&self) -> &[DVector<Float>] {
        &self.output
    }

    /// The mean of the posterior sample set, or [`None`] if it is empty.
    pub fn posterior_mean(&self) -> Option<DVector<Float>> {
        if self.output.is_empty() {
            return None;
        }
        Some(
            self.output
                .iter()
                .cloned()
                .sum::<DVector<Float>>()
                .unscale(self.output.len() as Float),
        )
    }

    /// Per-parameter quantiles of the posterior sample set, one vector per requested quantile
    /// (linear interpolation between order statistics), or [`None`] if the set is empty.
    ///
    /// Pairs with [`labels::SIGMA_QUANTILES`](`crate::labels::SIGMA_QUANTILES`) for the usual
    /// median ± 1σ summary.
    pub fn posterior_quantiles(&self, quantiles: &[Float]) -> Option<Vec<DVector<Float>>> {
        if self.output.is_empty() {
            return None;
        }
        let dimension = self.output[0].len();
        let mut columns: Vec<Vec<Float>> = (0..dimension)
            .map(|d| self.output.iter().map(|sample| sample[d]).collect())
            .collect();
        for column in &mut columns {
            column.sort_by(Float::total_cmp);
        }
        Some(
            quantiles
                .iter()
                .map(|&q| {
                    DVector::from_iterator(
                        dimension,
                        columns.iter().map(|column| sorted_quantile(column, q)),
                    )
                })
                .collect(),
        )
    }

    /// Render a corner-plot summary of the posterior sample set onto the given canvas.
    ///
    /// The canvas first draws the scatter/histogram matrix with the configured contour levels
    /// and optional truth markers. If [`CornerOptions::truths`] and
    /// [`CornerOptions::covariance`] are both supplied, every unique parameter pair `(j, i)`
    /// with `j < i` gets its 2×2 covariance submatrix extracted and one
    /// [`ConfidenceEllipse`] per entry of [`CornerOptions::sigmas`] overlaid onto the
    /// corresponding off-diagonal panel. Pairs with a singular submatrix are skipped and
    /// reported in the returned outcome list; canvas failures propagate as errors.
    ///
    /// # Errors
    ///
    /// Returns an `Err(C::Error)` if the canvas backend fails.
    ///
    /// # Panics
    ///
    /// This method will panic if the supplied truths or covariance matrix do not match the
    /// dimension of the fit.
    pub fn plot<C: CornerCanvas>(
        &self,
        canvas: &mut C,
        options: &CornerOptions,
    ) -> Result<Vec<((usize, usize), OverlayOutcome)>, C::Error> {
        let dimension = self.dimension();
        if let Some(truths) = &options.truths {
            assert_eq!(truths.len(), dimension, "one truth value per parameter");
        }
        if let Some(covariance) = &options.covariance {
            assert_eq!(
                covariance.shape(),
                (dimension, dimension),
                "covariance matrix must be square over all parameters"
            );
        }
        canvas.draw(&self.output, options.truths.as_ref(), &options.levels)?;
        let mut outcomes = Vec::new();
        if let (Some(truths), Some(covariance)) =
            (options.truths.as_ref(), options.covariance.as_ref())
        {
            for i in 0..dimension {
                for j in 0..i {
                    let center = (truths[j], truths[i]);
                    let submatrix = pair_submatrix(covariance, j, i);
                    let mut outcome = OverlayOutcome::Drawn;
                    for &sigma in &options.sigmas {
                        match ConfidenceEllipse::from_covariance(center, &submatrix, sigma) {
                            Some(ellipse) => canvas.overlay_ellipse((j, i), &ellipse)?,
                            None => {
                                outcome = OverlayOutcome::SingularCovariance;
                                break;
                            }
                        }
                    }
                    outcomes.push(((j, i), outcome));
                }
            }
        }
        Ok(outcomes)
    }
}

/// The 2×2 submatrix of `covariance` over the parameter pair `(j, i)`.
fn pair_submatrix(covariance: &DMatrix<Float>, j: usize, i: usize) -> DMatrix<Float> {
    DMatrix::from_row_slice(
        2,
        2,
        &[
            covariance[(j, j)],
            covariance[(j, i)],
            covariance[(i, j)],
            covariance[(i, i)],
        ],
    )
}

/// Linearly interpolated quantile of an ascending-sorted, non-empty slice.
fn sorted_quantile(sorted: &[Float], q: Float) -> Float {
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as Float;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as Float)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{samplers::RandomWalk, traits::LogDensity};
    use approx::assert_relative_eq;
    use nalgebra::{dmatrix, dvector};
    use std::convert::Infallible;

    struct Linear;
    impl Model for Linear {
        fn predict(
            &self,
            theta: &DVector<Float>,
            x: &DVector<Float>,
            _user_data: &mut (),
        ) -> Result<DVector<Float>, Infallible> {
            Ok(x.map(|xi| theta[0] * xi))
        }
    }

    fn linear_session() -> Inference<Linear> {
        let data =
            Dataset::from_slices(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], &[0.1, 0.1, 0.1]).unwrap();
        Inference::new(data, Linear, vec![(0.0, 5.0)].into())
    }

    /// A sampler that marches every walker by a fixed offset each step, deterministically.
    #[derive(Clone)]
    struct Marching {
        offset: Float,
    }
    impl<U, E> EnsembleSampler<U, E> for Marching {
        fn initialize(
            &mut self,
            func: &dyn LogDensity<U, E>,
            user_data: &mut U,
            ensemble: &mut Ensemble,
        ) -> Result<(), E> {
            ensemble.evaluate_latest(func, user_data)
        }
        fn step(
            &mut self,
            _i_step: usize,
            _func: &dyn LogDensity<U, E>,
            _user_data: &mut U,
            ensemble: &mut Ensemble,
        ) -> Result<(), E> {
            let positions = ensemble
                .iter()
                .map(|walker| {
                    let x = walker.get_latest().read().x.clone();
                    std::sync::Arc::new(parking_lot::RwLock::new(crate::core::Point::from(
                        x.map(|v| v + self.offset),
                    )))
                })
                .collect();
            ensemble.push(positions);
            Ok(())
        }
    }

    #[test]
    fn test_init_walkers_within_bounds() {
        let mut session = linear_session().with_walkers(50);
        let mut rng = Rng::with_seed(0);
        session.init_walkers(&mut rng);
        assert_eq!(session.n_walkers(), 50);
        // all seeds land strictly inside the bounds, so the first run starts with finite
        // posterior values
        let bounds = session.bounds().clone();
        let seeds = session.seeds.clone();
        assert_eq!(seeds.len(), 50);
        assert!(seeds.iter().all(|seed| bounds.contains_interior(seed)));
    }

    #[test]
    fn test_init_walkers_with_validates_dimension() {
        let mut session = linear_session();
        let mut rng = Rng::with_seed(0);
        let err = session.init_walkers_with(&mut rng, |_| dvector![1.0, 2.0]);
        assert_eq!(
            err,
            Err(Error::DimensionMismatch {
                name: "walker",
                expected: 1,
                found: 2
            })
        );
        assert!(session.seeds.is_empty());
    }

    #[test]
    #[should_panic(expected = "walkers must be initialized")]
    fn test_run_requires_walkers() {
        let mut session = linear_session();
        let mut sampler = Marching { offset: 0.0 };
        let _ = session.run(&mut sampler, 10, 0, &mut ());
    }

    #[test]
    fn test_run_collects_post_burn_samples() {
        let mut session = linear_session().with_walkers(3);
        let mut rng = Rng::with_seed(0);
        session
            .init_walkers_with(&mut rng, |_| dvector![1.0])
            .unwrap();
        let mut sampler = Marching { offset: 0.5 };
        session.run(&mut sampler, 4, 2, &mut ()).unwrap();
        // 4 sampled steps, 2 burned, 3 walkers -> 6 samples; seeds at 1.0 march to 2.5, 3.0
        assert_eq!(session.flat_samples().len(), 6);
        let mean = session.posterior_mean().unwrap();
        assert_relative_eq!(mean[0], 2.75, epsilon = 1e-12);
    }

    #[test]
    fn test_run_with_burn_at_or_past_length_is_empty() {
        let mut session = linear_session().with_walkers(2);
        let mut rng = Rng::with_seed(0);
        session
            .init_walkers_with(&mut rng, |_| dvector![1.0])
            .unwrap();
        let mut sampler = Marching { offset: 0.1 };
        session.run(&mut sampler, 5, 5, &mut ()).unwrap();
        assert!(session.flat_samples().is_empty());
        assert!(session.posterior_mean().is_none());
        assert!(session.posterior_quantiles(&[0.5]).is_none());
    }

    #[test]
    fn test_rerun_replaces_output() {
        let mut session = linear_session().with_walkers(2);
        let mut rng = Rng::with_seed(0);
        session
            .init_walkers_with(&mut rng, |_| dvector![1.0])
            .unwrap();
        let mut sampler = Marching { offset: 0.5 };
        session.run(&mut sampler, 3, 0, &mut ()).unwrap();
        let first = session.flat_samples().to_vec();
        session.run(&mut sampler, 3, 0, &mut ()).unwrap();
        // the second run restarts from the same seeds, it does not extend the first
        assert_eq!(session.flat_samples(), &first[..]);
    }

    #[test]
    fn test_posterior_quantiles() {
        let mut session = linear_session();
        session.output = (1..=5).map(|v| dvector![v as Float]).collect();
        let quantiles = session.posterior_quantiles(&[0.0, 0.5, 1.0]).unwrap();
        assert_relative_eq!(quantiles[0][0], 1.0);
        assert_relative_eq!(quantiles[1][0], 3.0);
        assert_relative_eq!(quantiles[2][0], 5.0);
        let quartile = session.posterior_quantiles(&[0.25]).unwrap();
        assert_relative_eq!(quartile[0][0], 2.0);
    }

    #[test]
    fn test_linear_fit_recovers_slope() {
        let mut session = linear_session();
        let mut rng = Rng::with_seed(0);
        session.init_walkers(&mut rng);
        let mut sampler = RandomWalk::new(0.1, Rng::with_seed(1));
        session.run(&mut sampler, 1000, 200, &mut ()).unwrap();
        let mean = session.posterior_mean().unwrap();
        // the true slope is 2 and the posterior σ is ~0.027
        assert!((mean[0] - 2.0).abs() < 0.05, "posterior mean {}", mean[0]);
        let quantiles = session.posterior_quantiles(&[0.16, 0.5, 0.84]).unwrap();
        assert!(quantiles[0][0] < quantiles[1][0] && quantiles[1][0] < quantiles[2][0]);
    }

    #[derive(Default)]
    struct Recording {
        drawn: Option<(usize, Vec<Float>)>,
        ellipses: Vec<((usize, usize), ConfidenceEllipse)>,
        fail: bool,
    }
    impl CornerCanvas for Recording {
        type Error = String;
        fn draw(
            &mut self,
            samples: &[DVector<Float>],
            _truths: Option<&DVector<Float>>,
            levels: &[Float],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err("backend down".to_string());
            }
            self.drawn = Some((samples.len(), levels.to_vec()));
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

    struct Planar;
    impl Model for Planar {
        fn predict(
            &self,
            theta: &DVector<Float>,
            x: &DVector<Float>,
            _user_data: &mut (),
        ) -> Result<DVector<Float>, Infallible> {
            Ok(x.map(|xi| theta[0] * xi + theta[1]))
        }
    }

    fn planar_session() -> Inference<Planar> {
        let data =
            Dataset::from_slices(&[1.0, 2.0, 3.0], &[3.0, 5.0, 7.0], &[0.1, 0.1, 0.1]).unwrap();
        Inference::new(data, Planar, vec![(0.0, 5.0), (0.0, 5.0)].into())
    }

    #[test]
    fn test_plot_overlays_ellipses_per_pair() {
        let mut session = planar_session();
        session.output = vec![dvector![2.0, 1.0], dvector![2.1, 0.9]];
        let mut canvas = Recording::default();
        let options = CornerOptions::default()
            .with_truths(dvector![2.0, 1.0])
            .with_covariance(dmatrix![0.01, 0.0; 0.0, 0.04])
            .with_sigmas(vec![1.0, 2.0]);
        let outcomes = session.plot(&mut canvas, &options).unwrap();
        assert_eq!(outcomes, vec![((0, 1), OverlayOutcome::Drawn)]);
        assert_eq!(canvas.ellipses.len(), 2, "one ellipse per σ multiplier");
        assert_eq!(canvas.ellipses[0].0, (0, 1));
        let (n_samples, levels) = canvas.drawn.unwrap();
        assert_eq!(n_samples, 2);
        assert_eq!(levels.len(), 3);
    }

    #[test]
    fn test_plot_skips_singular_pairs() {
        let mut session = planar_session();
        session.output = vec![dvector![2.0, 1.0]];
        let mut canvas = Recording::default();
        let options = CornerOptions::default()
            .with_truths(dvector![2.0, 1.0])
            .with_covariance(DMatrix::zeros(2, 2));
        let outcomes = session.plot(&mut canvas, &options).unwrap();
        assert_eq!(outcomes, vec![((0, 1), OverlayOutcome::SingularCovariance)]);
        assert!(canvas.ellipses.is_empty());
    }

    #[test]
    fn test_plot_without_covariance_draws_no_ellipses() {
        let mut session = planar_session();
        session.output = vec![dvector![2.0, 1.0]];
        let mut canvas = Recording::default();
        let outcomes = session.plot(&mut canvas, &CornerOptions::default()).unwrap();
        assert!(outcomes.is_empty());
        assert!(canvas.ellipses.is_empty());
        assert!(canvas.drawn.is_some());
    }

    #[test]
    fn test_plot_propagates_canvas_errors() {
        let session = planar_session();
        let mut canvas = Recording {
            fail: true,
            ..Recording::default()
        };
        let err = session.plot(&mut canvas, &CornerOptions::default());
        assert_eq!(err, Err("backend down".to_string()));
    }

    #[test]
    fn test_with_prior_replaces_prior() {
        let session = linear_session().with_walkers(7);
        let session = session.with_prior(|theta: &DVector<Float>| -theta[0].abs());
        assert_eq!(session.n_walkers(), 7);
        assert_relative_eq!(
            session.posterior().prior().log_prior(&dvector![3.0]),
            -3.0
        );
    }
}
