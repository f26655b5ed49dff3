use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{core::Point, traits::LogDensity, DVector, Float};

/// [`Posterior`] type combining a dataset, a model, and a prior into a log-density.
pub mod posterior;
/// [`Inference`] type driving a sampler over the posterior.
pub mod session;

pub use posterior::Posterior;
pub use session::Inference;

/// A single member of a walker ensemble: the ordered history of positions it has visited.
///
/// Positions are stored as shared [`Arc`]s so that a rejected proposal can re-push the current
/// position without cloning or re-evaluating it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Walker {
    history: Vec<Arc<RwLock<Point>>>,
}

impl Walker {
    /// Create a new [`Walker`] located at the (unevaluated) seed position `x0`.
    pub fn new(x0: DVector<Float>) -> Self {
        Self {
            history: vec![Arc::new(RwLock::new(Point::from(x0)))],
        }
    }
    /// Get the dimension of the [`Walker`]'s history, `(n_steps, n_variables)`.
    ///
    /// `n_steps` counts the seed position.
    pub fn dimension(&self) -> (usize, usize) {
        (self.history.len(), self.history[0].read().x.len())
    }
    /// Get the most recent position of the [`Walker`].
    pub fn get_latest(&self) -> Arc<RwLock<Point>> {
        self.history[self.history.len() - 1].clone()
    }
    /// Add a new position to the end of the [`Walker`]'s history.
    pub fn push(&mut self, position: Arc<RwLock<Point>>) {
        self.history.push(position);
    }
    /// Evaluate the most recent position of the [`Walker`] (a no-op if it is already evaluated).
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. See [`LogDensity::log_density`] for more
    /// information.
    pub fn evaluate_latest<U, E>(
        &mut self,
        func: &dyn LogDensity<U, E>,
        user_data: &mut U,
    ) -> Result<(), E> {
        self.get_latest().write().log_density(func, user_data)
    }
}

/// A collection of [`Walker`]s representing the state and history of an ensemble sampler.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Ensemble {
    walkers: Vec<Walker>,
}
impl Deref for Ensemble {
    type Target = Vec<Walker>;

    fn deref(&self) -> &Self::Target {
        &self.walkers
    }
}
impl DerefMut for Ensemble {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.walkers
    }
}
impl Ensemble {
    /// Create a new [`Ensemble`] from a set of walker seed positions.
    pub fn new(x0: Vec<DVector<Float>>) -> Self {
        Self {
            walkers: x0.into_iter().map(Walker::new).collect(),
        }
    }
    /// Get the dimension of the [`Ensemble`], `(n_walkers, n_steps, n_variables)`.
    ///
    /// # Panics
    ///
    /// This method will panic if the ensemble contains no walkers.
    pub fn dimension(&self) -> (usize, usize, usize) {
        let n_walkers = self.walkers.len();
        let (n_steps, n_variables) = self.walkers[0].dimension();
        (n_walkers, n_steps, n_variables)
    }
    /// Add a set of positions to the [`Ensemble`], adding each position to the corresponding
    /// [`Walker`] in the given order.
    pub fn push(&mut self, positions: Vec<Arc<RwLock<Point>>>) {
        self.walkers
            .iter_mut()
            .zip(positions)
            .for_each(|(walker, position)| {
                walker.push(position);
            });
    }
    /// Evaluate the most recent position of all [`Walker`]s in the [`Ensemble`].
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if an evaluation fails. See [`LogDensity::log_density`] for more
    /// information.
    pub fn evaluate_latest<U, E>(
        &mut self,
        func: &dyn LogDensity<U, E>,
        user_data: &mut U,
    ) -> Result<(), E> {
        for walker in self.walkers.iter_mut() {
            walker.evaluate_latest(func, user_data)?;
        }
        Ok(())
    }
    /// Get the sampled chain with shape `[n_walkers][n_sampled_steps][n_variables]`, discarding
    /// the first `burn` sampled steps of every walker (default `0`) and keeping every `thin`-th
    /// step of the remainder (default `1`).
    pub fn get_chain(&self, burn: Option<usize>, thin: Option<usize>) -> Vec<Vec<DVector<Float>>> {
        let burn = burn.unwrap_or(0);
        let thin = thin.unwrap_or(1).max(1);
        self.walkers
            .iter()
            .map(|walker| {
                walker
                    .history
                    .iter()
                    // history[0] is the seed position, not a sample
                    .skip(1 + burn)
                    .enumerate()
                    .filter_map(|(i, position)| {
                        if i % thin == 0 {
                            Some(position.read().x.clone())
                        } else {
                            None
                        }
                    })
                    .collect()
            })
            .collect()
    }
    /// Get the sampled chain flattened over walkers, with shape
    /// `[n_walkers * n_sampled_steps][n_variables]`.
    ///
    /// # See Also
    /// [`Ensemble::get_chain`]
    pub fn get_flat_chain(&self, burn: Option<usize>, thin: Option<usize>) -> Vec<DVector<Float>> {
        let chain = self.get_chain(burn, thin);
        chain.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    fn two_step_ensemble() -> Ensemble {
        // two walkers, seeded and advanced twice
        let mut ensemble = Ensemble::new(vec![dvector![0.0], dvector![10.0]]);
        for step in 1..=2 {
            let positions = ensemble
                .iter()
                .map(|walker| {
                    let x = walker.get_latest().read().x.clone();
                    Arc::new(RwLock::new(Point::from(x.map(|v| v + step as Float))))
                })
                .collect();
            ensemble.push(positions);
        }
        ensemble
    }

    #[test]
    fn test_dimension() {
        let ensemble = two_step_ensemble();
        assert_eq!(ensemble.dimension(), (2, 3, 1));
    }

    #[test]
    fn test_chain_excludes_seed() {
        let ensemble = two_step_ensemble();
        let chain = ensemble.get_chain(None, None);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0], vec![dvector![1.0], dvector![3.0]]);
        assert_eq!(chain[1], vec![dvector![11.0], dvector![13.0]]);
    }

    #[test]
    fn test_chain_burn_and_thin() {
        let ensemble = two_step_ensemble();
        let chain = ensemble.get_chain(Some(1), None);
        assert_eq!(chain[0], vec![dvector![3.0]]);
        let thinned = ensemble.get_chain(None, Some(2));
        assert_eq!(thinned[0], vec![dvector![1.0]]);
    }

    #[test]
    fn test_flat_chain_empty_when_burn_exceeds_steps() {
        let ensemble = two_step_ensemble();
        assert_eq!(ensemble.get_flat_chain(Some(2), None), Vec::<DVector<Float>>::new());
        assert_eq!(ensemble.get_flat_chain(Some(100), None), Vec::<DVector<Float>>::new());
    }

    #[test]
    fn test_flat_chain_interleaves_walkers() {
        let ensemble = two_step_ensemble();
        let flat = ensemble.get_flat_chain(None, None);
        assert_eq!(
            flat,
            vec![dvector![1.0], dvector![3.0], dvector![11.0], dvector![13.0]]
        );
    }

    #[test]
    fn test_shared_positions_are_not_duplicated() {
        let mut ensemble = Ensemble::new(vec![dvector![0.0]]);
        let current = ensemble[0].get_latest();
        ensemble.push(vec![current.clone()]);
        assert!(Arc::ptr_eq(&current, &ensemble[0].get_latest()));
    }
}
