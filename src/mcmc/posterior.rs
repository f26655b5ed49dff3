use crate::{
    core::Dataset,
    traits::{LogDensity, LogPrior, Model},
    DVector, Float,
};

/// The Gaussian log-posterior of a fit: a [`Dataset`], a [`Model`], and a [`LogPrior`] combined
/// into a single [`LogDensity`] over parameter space,
/// ```math
/// \ln \pi(\theta) = \ln p(\theta) - \frac{1}{2}\sum_i \left(\frac{y_i - f(\theta, x_i)}{\sigma_i}\right)^2
/// ```
/// up to the additive, parameter-independent normalization constant, which is deliberately
/// omitted since it does not affect sampling.
///
/// A non-finite log-prior short-circuits the evaluation to `-inf` before the model is called, so
/// a hard-boundary prior such as [`UniformPrior`](`crate::traits::UniformPrior`) also protects
/// models that are undefined (or expensive) outside the admissible region.
#[derive(Clone, Debug)]
pub struct Posterior<M, P> {
    data: Dataset,
    model: M,
    prior: P,
}

impl<M, P> Posterior<M, P> {
    /// Combine a dataset, a model, and a prior into a log-posterior.
    pub fn new(data: Dataset, model: M, prior: P) -> Self {
        Self { data, model, prior }
    }

    /// The observed dataset.
    pub const fn data(&self) -> &Dataset {
        &self.data
    }

    /// The model function.
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// The prior density.
    pub const fn prior(&self) -> &P {
        &self.prior
    }

    /// Decompose the posterior back into its dataset, model, and prior.
    pub fn into_parts(self) -> (Dataset, M, P) {
        (self.data, self.model, self.prior)
    }
}

impl<U, E, M, P> LogDensity<U, E> for Posterior<M, P>
where
    M: Model<U, E>,
    P: LogPrior,
{
    fn log_density(&self, theta: &DVector<Float>, user_data: &mut U) -> Result<Float, E> {
        let lnprior = self.prior.log_prior(theta);
        if !lnprior.is_finite() {
            return Ok(Float::NEG_INFINITY);
        }
        let prediction = self.model.predict(theta, self.data.x(), user_data)?;
        Ok(lnprior - 0.5 * self.data.chi_squared(&prediction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::UniformPrior;
    use approx::assert_relative_eq;
    use nalgebra::dvector;
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

    /// A model that panics when called, to prove the out-of-bounds short-circuit.
    struct Unevaluable;
    impl Model for Unevaluable {
        fn predict(
            &self,
            _theta: &DVector<Float>,
            _x: &DVector<Float>,
            _user_data: &mut (),
        ) -> Result<DVector<Float>, Infallible> {
            panic!("model evaluated outside the admissible region")
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_slices(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], &[0.1, 0.1, 0.1]).unwrap()
    }

    #[test]
    fn test_out_of_bounds_is_rejected_without_model_call() {
        let posterior = Posterior::new(
            dataset(),
            Unevaluable,
            UniformPrior::new(vec![(0.0, 5.0)].into()),
        );
        assert_eq!(
            posterior.log_density(&dvector![6.0], &mut ()).unwrap(),
            Float::NEG_INFINITY
        );
    }

    #[test]
    fn test_zero_residual_gives_zero() {
        let posterior = Posterior::new(
            dataset(),
            Linear,
            UniformPrior::new(vec![(0.0, 5.0)].into()),
        );
        assert_relative_eq!(posterior.log_density(&dvector![2.0], &mut ()).unwrap(), 0.0);
    }

    #[test]
    fn test_inside_bounds_matches_chi_squared() {
        let data = dataset();
        let posterior = Posterior::new(
            data.clone(),
            Linear,
            UniformPrior::new(vec![(0.0, 5.0)].into()),
        );
        let theta = dvector![2.5];
        let expected = -0.5 * data.chi_squared(&data.x().map(|xi| 2.5 * xi));
        assert_relative_eq!(
            posterior.log_density(&theta, &mut ()).unwrap(),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_prior_term_is_additive() {
        let posterior = Posterior::new(dataset(), Linear, |theta: &DVector<Float>| {
            -0.5 * theta[0].powi(2)
        });
        let at_optimum = posterior.log_density(&dvector![2.0], &mut ()).unwrap();
        assert_relative_eq!(at_optimum, -2.0, epsilon = 1e-12);
    }
}
