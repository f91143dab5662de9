use super::{
    abs_distances, check_scale, exact_parameters, Kernel, KernelError,
};
use nalgebra::base::storage::Storage;
use nalgebra::{dvector, DMatrix, DVector, Dim, Vector};

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Squared-exponential kernel, also known as the radial-basis function.
///
/// ```math
///     K(x, x') = \sigma_f^2 \exp\left(-\frac{|x - x'|^2}{2\ell^2}\right)
/// ```
///
/// # Parameters
/// * `length_scale` - ℓ, how quickly correlation decays with distance.
/// * `output_scale` - σ_f, the marginal standard deviation.
///
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct SquaredExponentialKernel {
    length_scale: f64,
    output_scale: f64,
}

impl SquaredExponentialKernel {
    /// Create a new squared-exponential kernel
    pub fn new(
        length_scale: f64,
        output_scale: f64,
    ) -> Result<Self, KernelError> {
        Ok(Self {
            length_scale: check_scale("length_scale", length_scale)?,
            output_scale: check_scale("output_scale", output_scale)?,
        })
    }

    /// Create a new `SquaredExponentialKernel` without checking parameters
    #[must_use]
    pub fn new_unchecked(length_scale: f64, output_scale: f64) -> Self {
        Self {
            length_scale,
            output_scale,
        }
    }

    #[must_use]
    pub fn length_scale(&self) -> f64 {
        self.length_scale
    }

    #[must_use]
    pub fn output_scale(&self) -> f64 {
        self.output_scale
    }
}

impl Default for SquaredExponentialKernel {
    fn default() -> Self {
        Self {
            length_scale: 1.0,
            output_scale: 1.0,
        }
    }
}

impl Kernel for SquaredExponentialKernel {
    fn n_parameters(&self) -> usize {
        2
    }

    fn covariance<R1, R2, S1, S2>(
        &self,
        x1: &Vector<f64, R1, S1>,
        x2: &Vector<f64, R2, S2>,
    ) -> DMatrix<f64>
    where
        R1: Dim,
        R2: Dim,
        S1: Storage<f64, R1>,
        S2: Storage<f64, R2>,
    {
        let s2 = self.output_variance();
        let denom = -2.0 * self.length_scale.powi(2);
        abs_distances(x1, x2).map(|d| s2 * (d * d / denom).exp())
    }

    fn is_stationary(&self) -> bool {
        true
    }

    fn diag<R, S>(&self, x: &Vector<f64, R, S>) -> DVector<f64>
    where
        R: Dim,
        S: Storage<f64, R>,
    {
        DVector::repeat(x.nrows(), self.output_variance())
    }

    fn output_variance(&self) -> f64 {
        self.output_scale * self.output_scale
    }

    fn parameters(&self) -> DVector<f64> {
        dvector![self.length_scale.ln(), self.output_scale.ln()]
    }

    fn reparameterize(&self, params: &[f64]) -> Result<Self, KernelError> {
        let params = exact_parameters(params, 2)?;
        Self::new(params[0].exp(), params[1].exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::test_basic_impls;
    test_basic_impls!(SquaredExponentialKernel::default());

    #[test]
    fn se_simple() {
        let kernel = SquaredExponentialKernel::default();
        assert::close(kernel.parameters()[0], 0.0, 1E-10);
        assert::close(kernel.parameters()[1], 0.0, 1E-10);
        assert_eq!(
            kernel,
            kernel
                .reparameterize(&[0.0, 0.0])
                .expect("Should create kernel from params")
        );
        assert!(kernel.is_stationary());
    }

    #[test]
    fn se_rejects_bad_scales() {
        assert!(SquaredExponentialKernel::new(0.0, 1.0).is_err());
        assert!(SquaredExponentialKernel::new(1.0, -1.0).is_err());
        assert_eq!(
            SquaredExponentialKernel::default().reparameterize(&[0.0]),
            Err(KernelError::MissingParameters(1))
        );
    }

    #[test]
    fn se_1d() {
        let xs = DVector::from_column_slice(&[0.0, 1.0, 2.0, 3.0]);
        let kernel = SquaredExponentialKernel::default();

        let cov = kernel.covariance(&xs, &xs);
        let expected_cov = DMatrix::from_column_slice(
            4,
            4,
            &[
                1.,
                0.606_530_66,
                0.135_335_28,
                0.011_108_996,
                0.606_530_66,
                1.,
                0.606_530_66,
                0.135_335_28,
                0.135_335_28,
                0.606_530_66,
                1.,
                0.606_530_66,
                0.011_108_996,
                0.135_335_28,
                0.606_530_66,
                1.,
            ],
        );

        assert!(expected_cov.relative_eq(&cov, 1E-8, 1E-8));
        let expected_diag = DVector::from_column_slice(&[1., 1., 1., 1.]);
        assert_eq!(kernel.diag(&xs), expected_diag);
    }

    #[test]
    fn se_output_scale_multiplies() {
        let xs = DVector::from_column_slice(&[-1.0, 0.3, 2.2]);
        let unit = SquaredExponentialKernel::new(0.7, 1.0).unwrap();
        let scaled = SquaredExponentialKernel::new(0.7, 3.0).unwrap();

        let expected = unit.covariance(&xs, &xs) * 9.0;
        assert!(scaled
            .covariance(&xs, &xs)
            .relative_eq(&expected, 1E-12, 1E-12));
        assert_eq!(scaled.diag(&xs), DVector::repeat(3, 9.0));
    }

    #[test]
    fn se_is_symmetric_with_positive_diagonal() {
        let xs = DVector::from_column_slice(&[-4.0, -3.5, 0.0, 0.1, 7.0]);
        let kernel = SquaredExponentialKernel::new(2.0, 0.5).unwrap();
        let cov = kernel.covariance(&xs, &xs);
        assert_eq!(cov, cov.transpose());
        assert!(cov.diagonal().iter().all(|&x| x > 0.0));
    }

    #[test]
    fn se_different_sizes() {
        let kernel = SquaredExponentialKernel::default();

        let x1 = DVector::from_column_slice(&[-4., -3., -2., -1., 1.]);
        let x2 = DVector::from_column_slice(&[-5., 0., 4.]);

        let cov = kernel.covariance(&x1, &x2);
        let expected_cov = DMatrix::from_row_slice(
            5,
            3,
            &[
                6.065_306_60e-01,
                3.354_626_28e-04,
                1.266_416_55e-14,
                1.353_352_83e-01,
                1.110_899_65e-02,
                2.289_734_85e-11,
                1.110_899_65e-02,
                1.353_352_83e-01,
                1.522_997_97e-08,
                3.354_626_28e-04,
                6.065_306_60e-01,
                3.726_653_17e-06,
                1.522_997_97e-08,
                6.065_306_60e-01,
                1.110_899_65e-02,
            ],
        );
        assert!(cov.relative_eq(&expected_cov, 1E-8, 1E-8));
    }
}
