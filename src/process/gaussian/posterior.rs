use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use super::GaussianProcessError;
use crate::misc::cholesky;

/// Posterior of a Gaussian Process at a set of query points.
///
/// Built once from the joint covariance matrix and never changed after.
/// Drawing sample paths only reads the mean and the Cholesky factor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Posterior {
    /// Training-training block, K(X, X) + noise
    train_train: DMatrix<f64>,
    /// Training-query block, K(X, X*)
    train_test: DMatrix<f64>,
    /// Query-training block, K(X*, X)
    test_train: DMatrix<f64>,
    /// Query-query block, K(X*, X*) + jitter
    test_test: DMatrix<f64>,
    /// Posterior mean at the query points
    mean: DVector<f64>,
    /// Posterior covariance at the query points
    cov: DMatrix<f64>,
    /// Lower Cholesky factor of `cov`
    chol: DMatrix<f64>,
    /// mean - 2·std
    lower: DVector<f64>,
    /// mean + 2·std
    upper: DVector<f64>,
}

impl Posterior {
    /// Condition the joint covariance `k` on the training targets.
    ///
    /// The first `y_train.len()` rows and columns of `k` belong to the
    /// training inputs and the rest to the query inputs.
    ///
    /// The training block is inverted directly, so the result is only as
    /// well conditioned as the noise on its diagonal allows. A posterior
    /// covariance that is not positive-definite is not an error: its
    /// Cholesky factor, and every sample path drawn from it, carries `NaN`.
    pub fn new(
        y_train: &DVector<f64>,
        k: &DMatrix<f64>,
    ) -> Result<Self, GaussianProcessError> {
        let n = y_train.len();
        let total = k.nrows();

        if !k.is_square() || total < n {
            return Err(GaussianProcessError::InvalidCovarianceShape {
                nrows: k.nrows(),
                ncols: k.ncols(),
                n_train: n,
            });
        }
        let m = total - n;

        debug!("computing posterior: {} train, {} query", n, m);

        let train_train = k.view((0, 0), (n, n)).clone_owned();
        let train_test = k.view((0, n), (n, m)).clone_owned();
        let test_train = k.view((n, 0), (m, n)).clone_owned();
        let test_test = k.view((n, n), (m, m)).clone_owned();

        let k_inv = train_train
            .clone()
            .try_inverse()
            .ok_or(GaussianProcessError::SingularTrainingCovariance)?;

        // K(X*, X) K(X, X)⁻¹
        let proj = &test_train * &k_inv;
        let mean = &proj * y_train;
        let cov = &test_test - &proj * &train_test;
        let chol = cholesky(&cov);

        if chol.iter().any(|x| !x.is_finite()) {
            warn!(
                "posterior covariance is not positive-definite; sample \
                 paths will contain NaN"
            );
        }

        let var = cov.diagonal();
        if var.iter().any(|&v| v < 0.0) {
            warn!("posterior covariance has negative variances");
        }

        let two_std = var.map(|v| 2.0 * v.sqrt());
        let lower = &mean - &two_std;
        let upper = &mean + &two_std;

        Ok(Posterior {
            train_train,
            train_test,
            test_train,
            test_test,
            mean,
            cov,
            chol,
            lower,
            upper,
        })
    }

    pub fn train_train(&self) -> &DMatrix<f64> {
        &self.train_train
    }

    pub fn train_test(&self) -> &DMatrix<f64> {
        &self.train_test
    }

    pub fn test_train(&self) -> &DMatrix<f64> {
        &self.test_train
    }

    pub fn test_test(&self) -> &DMatrix<f64> {
        &self.test_test
    }

    /// Return the mean of the posterior
    pub fn mean(&self) -> &DVector<f64> {
        &self.mean
    }

    /// Return the covariance of the posterior
    pub fn cov(&self) -> &DMatrix<f64> {
        &self.cov
    }

    /// Return the lower Cholesky factor of the posterior covariance
    pub fn cholesky(&self) -> &DMatrix<f64> {
        &self.chol
    }

    /// Return the standard deviation of the posterior
    pub fn std(&self) -> DVector<f64> {
        self.cov.diagonal().map(f64::sqrt)
    }

    /// Lower confidence bound, mean - 2·std
    pub fn lower(&self) -> &DVector<f64> {
        &self.lower
    }

    /// Upper confidence bound, mean + 2·std
    pub fn upper(&self) -> &DVector<f64> {
        &self.upper
    }

    /// Number of query points
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Map a standard-normal vector `z` to a posterior sample, `L·z + mean`
    ///
    /// # Panics
    /// If `z` does not have one entry per query point.
    pub fn transform(&self, z: &DVector<f64>) -> DVector<f64> {
        assert_eq!(z.len(), self.len(), "z must match the query size");
        &self.chol * z + &self.mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1E-10;

    fn joint() -> (DVector<f64>, DMatrix<f64>) {
        // one training point and two query points
        let y = DVector::from_column_slice(&[2.0]);
        let k = DMatrix::from_row_slice(
            3,
            3,
            &[2.0, 1.0, 0.5, 1.0, 2.0, 0.2, 0.5, 0.2, 1.0],
        );
        (y, k)
    }

    #[test]
    fn blocks_partition_the_joint_matrix() {
        let (y, k) = joint();
        let post = Posterior::new(&y, &k).unwrap();
        assert_eq!(post.train_train(), &DMatrix::from_element(1, 1, 2.0));
        assert_eq!(
            post.train_test(),
            &DMatrix::from_row_slice(1, 2, &[1.0, 0.5])
        );
        assert_eq!(post.test_train(), &post.train_test().transpose());
        assert_eq!(
            post.test_test(),
            &DMatrix::from_row_slice(2, 2, &[2.0, 0.2, 0.2, 1.0])
        );
    }

    #[test]
    fn closed_form_one_training_point() {
        let (y, k) = joint();
        let post = Posterior::new(&y, &k).unwrap();

        // mean = k*ᵀ y / k
        let expected_mean = DVector::from_column_slice(&[1.0, 0.5]);
        assert!(post.mean().relative_eq(&expected_mean, TOL, TOL));

        // cov = K** - k* k*ᵀ / k
        let expected_cov =
            DMatrix::from_row_slice(2, 2, &[1.5, -0.05, -0.05, 0.875]);
        assert!(post.cov().relative_eq(&expected_cov, TOL, TOL));

        let l = post.cholesky();
        assert!((l * l.transpose()).relative_eq(&expected_cov, TOL, TOL));

        let two_std = expected_cov.diagonal().map(|v| 2.0 * v.sqrt());
        assert!(post
            .lower()
            .relative_eq(&(&expected_mean - &two_std), TOL, TOL));
        assert!(post
            .upper()
            .relative_eq(&(&expected_mean + &two_std), TOL, TOL));
    }

    #[test]
    fn singular_training_block_is_an_error() {
        let y = DVector::from_column_slice(&[1.0, 1.0]);
        let k = DMatrix::from_element(3, 3, 1.0);
        assert_eq!(
            Posterior::new(&y, &k),
            Err(GaussianProcessError::SingularTrainingCovariance)
        );
    }

    #[test]
    fn too_many_targets_is_an_error() {
        let y = DVector::from_column_slice(&[1.0, 1.0, 1.0]);
        let k: DMatrix<f64> = DMatrix::identity(2, 2);
        assert!(matches!(
            Posterior::new(&y, &k),
            Err(GaussianProcessError::InvalidCovarianceShape { .. })
        ));
    }

    #[test]
    fn non_positive_definite_posterior_yields_nan_not_error() {
        // the query block is less certain than the data allows
        let y = DVector::from_column_slice(&[0.0]);
        let k = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
        let post = Posterior::new(&y, &k).unwrap();
        assert!(post.cov()[(0, 0)] < 0.0);
        assert!(post.cholesky()[(0, 0)].is_nan());
        assert!(post.lower()[0].is_nan());
    }

    #[test]
    fn transform_of_zero_is_the_mean() {
        let (y, k) = joint();
        let post = Posterior::new(&y, &k).unwrap();
        let z = DVector::zeros(2);
        assert_eq!(post.transform(&z), post.mean().clone());
    }
}
