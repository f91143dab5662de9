use nalgebra::{DMatrix, DVector};

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use super::GaussianProcessError;
use crate::consts::JITTER;

/// Diagonal noise added to the joint train/query covariance matrix.
///
/// The training block gets the observation variance `noise²`, or the jitter
/// `eps` when there is no observation noise. The query block always gets
/// `eps`, which keeps the posterior covariance positive-definite.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct NoiseModel {
    /// Observation noise standard deviation, σ_n
    noise: f64,
    /// Jitter on the query diagonal
    eps: f64,
}

impl Default for NoiseModel {
    fn default() -> Self {
        NoiseModel {
            noise: 0.0,
            eps: JITTER,
        }
    }
}

impl NoiseModel {
    /// Create a new noise model
    ///
    /// # Arguments
    /// - noise: observation noise standard deviation, σ_n ≥ 0
    /// - eps: diagonal jitter, eps > 0
    pub fn new(noise: f64, eps: f64) -> Result<Self, GaussianProcessError> {
        if !(noise >= 0.0 && noise.is_finite()) {
            Err(GaussianProcessError::InvalidNoise { noise })
        } else if !(eps > 0.0 && eps.is_finite()) {
            Err(GaussianProcessError::InvalidJitter { eps })
        } else {
            Ok(NoiseModel { noise, eps })
        }
    }

    /// Creates a new noise model without checking the parameters
    #[must_use]
    pub fn new_unchecked(noise: f64, eps: f64) -> Self {
        NoiseModel { noise, eps }
    }

    #[must_use]
    pub fn noise(&self) -> f64 {
        self.noise
    }

    #[must_use]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Variance added to each training point
    #[must_use]
    pub fn train_variance(&self) -> f64 {
        let var = self.noise * self.noise;
        if var == 0.0 {
            self.eps
        } else {
            var
        }
    }

    /// The noise diagonal for `n_train` training and `n_test` query points
    pub fn diagonal(&self, n_train: usize, n_test: usize) -> DVector<f64> {
        let train_var = self.train_variance();
        DVector::from_fn(n_train + n_test, |i, _| {
            if i < n_train {
                train_var
            } else {
                self.eps
            }
        })
    }

    /// Enact the noise model onto a joint covariance matrix whose first
    /// `n_train` rows belong to the training inputs. The noise is scaled by
    /// `scale`, the kernel's output variance.
    pub fn add_noise_to_kernel(
        &self,
        cov: &DMatrix<f64>,
        n_train: usize,
        scale: f64,
    ) -> DMatrix<f64> {
        let n_test = cov.nrows().saturating_sub(n_train);
        let diag = self.diagonal(n_train, n_test) * scale;
        cov + &DMatrix::from_diagonal(&diag)
    }
}
