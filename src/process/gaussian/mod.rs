//! Gaussian Processes

use log::debug;
use nalgebra::{DMatrix, DVector};
use rand::Rng;
use std::fmt;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::misc::BoxMuller;

pub mod kernel;
use kernel::{Kernel, KernelError};

mod noise_model;
pub use self::noise_model::NoiseModel;
mod posterior;
pub use self::posterior::Posterior;

/// Errors from GaussianProcess
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum GaussianProcessError {
    /// There are no training observations
    EmptyTrainingSet,
    /// There are no query points
    EmptyQuerySet,
    /// The training inputs and targets have different lengths
    DimensionMismatch { x_train: usize, y_train: usize },
    /// The joint covariance matrix is not square or is smaller than the
    /// training set
    InvalidCovarianceShape {
        nrows: usize,
        ncols: usize,
        n_train: usize,
    },
    /// The training block of the covariance matrix cannot be inverted
    SingularTrainingCovariance,
    /// The observation noise is negative or not finite
    InvalidNoise { noise: f64 },
    /// The jitter is not positive or not finite
    InvalidJitter { eps: f64 },
    /// The kernel could not be built
    Kernel(KernelError),
}

impl std::error::Error for GaussianProcessError {}

impl fmt::Display for GaussianProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTrainingSet => write!(f, "no training data"),
            Self::EmptyQuerySet => write!(f, "no query points"),
            Self::DimensionMismatch { x_train, y_train } => write!(
                f,
                "x_train has {x_train} entries but y_train has {y_train}"
            ),
            Self::InvalidCovarianceShape {
                nrows,
                ncols,
                n_train,
            } => write!(
                f,
                "a {nrows}x{ncols} covariance matrix cannot hold {n_train} \
                 training points"
            ),
            Self::SingularTrainingCovariance => write!(
                f,
                "the training covariance is singular. Try adding a small, \
                 constant noise"
            ),
            Self::InvalidNoise { noise } => {
                write!(f, "noise ({noise}) must be finite and non-negative")
            }
            Self::InvalidJitter { eps } => {
                write!(f, "eps ({eps}) must be finite and greater than zero")
            }
            Self::Kernel(e) => write!(f, "invalid kernel: {e}"),
        }
    }
}

impl From<KernelError> for GaussianProcessError {
    fn from(e: KernelError) -> Self {
        Self::Kernel(e)
    }
}

/// Covariance over the concatenated inputs `[x_train; x_test]`, with the
/// noise model's diagonal added and scaled by the kernel's output variance.
pub fn joint_covariance<K: Kernel>(
    kernel: &K,
    x_train: &DVector<f64>,
    x_test: &DVector<f64>,
    noise_model: &NoiseModel,
) -> DMatrix<f64> {
    let n = x_train.len();
    let xs = DVector::from_iterator(
        n + x_test.len(),
        x_train.iter().chain(x_test.iter()).copied(),
    );
    let k = kernel.covariance(&xs, &xs);
    noise_model.add_noise_to_kernel(&k, n, kernel.output_variance())
}

/// Gaussian Process regression over scalar inputs.
///
/// Fitting conditions the process on the training data once. Every call to
/// [`predict`](GaussianProcess::predict) then draws a fresh sample path from
/// the fixed posterior and keeps it, in order, for plotting.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct GaussianProcess<K>
where
    K: Kernel,
{
    /// Covariance Kernel
    kernel: K,
    /// Noise added to the covariance diagonal
    noise_model: NoiseModel,
    /// x values used in training
    x_train: DVector<f64>,
    /// y values used in training
    y_train: DVector<f64>,
    /// x values the posterior is evaluated at
    x_test: DVector<f64>,
    /// Posterior at `x_test`
    posterior: Posterior,
    /// Sample paths drawn so far
    samples: Vec<DVector<f64>>,
}

impl<K> GaussianProcess<K>
where
    K: Kernel,
{
    /// Fit a Gaussian Process on the given data points
    ///
    /// # Arguments
    /// * `kernel` - Kernel to use to determine covariance
    /// * `x_train` - Values to use for input into `f`
    /// * `y_train` - Known values for `f(x)`
    /// * `x_test` - Values to evaluate the posterior at
    /// * `noise_model` - Noise and jitter added to the covariance diagonal
    pub fn fit(
        kernel: K,
        x_train: DVector<f64>,
        y_train: DVector<f64>,
        x_test: DVector<f64>,
        noise_model: NoiseModel,
    ) -> Result<Self, GaussianProcessError> {
        if x_train.is_empty() {
            return Err(GaussianProcessError::EmptyTrainingSet);
        }
        if x_test.is_empty() {
            return Err(GaussianProcessError::EmptyQuerySet);
        }
        if x_train.len() != y_train.len() {
            return Err(GaussianProcessError::DimensionMismatch {
                x_train: x_train.len(),
                y_train: y_train.len(),
            });
        }

        debug!(
            "fitting gaussian process: kernel = {:?}, noise = {}, eps = {}",
            kernel,
            noise_model.noise(),
            noise_model.eps()
        );

        let k = joint_covariance(&kernel, &x_train, &x_test, &noise_model);
        let posterior = Posterior::new(&y_train, &k)?;

        Ok(GaussianProcess {
            kernel,
            noise_model,
            x_train,
            y_train,
            x_test,
            posterior,
            samples: Vec::new(),
        })
    }

    /// Return the kernel being used in this GP
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn noise_model(&self) -> &NoiseModel {
        &self.noise_model
    }

    pub fn x_train(&self) -> &DVector<f64> {
        &self.x_train
    }

    pub fn y_train(&self) -> &DVector<f64> {
        &self.y_train
    }

    pub fn x_test(&self) -> &DVector<f64> {
        &self.x_test
    }

    /// Return the posterior at the query points
    pub fn posterior(&self) -> &Posterior {
        &self.posterior
    }

    /// Sample paths drawn so far, oldest first
    pub fn samples(&self) -> &[DVector<f64>] {
        &self.samples
    }

    /// Forget all drawn sample paths
    pub fn clear_samples(&mut self) {
        self.samples.clear();
    }

    /// Draw a single sample path without keeping it
    pub fn draw<R: Rng>(&self, rng: &mut R) -> DVector<f64> {
        let z = BoxMuller::standard().sample_vector(self.x_test.len(), rng);
        self.posterior.transform(&z)
    }

    /// Draw a sample path, keep it and return it
    pub fn predict<R: Rng>(&mut self, rng: &mut R) -> &DVector<f64> {
        let path = self.draw(rng);
        self.samples.push(path);
        &self.samples[self.samples.len() - 1]
    }

    /// Draw `n` sample paths, keep them and return them
    pub fn predict_n<R: Rng>(
        &mut self,
        n: usize,
        rng: &mut R,
    ) -> &[DVector<f64>] {
        let start = self.samples.len();
        for _ in 0..n {
            let path = self.draw(rng);
            self.samples.push(path);
        }
        &self.samples[start..]
    }
}
