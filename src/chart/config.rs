use log::debug;
use nalgebra::DVector;
use rand::Rng;
use std::fmt;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use super::{Record, ScreenTransform, Taper};
use crate::consts;
use crate::misc::{BoxMuller, BoxMullerError};
use crate::process::gaussian::kernel::{
    KernelError, KernelKind, PeriodicKernel, SquaredExponentialKernel,
};
use crate::process::gaussian::{
    GaussianProcess, GaussianProcessError, NoiseModel,
};

/// Which kernel the demo fits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum KernelType {
    SquaredExponential,
    #[default]
    Periodic,
}

/// Settings for the regression demo: the synthetic data, the process and
/// the SVG box it is drawn in.
///
/// Every field has a default, so with `serde1` any subset of fields can be
/// deserialized.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(default, rename_all = "snake_case"))]
pub struct PlotConfig {
    /// Width of the x-range, centred on zero
    pub plot_width: f64,
    /// Number of training observations
    pub n_train: usize,
    /// Number of query points
    pub n_test: usize,
    /// Jitter on the query diagonal
    pub eps: f64,
    /// Kernel output scale, σ_f
    pub output_scale: f64,
    /// Observation noise, σ_n
    pub noise: f64,
    /// Kernel length scale, ℓ
    pub length_scale: f64,
    /// Period of the periodic kernel
    pub period: f64,
    /// Number of sample paths to draw
    pub n_paths: usize,
    /// Standard deviation of the noise added to `sin(x)` in the training
    /// data
    pub train_noise_std: f64,
    /// Width of the SVG box in pixels
    pub box_width: f64,
    /// Height of the SVG box in pixels
    pub box_height: f64,
    pub kernel_type: KernelType,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            plot_width: consts::PLOT_WIDTH,
            n_train: consts::N_TRAIN,
            n_test: consts::N_TEST,
            eps: consts::JITTER,
            output_scale: consts::OUTPUT_SCALE,
            noise: consts::NOISE,
            length_scale: consts::LENGTH_SCALE,
            period: consts::PERIOD,
            n_paths: consts::N_PATHS,
            train_noise_std: consts::TRAIN_NOISE_STD,
            box_width: consts::BOX_WIDTH,
            box_height: consts::BOX_HEIGHT,
            kernel_type: KernelType::default(),
        }
    }
}

/// Errors from running the demo pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum PlotError {
    /// The plot width is not positive and finite
    InvalidPlotWidth { width: f64 },
    /// The training noise cannot be sampled
    TrainNoise(BoxMullerError),
    /// The kernel could not be built
    Kernel(KernelError),
    /// The process could not be fit
    Process(GaussianProcessError),
}

impl std::error::Error for PlotError {}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPlotWidth { width } => {
                write!(f, "plot width ({width}) must be finite and positive")
            }
            Self::TrainNoise(e) => write!(f, "invalid training noise: {e}"),
            Self::Kernel(e) => write!(f, "invalid kernel: {e}"),
            Self::Process(e) => write!(f, "failed to fit process: {e}"),
        }
    }
}

impl From<BoxMullerError> for PlotError {
    fn from(e: BoxMullerError) -> Self {
        Self::TrainNoise(e)
    }
}

impl From<KernelError> for PlotError {
    fn from(e: KernelError) -> Self {
        Self::Kernel(e)
    }
}

impl From<GaussianProcessError> for PlotError {
    fn from(e: GaussianProcessError) -> Self {
        Self::Process(e)
    }
}

impl PlotConfig {
    pub fn with_kernel_type(self, kernel_type: KernelType) -> Self {
        Self {
            kernel_type,
            ..self
        }
    }

    pub fn with_sizes(self, n_train: usize, n_test: usize) -> Self {
        Self {
            n_train,
            n_test,
            ..self
        }
    }

    pub fn with_noise(self, noise: f64) -> Self {
        Self { noise, ..self }
    }

    pub fn with_n_paths(self, n_paths: usize) -> Self {
        Self { n_paths, ..self }
    }

    pub fn with_box(self, box_width: f64, box_height: f64) -> Self {
        Self {
            box_width,
            box_height,
            ..self
        }
    }

    /// `(xmin, xmax)`
    pub fn x_range(&self) -> (f64, f64) {
        let half = self.plot_width / 2.0;
        (-half, half)
    }

    fn check_width(&self) -> Result<(), PlotError> {
        if self.plot_width > 0.0 && self.plot_width.is_finite() {
            Ok(())
        } else {
            Err(PlotError::InvalidPlotWidth {
                width: self.plot_width,
            })
        }
    }

    /// Build the configured kernel
    pub fn kernel(&self) -> Result<KernelKind, KernelError> {
        match self.kernel_type {
            KernelType::SquaredExponential => SquaredExponentialKernel::new(
                self.length_scale,
                self.output_scale,
            )
            .map(KernelKind::from),
            KernelType::Periodic => PeriodicKernel::new(
                self.length_scale,
                self.output_scale,
                self.period,
            )
            .map(KernelKind::from),
        }
    }

    pub fn noise_model(&self) -> Result<NoiseModel, GaussianProcessError> {
        NoiseModel::new(self.noise, self.eps)
    }

    /// Draw `n_train` inputs uniformly from the x-range and observe
    /// `sin(x)` with Gaussian noise.
    pub fn training_data<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<(DVector<f64>, DVector<f64>), PlotError> {
        self.check_width()?;
        let noise = BoxMuller::new(0.0, self.train_noise_std)?;
        let (xmin, _) = self.x_range();

        let xs = DVector::from_fn(self.n_train, |_, _| {
            xmin + self.plot_width * rng.gen::<f64>()
        });
        let noise = noise.sample_vector(self.n_train, rng);
        let ys = xs.map(f64::sin) + noise;
        Ok((xs, ys))
    }

    /// `n_test` evenly spaced points from `xmin` to `xmax`, both included
    pub fn query_points(&self) -> DVector<f64> {
        let (xmin, _) = self.x_range();
        let step = if self.n_test > 1 {
            self.plot_width / (self.n_test - 1) as f64
        } else {
            0.0
        };
        DVector::from_fn(self.n_test, |i, _| (i as f64).mul_add(step, xmin))
    }

    /// Run the demo: draw training data, fit the configured kernel and draw
    /// `n_paths` sample paths.
    pub fn fit<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<GaussianProcess<KernelKind>, PlotError> {
        let (x_train, y_train) = self.training_data(rng)?;
        let x_test = self.query_points();
        let kernel = self.kernel()?;
        let noise_model = self.noise_model()?;

        let mut gp = GaussianProcess::fit(
            kernel,
            x_train,
            y_train,
            x_test,
            noise_model,
        )?;
        gp.predict_n(self.n_paths, rng);
        debug!(
            "fit {:?} kernel, drew {} sample paths",
            self.kernel_type, self.n_paths
        );
        Ok(gp)
    }

    /// Pixels per data unit
    pub fn box_plot_ratio(&self) -> f64 {
        self.box_width / self.plot_width
    }

    /// Transform used for the in-post plot, with `sin(x)` as the ribbon
    pub fn screen_transform(&self) -> ScreenTransform {
        ScreenTransform::new(self.box_plot_ratio()).with_truth(f64::sin)
    }

    /// Transform used for the page banner, faded out towards the edges
    pub fn banner_transform(&self) -> ScreenTransform {
        let (_, m) = self.x_range();
        self.screen_transform()
            .with_taper(Taper::new(m, m * consts::TAPER_RADIUS_RATIO))
    }

    /// Fit and return records ready to draw with `transform`
    pub fn records<R: Rng>(
        &self,
        transform: &ScreenTransform,
        rng: &mut R,
    ) -> Result<Vec<Record>, PlotError> {
        let gp = self.fit(rng)?;
        Ok(transform.apply_all(&gp.to_records()))
    }
}
