//! Default constants for the regression demo

use std::f64::consts::TAU;

/// Width of the plotted x-range. The range is centred on zero.
pub const PLOT_WIDTH: f64 = 22.0;
/// Number of training observations
pub const N_TRAIN: usize = 20;
/// Number of query points
pub const N_TEST: usize = 200;
/// Jitter added to the query block diagonal
pub const JITTER: f64 = 1E-8;
/// Kernel output scale, σ_f
pub const OUTPUT_SCALE: f64 = 1.0;
/// Observation noise, σ_n
pub const NOISE: f64 = 0.3;
/// Kernel length scale, ℓ
pub const LENGTH_SCALE: f64 = 1.0;
/// Period of the periodic kernel
pub const PERIOD: f64 = TAU;
/// Number of posterior sample paths drawn for the chart
pub const N_PATHS: usize = 5;
/// Standard deviation of the noise added to the synthetic training data
pub const TRAIN_NOISE_STD: f64 = 0.5;
/// Width of the SVG box in pixels
pub const BOX_WIDTH: f64 = 630.0;
/// Height of the SVG box in pixels
pub const BOX_HEIGHT: f64 = 200.0;
/// Ratio of the taper radius to its half-width
pub const TAPER_RADIUS_RATIO: f64 = 1.2;
