//! Gaussian Process regression for decorative chart data.
//!
//! Fit a Gaussian Process to noisy observations, draw posterior sample
//! paths, and turn the result into plain records a chart library can draw.
//!
//! # Example
//!
//! Fit the periodic kernel to a handful of points and draw a path.
//!
//! ```
//! use gpviz::prelude::*;
//! use nalgebra::DVector;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(0x1234);
//!
//! let x_train = DVector::from_column_slice(&[-2.0, -1.0, 0.5, 2.0]);
//! let y_train = x_train.map(f64::sin);
//! let x_test = DVector::from_column_slice(&[-1.5, 0.0, 1.0]);
//!
//! let kernel = PeriodicKernel::new(1.0, 1.0, std::f64::consts::TAU).unwrap();
//! let noise = NoiseModel::new(0.3, 1E-8).unwrap();
//!
//! let mut gp =
//!     GaussianProcess::fit(kernel, x_train, y_train, x_test, noise).unwrap();
//!
//! let path = gp.predict(&mut rng);
//! assert_eq!(path.len(), 3);
//! assert_eq!(gp.samples().len(), 1);
//! ```

pub mod chart;
pub mod consts;
pub mod misc;
pub mod prelude;
pub mod process;
