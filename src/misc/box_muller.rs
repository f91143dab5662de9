//! Normal draws via the Box–Muller transform
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use nalgebra::DVector;
use rand::distributions::Distribution;
use rand::Rng;
use std::f64::consts::TAU;
use std::fmt;

/// Normal distribution N(μ, σ) sampled with the basic Box–Muller transform
/// over a uniform generator.
///
/// Each draw consumes two uniforms `u, v ∈ [0, 1)` and returns
/// `μ + σ·sqrt(−2 ln(1 − u))·cos(2πv)`. The sine half of the pair is
/// discarded.
///
/// # Example
///
/// ```
/// use gpviz::misc::BoxMuller;
/// use rand::distributions::Distribution;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
/// let bm = BoxMuller::new(3.0, 0.5).unwrap();
///
/// let xs: Vec<f64> = bm.sample_iter(&mut rng).take(10_000).collect();
/// let mean = xs.iter().sum::<f64>() / 10_000.0;
/// assert!((mean - 3.0).abs() < 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct BoxMuller {
    /// Mean
    mean: f64,
    /// Standard deviation
    std: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum BoxMullerError {
    /// The mean is infinite or NaN
    MeanNotFinite { mean: f64 },
    /// The standard deviation is less than zero
    StdTooLow { std: f64 },
    /// The standard deviation is infinite or NaN
    StdNotFinite { std: f64 },
}

impl BoxMuller {
    /// Create a new Box–Muller sampler. A zero standard deviation is
    /// allowed and yields the mean on every draw.
    pub fn new(mean: f64, std: f64) -> Result<Self, BoxMullerError> {
        if !mean.is_finite() {
            Err(BoxMullerError::MeanNotFinite { mean })
        } else if std < 0.0 {
            Err(BoxMullerError::StdTooLow { std })
        } else if !std.is_finite() {
            Err(BoxMullerError::StdNotFinite { std })
        } else {
            Ok(BoxMuller { mean, std })
        }
    }

    /// Standard normal, N(0, 1)
    #[inline]
    #[must_use]
    pub fn standard() -> Self {
        BoxMuller {
            mean: 0.0,
            std: 1.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[inline]
    #[must_use]
    pub fn std(&self) -> f64 {
        self.std
    }

    /// Draw `n` values into a column vector
    pub fn sample_vector<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> DVector<f64> {
        DVector::from_fn(n, |_, _| self.sample(rng))
    }
}

impl Default for BoxMuller {
    fn default() -> Self {
        Self::standard()
    }
}

impl Distribution<f64> for BoxMuller {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        // 1 - u keeps the log argument in (0, 1]
        let u: f64 = 1.0 - rng.gen::<f64>();
        let v: f64 = rng.gen();
        let z = (-2.0 * u.ln()).sqrt() * (TAU * v).cos();
        z.mul_add(self.std, self.mean)
    }
}

impl std::error::Error for BoxMullerError {}

impl fmt::Display for BoxMullerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MeanNotFinite { mean } => {
                write!(f, "non-finite mean: {mean}")
            }
            Self::StdTooLow { std } => {
                write!(f, "std ({std}) must be non-negative")
            }
            Self::StdNotFinite { std } => write!(f, "non-finite std: {std}"),
        }
    }
}
