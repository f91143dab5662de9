use super::{
    abs_distances, check_scale, exact_parameters, Kernel, KernelError,
};
use nalgebra::base::storage::Storage;
use nalgebra::{dvector, DMatrix, DVector, Dim, Vector};
use std::f64::consts::PI;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Periodic kernel
///
/// k(x_i, x_j) = σ_f² exp(-sin²(π d(x_i, x_j) / period) / (2 ℓ²))
///
/// This is the squared-exponential kernel with the squared distance
/// replaced by `sin²(π d / period)`, so points a whole period apart are
/// perfectly correlated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct PeriodicKernel {
    length_scale: f64,
    output_scale: f64,
    period: f64,
}

impl PeriodicKernel {
    /// Create a new PeriodicKernel
    pub fn new(
        length_scale: f64,
        output_scale: f64,
        period: f64,
    ) -> Result<Self, KernelError> {
        Ok(Self {
            length_scale: check_scale("length_scale", length_scale)?,
            output_scale: check_scale("output_scale", output_scale)?,
            period: check_scale("period", period)?,
        })
    }

    /// Create a new `PeriodicKernel` without checking parameters
    #[must_use]
    pub fn new_unchecked(
        length_scale: f64,
        output_scale: f64,
        period: f64,
    ) -> Self {
        Self {
            length_scale,
            output_scale,
            period,
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

    #[must_use]
    pub fn period(&self) -> f64 {
        self.period
    }
}

impl Kernel for PeriodicKernel {
    fn n_parameters(&self) -> usize {
        3
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
        abs_distances(x1, x2).map(|d| {
            let s = (PI * d / self.period).sin();
            s2 * (s * s / denom).exp()
        })
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
        dvector![
            self.length_scale.ln(),
            self.output_scale.ln(),
            self.period.ln()
        ]
    }

    fn reparameterize(&self, params: &[f64]) -> Result<Self, KernelError> {
        let params = exact_parameters(params, 3)?;
        Self::new(params[0].exp(), params[1].exp(), params[2].exp())
    }
}
