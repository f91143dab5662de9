//! Covariance kernels over scalar inputs

use nalgebra::base::storage::Storage;
use nalgebra::{DMatrix, DVector, Dim, Vector};

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

mod misc;
pub use self::misc::*;

mod squared_exponential;
pub use self::squared_exponential::*;
mod periodic;
pub use self::periodic::*;

/// Kernel Function
pub trait Kernel: std::fmt::Debug + Clone + PartialEq {
    /// Return the number of parameters used in this `Kernel`.
    fn n_parameters(&self) -> usize;

    /// Returns the covariance matrix between every pair of `x1` and `x2`
    fn covariance<R1, R2, S1, S2>(
        &self,
        x1: &Vector<f64, R1, S1>,
        x2: &Vector<f64, R2, S2>,
    ) -> DMatrix<f64>
    where
        R1: Dim,
        R2: Dim,
        S1: Storage<f64, R1>,
        S2: Storage<f64, R2>;

    /// Reports if the given kernel function is stationary.
    fn is_stationary(&self) -> bool;

    /// Returns the diagonal of the kernel(x, x)
    fn diag<R, S>(&self, x: &Vector<f64, R, S>) -> DVector<f64>
    where
        R: Dim,
        S: Storage<f64, R>;

    /// The output variance, σ_f². Noise added to a covariance matrix built
    /// from this kernel is scaled by it too.
    fn output_variance(&self) -> f64;

    /// Return the corresponding parameter vector
    /// The parameters here are in a log-scale
    fn parameters(&self) -> DVector<f64>;

    /// Create a new kernel of the same type from the provided parameters.
    /// The parameters here are in a log-scale
    fn reparameterize(&self, params: &[f64]) -> Result<Self, KernelError>;
}

/// Errors from Kernel construction
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum KernelError {
    /// Parameter Out of Bounds
    ParameterOutOfBounds {
        /// Name of parameter
        name: String,
        /// Value given
        given: f64,
        /// Lower and upper bounds on value
        bounds: (f64, f64),
    },
    /// Too many parameters provided
    ExtraneousParameters(usize),
    /// Too few parameters provided
    MissingParameters(usize),
}

impl std::error::Error for KernelError {}

impl std::fmt::Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParameterOutOfBounds {
                name,
                given,
                bounds,
            } => writeln!(
                f,
                "Parameter {} is out of bounds ({}, {}), given: {}",
                name, bounds.0, bounds.1, given
            ),
            Self::ExtraneousParameters(n) => {
                writeln!(f, "{} extra parameters provided to kernel", n)
            }
            Self::MissingParameters(n) => {
                writeln!(f, "Missing {} parameters", n)
            }
        }
    }
}

/// Scales must be strictly positive and finite
pub(crate) fn check_scale(name: &str, value: f64) -> Result<f64, KernelError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(KernelError::ParameterOutOfBounds {
            name: name.to_string(),
            given: value,
            bounds: (0.0, f64::INFINITY),
        })
    }
}

/// Takes exactly `n` log-scaled parameters
pub(crate) fn exact_parameters(
    params: &[f64],
    n: usize,
) -> Result<&[f64], KernelError> {
    match params.len() {
        m if m < n => Err(KernelError::MissingParameters(n - m)),
        m if m > n => Err(KernelError::ExtraneousParameters(m - n)),
        _ => Ok(params),
    }
}

/// Selects one of the available kernels at runtime
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum KernelKind {
    SquaredExponential(SquaredExponentialKernel),
    Periodic(PeriodicKernel),
}

impl From<SquaredExponentialKernel> for KernelKind {
    fn from(kernel: SquaredExponentialKernel) -> Self {
        KernelKind::SquaredExponential(kernel)
    }
}

impl From<PeriodicKernel> for KernelKind {
    fn from(kernel: PeriodicKernel) -> Self {
        KernelKind::Periodic(kernel)
    }
}

macro_rules! dispatch {
    ($self: expr, $k: ident => $body: expr) => {
        match $self {
            KernelKind::SquaredExponential($k) => $body,
            KernelKind::Periodic($k) => $body,
        }
    };
}

impl Kernel for KernelKind {
    fn n_parameters(&self) -> usize {
        dispatch!(self, k => k.n_parameters())
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
        dispatch!(self, k => k.covariance(x1, x2))
    }

    fn is_stationary(&self) -> bool {
        dispatch!(self, k => k.is_stationary())
    }

    fn diag<R, S>(&self, x: &Vector<f64, R, S>) -> DVector<f64>
    where
        R: Dim,
        S: Storage<f64, R>,
    {
        dispatch!(self, k => k.diag(x))
    }

    fn output_variance(&self) -> f64 {
        dispatch!(self, k => k.output_variance())
    }

    fn parameters(&self) -> DVector<f64> {
        dispatch!(self, k => k.parameters())
    }

    fn reparameterize(&self, params: &[f64]) -> Result<Self, KernelError> {
        dispatch!(self, k => k.reparameterize(params).map(Self::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn kind_dispatches_to_inner_kernel() {
        let se = SquaredExponentialKernel::new(1.5, 2.0).unwrap();
        let kind = KernelKind::from(se.clone());
        let xs = DVector::from_column_slice(&[-1.0, 0.0, 0.5]);

        assert_eq!(kind.covariance(&xs, &xs), se.covariance(&xs, &xs));
        assert_eq!(kind.n_parameters(), 2);
        assert::close(kind.output_variance(), 4.0, 1E-12);
    }

    #[test]
    fn kind_reparameterize_keeps_variant() {
        let kind =
            KernelKind::from(PeriodicKernel::new(1.0, 1.0, TAU).unwrap());
        let new_kind = kind.reparameterize(&[0.0, 0.0, 1.0]).unwrap();
        match new_kind {
            KernelKind::Periodic(k) => {
                assert::close(k.period(), 1.0_f64.exp(), 1E-12);
            }
            KernelKind::SquaredExponential(_) => panic!("variant changed"),
        }
    }

    #[test]
    fn exact_parameters_counts() {
        assert_eq!(
            exact_parameters(&[1.0], 2),
            Err(KernelError::MissingParameters(1))
        );
        assert_eq!(
            exact_parameters(&[1.0, 2.0, 3.0], 2),
            Err(KernelError::ExtraneousParameters(1))
        );
        assert_eq!(exact_parameters(&[1.0, 2.0], 2), Ok(&[1.0, 2.0][..]));
    }

    #[test]
    fn check_scale_rejects_non_positive() {
        assert!(check_scale("length_scale", 0.0).is_err());
        assert!(check_scale("length_scale", -1.0).is_err());
        assert!(check_scale("length_scale", f64::NAN).is_err());
        assert!(check_scale("length_scale", f64::INFINITY).is_err());
        assert_eq!(check_scale("length_scale", 2.0), Ok(2.0));
    }
}
