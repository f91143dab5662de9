//! Re-imports for convenience
#[doc(no_inline)]
pub use crate::chart::{PlotConfig, Record, ScreenTransform};
#[doc(no_inline)]
pub use crate::misc::{cholesky, BoxMuller};
#[doc(no_inline)]
pub use crate::process::gaussian::kernel::*;
#[doc(no_inline)]
pub use crate::process::gaussian::{
    GaussianProcess, GaussianProcessError, NoiseModel, Posterior,
};
