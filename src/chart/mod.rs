//! Plain records for chart libraries
//!
//! A fitted [`GaussianProcess`] is flattened into one [`Record`] per
//! training observation and one per query point, sorted along the x-axis.
//! [`ScreenTransform`] then maps those records into SVG coordinates.
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use itertools::Itertools;

use crate::process::gaussian::kernel::Kernel;
use crate::process::gaussian::GaussianProcess;

mod config;
pub use config::*;
mod transform;
pub use transform::*;

/// A single point handed to the chart.
///
/// With `serde1` a record serializes as a flat object tagged with
/// `"type": "train"` or `"type": "test"`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde1",
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Record {
    /// A training observation
    Train {
        x: f64,
        y: f64,
        /// Value of the underlying function, if known
        #[cfg_attr(
            feature = "serde1",
            serde(default, skip_serializing_if = "Option::is_none")
        )]
        truth: Option<f64>,
    },
    /// A query point with its posterior summary
    Test {
        x: f64,
        mean: f64,
        lower: f64,
        upper: f64,
        /// Value of each drawn sample path at `x`, in draw order
        samples: Vec<f64>,
        #[cfg_attr(
            feature = "serde1",
            serde(default, skip_serializing_if = "Option::is_none")
        )]
        truth: Option<f64>,
    },
}

impl Record {
    /// Position along the x-axis
    pub fn x(&self) -> f64 {
        match self {
            Record::Train { x, .. } | Record::Test { x, .. } => *x,
        }
    }

    pub fn truth(&self) -> Option<f64> {
        match self {
            Record::Train { truth, .. } | Record::Test { truth, .. } => *truth,
        }
    }

    pub fn is_train(&self) -> bool {
        matches!(self, Record::Train { .. })
    }

    pub fn is_test(&self) -> bool {
        matches!(self, Record::Test { .. })
    }
}

impl<K> GaussianProcess<K>
where
    K: Kernel,
{
    /// Flatten the training data, posterior and drawn sample paths into
    /// chart records sorted by `x`. Ties keep training records first.
    pub fn to_records(&self) -> Vec<Record> {
        let posterior = self.posterior();
        let samples = self.samples();

        let train = self
            .x_train()
            .iter()
            .zip(self.y_train().iter())
            .map(|(&x, &y)| Record::Train { x, y, truth: None });

        let test = self.x_test().iter().enumerate().map(|(i, &x)| {
            Record::Test {
                x,
                mean: posterior.mean()[i],
                lower: posterior.lower()[i],
                upper: posterior.upper()[i],
                samples: samples.iter().map(|path| path[i]).collect(),
                truth: None,
            }
        });

        train
            .chain(test)
            .sorted_by(|a, b| a.x().total_cmp(&b.x()))
            .collect()
    }
}
