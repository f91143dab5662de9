use super::Record;

/// Edge taper `A(x) = (m - |x|) / r`. With `r > m` it stays positive over
/// `[-m, m]` and shrinks towards the edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Taper {
    pub m: f64,
    pub r: f64,
}

impl Taper {
    pub fn new(m: f64, r: f64) -> Self {
        Taper { m, r }
    }

    #[inline]
    pub fn at(&self, x: f64) -> f64 {
        (self.m - x.abs()) / self.r
    }
}

/// Maps records from data space into SVG space.
///
/// SVG y grows downwards, so every y-valued field is multiplied by
/// `-ratio` (and by the taper, if any, evaluated at the original `x`).
/// `x` is multiplied by `ratio`.
///
/// # Example
///
/// ```
/// use gpviz::chart::{Record, ScreenTransform};
///
/// let st = ScreenTransform::new(10.0).with_truth(|x| 2.0 * x);
/// let rec = st.apply(&Record::Train { x: 1.0, y: 0.5, truth: None });
///
/// assert_eq!(rec, Record::Train { x: 10.0, y: -5.0, truth: Some(-20.0) });
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ScreenTransform {
    ratio: f64,
    taper: Option<Taper>,
    truth: Option<fn(f64) -> f64>,
}

impl ScreenTransform {
    /// Scale by `ratio` pixels per data unit
    pub fn new(ratio: f64) -> Self {
        ScreenTransform {
            ratio,
            taper: None,
            truth: None,
        }
    }

    /// Fade y-values out towards the edges of the plot
    #[must_use]
    pub fn with_taper(self, taper: Taper) -> Self {
        ScreenTransform {
            taper: Some(taper),
            ..self
        }
    }

    /// Fill every record's `truth` with `f(x)`, transformed like the other
    /// y-values
    #[must_use]
    pub fn with_truth(self, f: fn(f64) -> f64) -> Self {
        ScreenTransform {
            truth: Some(f),
            ..self
        }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn taper(&self) -> Option<Taper> {
        self.taper
    }

    /// Factor applied to y-values at data-space `x`
    #[inline]
    pub fn y_factor(&self, x: f64) -> f64 {
        let taper = self.taper.map_or(1.0, |t| t.at(x));
        -self.ratio * taper
    }

    pub fn apply(&self, record: &Record) -> Record {
        let x = record.x();
        let fy = self.y_factor(x);
        let truth = match self.truth {
            Some(f) => Some(f(x) * fy),
            None => record.truth().map(|t| t * fy),
        };

        match record {
            Record::Train { y, .. } => Record::Train {
                x: x * self.ratio,
                y: y * fy,
                truth,
            },
            Record::Test {
                mean,
                lower,
                upper,
                samples,
                ..
            } => Record::Test {
                x: x * self.ratio,
                mean: mean * fy,
                lower: lower * fy,
                upper: upper * fy,
                samples: samples.iter().map(|s| s * fy).collect(),
                truth,
            },
        }
    }

    pub fn apply_all(&self, records: &[Record]) -> Vec<Record> {
        records.iter().map(|r| self.apply(r)).collect()
    }
}
