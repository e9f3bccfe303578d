use serde::Serializer;
use serde_derive::Serialize;
use std::fmt;

use crate::confusion::ConfusionMatrix;

/// A rate that is undefined when its denominator is zero.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Metric {
    Defined(f64),
    Undefined,
}

impl Metric {
    pub fn ratio(numerator: usize, denominator: usize) -> Self {
        if denominator == 0 {
            Metric::Undefined
        } else {
            Metric::Defined(numerator as f64 / denominator as f64)
        }
    }

    #[inline]
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Defined(v) => Some(*v),
            Metric::Undefined => None,
        }
    }

    #[inline]
    pub fn is_defined(&self) -> bool {
        matches!(self, Metric::Defined(_))
    }
}

impl serde::Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.value(), serializer)
    }
}

/// Honors the formatter precision, e.g. `{:.2}`.
impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, f.precision()) {
            (Metric::Defined(v), Some(p)) => write!(f, "{:.*}", p, v),
            (Metric::Defined(v), None) => write!(f, "{}", v),
            (Metric::Undefined, _) => f.write_str("undefined"),
        }
    }
}

#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct MetricSet {
    pub acc: Metric,
    pub tpr: Metric,
    pub fpr: Metric,
    pub precision: Metric,
}

impl From<&ConfusionMatrix> for MetricSet {
    fn from(m: &ConfusionMatrix) -> Self {
        Self {
            acc: Metric::ratio(m.tp() + m.tn(), m.total()),
            tpr: Metric::ratio(m.tp(), m.tp() + m.fn_()),
            fpr: Metric::ratio(m.fp(), m.fp() + m.tn()),
            precision: Metric::ratio(m.tp(), m.tp() + m.fp()),
        }
    }
}
