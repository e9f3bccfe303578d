use serde_derive::Serialize;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::matcher::MatchRecord;

/// Box-level confusion matrix. There are no negative boxes, so `tn` is
/// always 0 and no constructor accepts it.
#[derive(Serialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConfusionMatrix {
    tp: usize,
    tn: usize,
    fp: usize,
    #[serde(rename = "fn")]
    fn_: usize,
}

impl ConfusionMatrix {
    #[inline]
    pub fn new(tp: usize, fp: usize, fn_: usize) -> Self {
        Self { tp, tn: 0, fp, fn_ }
    }

    #[inline(always)]
    pub fn tp(&self) -> usize {
        self.tp
    }

    #[inline(always)]
    pub fn tn(&self) -> usize {
        self.tn
    }

    #[inline(always)]
    pub fn fp(&self) -> usize {
        self.fp
    }

    #[inline(always)]
    pub fn fn_(&self) -> usize {
        self.fn_
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.tp + self.tn + self.fp + self.fn_
    }
}

impl From<&MatchRecord> for ConfusionMatrix {
    fn from(rec: &MatchRecord) -> Self {
        Self::new(rec.tp.len(), rec.fp.len(), rec.fn_.len())
    }
}

impl Add for ConfusionMatrix {
    type Output = ConfusionMatrix;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            tp: self.tp + rhs.tp,
            tn: self.tn + rhs.tn,
            fp: self.fp + rhs.fp,
            fn_: self.fn_ + rhs.fn_,
        }
    }
}

impl AddAssign for ConfusionMatrix {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for ConfusionMatrix {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

pub fn aggregate<'a, I>(records: I) -> ConfusionMatrix
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    records.into_iter().map(ConfusionMatrix::from).sum()
}
