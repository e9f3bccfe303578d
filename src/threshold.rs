use serde_derive::Serialize;
use std::fmt;

use crate::error::Error;
use crate::overlap::Overlap;

/// Minimum coverage of a ground-truth box, in whole percents.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Threshold(u8);

impl Threshold {
    pub const MAX: Threshold = Threshold(100);

    pub fn from_percent(percent: i64) -> Result<Self, Error> {
        match u8::try_from(percent) {
            Ok(p) if p <= 100 => Ok(Threshold(p)),
            _ => Err(Error::ThresholdOutOfRange(percent)),
        }
    }

    #[inline]
    pub fn percent(&self) -> u8 {
        self.0
    }

    #[inline]
    pub fn fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Inclusive: `intersection / reference_area >= percent / 100`, compared
    /// without rounding.
    #[inline]
    pub fn admits(&self, overlap: &Overlap) -> bool {
        overlap.intersection * 100 >= i128::from(self.0) * overlap.reference_area
    }

    #[inline]
    pub fn admits_any(&self, overlap: Option<Overlap>) -> bool {
        overlap.map_or(false, |o| self.admits(&o))
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::MAX
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ov(intersection: i128, reference_area: i128) -> Overlap {
        Overlap {
            intersection,
            reference_area,
        }
    }

    #[test]
    fn validates_range() {
        assert_eq!(Threshold::from_percent(0).unwrap().percent(), 0);
        assert_eq!(Threshold::from_percent(100).unwrap().fraction(), 1.0);
        assert!(matches!(
            Threshold::from_percent(101),
            Err(Error::ThresholdOutOfRange(101))
        ));
        assert!(Threshold::from_percent(-1).is_err());
        assert_eq!(Threshold::default(), Threshold::MAX);
    }

    #[test]
    fn inclusive_admission() {
        let t = Threshold::from_percent(25).unwrap();

        assert!(t.admits(&ov(25, 100)));
        assert!(!t.admits(&ov(24, 100)));
        assert!(Threshold::MAX.admits(&ov(100, 100)));
        assert!(!Threshold::MAX.admits(&ov(99, 100)));
    }

    #[test]
    fn zero_admits_touching_but_not_disjoint() {
        let t = Threshold::from_percent(0).unwrap();

        assert!(t.admits_any(Some(ov(0, 100))));
        assert!(!t.admits_any(None));
    }

    #[test]
    fn huge_areas_compare_exactly() {
        let area = 1_000_000_000_000_000_000i128;

        assert!(Threshold::MAX.admits(&ov(area, area)));
        assert!(!Threshold::MAX.admits(&ov(area - 1, area)));

        let side = (1i128 << 32) - 1;
        let t = Threshold::from_percent(99).unwrap();
        assert!(t.admits(&ov(side * side, side * side)));
        assert!(!t.admits(&ov(side * side * 98 / 100, side * side)));
    }
}
