use serde_derive::Serialize;
use std::fmt;

use crate::error::Error;

/// Left-top-right-bottom box in integer pixel coordinates.
///
/// Only constructible through [`BBox::ltrb`], which guarantees
/// `xmax > xmin` and `ymax > ymin`.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BBox {
    xmin: i32,
    ymin: i32,
    xmax: i32,
    ymax: i32,
}

impl BBox {
    #[inline]
    pub fn ltrb(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Result<Self, Error> {
        if xmax <= xmin || ymax <= ymin {
            return Err(Error::InvalidBox {
                xmin,
                ymin,
                xmax,
                ymax,
            });
        }

        Ok(BBox {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    /// Left-top corner plus width-height.
    #[inline]
    pub fn ltwh(left: i32, top: i32, width: i32, height: i32) -> Result<Self, Error> {
        Self::ltrb(left, top, left.saturating_add(width), top.saturating_add(height))
    }

    #[inline(always)]
    pub fn left(&self) -> i32 {
        self.xmin
    }

    #[inline(always)]
    pub fn top(&self) -> i32 {
        self.ymin
    }

    #[inline(always)]
    pub fn right(&self) -> i32 {
        self.xmax
    }

    #[inline(always)]
    pub fn bottom(&self) -> i32 {
        self.ymax
    }

    #[inline(always)]
    pub fn width(&self) -> i128 {
        i128::from(self.xmax) - i128::from(self.xmin)
    }

    #[inline(always)]
    pub fn height(&self) -> i128 {
        i128::from(self.ymax) - i128::from(self.ymin)
    }

    #[inline]
    pub fn area(&self) -> i128 {
        self.width() * self.height()
    }

    #[inline]
    pub fn as_array(&self) -> [i32; 4] {
        [self.xmin, self.ymin, self.xmax, self.ymax]
    }

    /// Intersection area, 0 for disjoint or touching boxes.
    pub fn intersection(&self, other: &BBox) -> i128 {
        let dx = i128::from(self.xmax.min(other.xmax)) - i128::from(self.xmin.max(other.xmin));
        let dy = i128::from(self.ymax.min(other.ymax)) - i128::from(self.ymin.max(other.ymin));

        dx.max(0) * dy.max(0)
    }

    pub fn union(&self, other: &BBox) -> i128 {
        self.area() + other.area() - self.intersection(other)
    }

    /// Intersection over union. Informational only, matching uses
    /// [`crate::overlap::overlap`].
    pub fn iou(&self, other: &BBox) -> f64 {
        self.intersection(other) as f64 / self.union(other) as f64
    }
}

impl TryFrom<[i32; 4]> for BBox {
    type Error = Error;

    fn try_from(v: [i32; 4]) -> Result<Self, Self::Error> {
        BBox::ltrb(v[0], v[1], v[2], v[3])
    }
}

impl From<BBox> for [i32; 4] {
    fn from(bbox: BBox) -> Self {
        bbox.as_array()
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.xmin, self.ymin, self.xmax, self.ymax
        )
    }
}
