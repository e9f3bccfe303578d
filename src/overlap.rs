use serde_derive::Serialize;

use crate::bbox::BBox;

/// Intersection of a prediction with a ground-truth box, measured against
/// the ground-truth area (coverage, not IoU).
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub intersection: i128,
    pub reference_area: i128,
}

impl Overlap {
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.intersection as f64 / self.reference_area as f64
    }
}

/// Returns `None` when the boxes are disjoint. Touching boxes give a zero
/// intersection, which is still an overlap.
pub fn overlap(ground_truth: &BBox, predicted: &BBox) -> Option<Overlap> {
    let dx = i128::from(ground_truth.right().min(predicted.right()))
        - i128::from(ground_truth.left().max(predicted.left()));
    let dy = i128::from(ground_truth.bottom().min(predicted.bottom()))
        - i128::from(ground_truth.top().max(predicted.top()));

    if dx < 0 || dy < 0 {
        return None;
    }

    Some(Overlap {
        intersection: dx * dy,
        reference_area: ground_truth.area(),
    })
}

#[inline]
pub fn overlap_fraction(ground_truth: &BBox, predicted: &BBox) -> Option<f64> {
    overlap(ground_truth, predicted).map(|o| o.fraction())
}
