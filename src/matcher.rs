use clap::ValueEnum;
use munkres::{solve_assignment, WeightMatrix};
use serde_derive::Serialize;

use crate::bbox::BBox;
use crate::overlap::overlap;
use crate::threshold::Threshold;

#[derive(Serialize, ValueEnum, Debug, Copy, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// First admitted prediction wins, in input order.
    #[default]
    Greedy,
    /// Hungarian assignment maximizing the number of matches, then coverage.
    Optimal,
}

/// Outcome of matching one image.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchRecord {
    /// (ground truth, prediction)
    pub tp: Vec<(BBox, BBox)>,
    pub fp: Vec<BBox>,
    #[serde(rename = "fn")]
    pub fn_: Vec<BBox>,
}

impl MatchRecord {
    /// Every box unmatched: ground truth to `fn`, predictions to `fp`.
    pub fn unmatched(ground_truth: &[BBox], predicted: &[BBox]) -> Self {
        Self {
            tp: Vec::new(),
            fp: predicted.to_vec(),
            fn_: ground_truth.to_vec(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tp.is_empty() && self.fp.is_empty() && self.fn_.is_empty()
    }

    fn from_pairs(ground_truth: &[BBox], predicted: &[BBox], pairs: &[Option<usize>]) -> Self {
        let mut claimed = vec![false; predicted.len()];
        let mut tp = Vec::new();
        let mut fn_ = Vec::new();

        for (gt, pair) in ground_truth.iter().zip(pairs) {
            match pair {
                Some(p) => {
                    claimed[*p] = true;
                    tp.push((*gt, predicted[*p]));
                }
                None => fn_.push(*gt),
            }
        }

        let fp = predicted
            .iter()
            .zip(&claimed)
            .filter(|&(_, &c)| !c)
            .map(|(p, _)| *p)
            .collect();

        Self { tp, fp, fn_ }
    }
}

pub fn match_image(
    ground_truth: &[BBox],
    predicted: &[BBox],
    threshold: Threshold,
    strategy: Strategy,
) -> MatchRecord {
    let pairs = match strategy {
        Strategy::Greedy => greedy_pairs(ground_truth, predicted, threshold),
        Strategy::Optimal => optimal_pairs(ground_truth, predicted, threshold)
            .unwrap_or_else(|| greedy_pairs(ground_truth, predicted, threshold)),
    };

    MatchRecord::from_pairs(ground_truth, predicted, &pairs)
}

/// For each ground-truth box, the index of the prediction it matched.
fn greedy_pairs(
    ground_truth: &[BBox],
    predicted: &[BBox],
    threshold: Threshold,
) -> Vec<Option<usize>> {
    let mut claimed = vec![false; predicted.len()];

    ground_truth
        .iter()
        .map(|gt| {
            let hit = predicted.iter().enumerate().position(|(i, pr)| {
                !claimed[i] && threshold.admits_any(overlap(gt, pr))
            })?;
            claimed[hit] = true;

            Some(hit)
        })
        .collect()
}

fn optimal_pairs(
    ground_truth: &[BBox],
    predicted: &[BBox],
    threshold: Threshold,
) -> Option<Vec<Option<usize>>> {
    let mut pairs = vec![None; ground_truth.len()];
    if ground_truth.is_empty() || predicted.is_empty() {
        return Some(pairs);
    }

    let n = ground_truth.len().max(predicted.len());
    // Any admitted pair must be cheaper than any set of inadmissible ones.
    let forbidden = (n + 1) as f32;

    let costs: Vec<f32> = (0..n * n)
        .map(|i| {
            let (r, c) = (i / n, i % n);
            if r < ground_truth.len() && c < predicted.len() {
                match overlap(&ground_truth[r], &predicted[c]) {
                    Some(o) if threshold.admits(&o) => 1.0 - o.fraction() as f32,
                    _ => forbidden,
                }
            } else {
                forbidden
            }
        })
        .collect();

    let mut mat = WeightMatrix::from_row_vec(n, costs.clone());
    match solve_assignment(&mut mat) {
        Ok(inner) => {
            for i in inner {
                if i.row < ground_truth.len()
                    && i.column < predicted.len()
                    && costs[i.row * n + i.column] < forbidden
                {
                    pairs[i.row] = Some(i.column);
                }
            }

            Some(pairs)
        }
        Err(_) => {
            log::warn!("assignment could not be solved, falling back to greedy matching");
            None
        }
    }
}
