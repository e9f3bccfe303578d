use clap::ValueEnum;
use serde_derive::Serialize;

use crate::annotation::{AnnotationSet, ImageKey};
use crate::bbox::BBox;
use crate::error::Error;

/// What to do with an image that has annotations on one side only.
#[derive(Serialize, ValueEnum, Debug, Copy, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnpairedPolicy {
    /// Ground-truth-only boxes count as `fn`, prediction-only boxes as `fp`.
    #[default]
    Count,
    /// Leave unpaired images out of the counts.
    Skip,
    /// Abort the evaluation.
    Fail,
}

#[derive(Debug, Clone, Copy)]
pub struct ImagePair<'a> {
    pub key: &'a str,
    pub ground_truth: &'a [BBox],
    pub predicted: &'a [BBox],
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Unpaired {
    pub ground_truth_only: Vec<ImageKey>,
    pub predictions_only: Vec<ImageKey>,
}

impl Unpaired {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ground_truth_only.is_empty() && self.predictions_only.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ground_truth_only.len() + self.predictions_only.len()
    }
}

#[derive(Debug)]
pub struct Pairing<'a> {
    pub pairs: Vec<ImagePair<'a>>,
    pub unpaired: Unpaired,
}

/// Joins both sets on their image key. Pairs come out in key order.
pub fn pair<'a>(
    ground_truth: &'a AnnotationSet,
    predicted: &'a AnnotationSet,
    policy: UnpairedPolicy,
) -> Result<Pairing<'a>, Error> {
    let mut pairs = Vec::with_capacity(ground_truth.len().max(predicted.len()));
    let mut unpaired = Unpaired::default();

    for (key, gt) in ground_truth {
        match predicted.get(key) {
            Some(pr) => pairs.push(ImagePair {
                key: key.as_str(),
                ground_truth: gt,
                predicted: pr,
            }),
            None => {
                log::warn!("{}: ground truth has no matching prediction file", key);
                unpaired.ground_truth_only.push(key.clone());

                if policy == UnpairedPolicy::Count {
                    pairs.push(ImagePair {
                        key: key.as_str(),
                        ground_truth: gt,
                        predicted: &[],
                    });
                }
            }
        }
    }

    for (key, pr) in predicted {
        if ground_truth.contains_key(key) {
            continue;
        }

        log::warn!("{}: prediction has no matching ground truth file", key);
        unpaired.predictions_only.push(key.clone());

        if policy == UnpairedPolicy::Count {
            pairs.push(ImagePair {
                key: key.as_str(),
                ground_truth: &[],
                predicted: pr,
            });
        }
    }

    if policy == UnpairedPolicy::Fail && !unpaired.is_empty() {
        let mut keys = unpaired.ground_truth_only;
        keys.extend(unpaired.predictions_only);
        keys.sort();

        return Err(Error::UnpairedImages(keys));
    }

    pairs.sort_by(|a, b| a.key.cmp(b.key));

    Ok(Pairing { pairs, unpaired })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(entries: &[(&str, usize)]) -> AnnotationSet {
        entries
            .iter()
            .map(|(k, n)| {
                let boxes = (0..*n as i32)
                    .map(|i| BBox::ltrb(i, i, i + 10, i + 10).unwrap())
                    .collect();
                (k.to_string(), boxes)
            })
            .collect()
    }

    #[test]
    fn pairs_by_key_not_by_position() {
        let gt = set(&[("a", 1), ("b", 2), ("c", 3)]);
        let pr = set(&[("c", 1), ("b", 4), ("a", 2)]);
        let p = pair(&gt, &pr, UnpairedPolicy::Count).unwrap();

        let shape: Vec<_> = p
            .pairs
            .iter()
            .map(|x| (x.key, x.ground_truth.len(), x.predicted.len()))
            .collect();
        assert_eq!(shape, vec![("a", 1, 2), ("b", 2, 4), ("c", 3, 1)]);
        assert!(p.unpaired.is_empty());
    }

    #[test]
    fn count_policy_keeps_one_sided_images() {
        let gt = set(&[("a", 1), ("b", 2)]);
        let pr = set(&[("b", 1), ("z", 3)]);
        let p = pair(&gt, &pr, UnpairedPolicy::Count).unwrap();

        let shape: Vec<_> = p
            .pairs
            .iter()
            .map(|x| (x.key, x.ground_truth.len(), x.predicted.len()))
            .collect();
        assert_eq!(shape, vec![("a", 1, 0), ("b", 2, 1), ("z", 0, 3)]);
        assert_eq!(p.unpaired.ground_truth_only, vec!["a".to_string()]);
        assert_eq!(p.unpaired.predictions_only, vec!["z".to_string()]);
        assert_eq!(p.unpaired.len(), 2);
    }

    #[test]
    fn skip_policy_drops_one_sided_images() {
        let gt = set(&[("a", 1), ("b", 2)]);
        let pr = set(&[("b", 1), ("z", 3)]);
        let p = pair(&gt, &pr, UnpairedPolicy::Skip).unwrap();

        assert_eq!(p.pairs.len(), 1);
        assert_eq!(p.pairs[0].key, "b");
        assert_eq!(p.unpaired.len(), 2);
    }

    #[test]
    fn fail_policy_reports_keys() {
        let gt = set(&[("a", 1), ("b", 2)]);
        let pr = set(&[("b", 1), ("z", 3)]);

        match pair(&gt, &pr, UnpairedPolicy::Fail) {
            Err(Error::UnpairedImages(keys)) => assert_eq!(keys, vec!["a", "z"]),
            other => panic!("unexpected {:?}", other),
        }

        assert!(pair(&gt, &gt, UnpairedPolicy::Fail).is_ok());
    }
}
