use rayon::prelude::*;
use serde_derive::Serialize;
use std::collections::BTreeMap;

use crate::annotation::{AnnotationSet, ImageKey};
use crate::confusion::{aggregate, ConfusionMatrix};
use crate::error::Error;
use crate::matcher::{match_image, MatchRecord, Strategy};
use crate::metrics::MetricSet;
use crate::pairing::{pair, Unpaired, UnpairedPolicy};
use crate::threshold::Threshold;

#[derive(Serialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct EvalConfig {
    pub threshold: Threshold,
    pub strategy: Strategy,
    pub unpaired: UnpairedPolicy,
}

impl EvalConfig {
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_unpaired(mut self, unpaired: UnpairedPolicy) -> Self {
        self.unpaired = unpaired;
        self
    }
}

/// Result of one run. Built once, read-only afterwards.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub config: EvalConfig,
    pub matrix: ConfusionMatrix,
    pub metrics: MetricSet,
    pub images: BTreeMap<ImageKey, MatchRecord>,
    pub unpaired: Unpaired,
}

impl Evaluation {
    /// Per-image counts, in key order.
    pub fn per_image(&self) -> impl Iterator<Item = (&str, ConfusionMatrix)> {
        self.images
            .iter()
            .map(|(k, rec)| (k.as_str(), ConfusionMatrix::from(rec)))
    }
}

pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn evaluate(
        &self,
        ground_truth: &AnnotationSet,
        predicted: &AnnotationSet,
    ) -> Result<Evaluation, Error> {
        let EvalConfig {
            threshold,
            strategy,
            unpaired,
        } = self.config;

        let pairing = pair(ground_truth, predicted, unpaired)?;

        let images: BTreeMap<ImageKey, MatchRecord> = pairing
            .pairs
            .par_iter()
            .map(|p| {
                let rec = match_image(p.ground_truth, p.predicted, threshold, strategy);
                log::debug!(
                    "{}: tp {} fp {} fn {}",
                    p.key,
                    rec.tp.len(),
                    rec.fp.len(),
                    rec.fn_.len()
                );

                (p.key.to_string(), rec)
            })
            .collect();

        let matrix = aggregate(images.values());
        let metrics = MetricSet::from(&matrix);

        log::info!(
            "evaluated {} image(s) at {} ({:?}): tp {} fp {} fn {}",
            images.len(),
            threshold,
            strategy,
            matrix.tp(),
            matrix.fp(),
            matrix.fn_()
        );

        Ok(Evaluation {
            config: self.config,
            matrix,
            metrics,
            images,
            unpaired: pairing.unpaired,
        })
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvalConfig::default())
    }
}
