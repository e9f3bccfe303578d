pub mod annotation;
pub mod bbox;
pub mod confusion;
pub mod error;
pub mod evaluator;
pub mod matcher;
pub mod metrics;
pub mod overlap;
pub mod pairing;
pub mod report;
pub mod threshold;

pub use annotation::{AnnotationSet, ImageKey};
pub use bbox::BBox;
pub use confusion::ConfusionMatrix;
pub use evaluator::{EvalConfig, Evaluation, Evaluator};
pub use matcher::{match_image, MatchRecord, Strategy};
pub use metrics::{Metric, MetricSet};
pub use pairing::UnpairedPolicy;
pub use threshold::Threshold;

use error::Error;
use std::path::Path;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Loads both annotation directories and evaluates them.
pub fn evaluate_dirs(
    ground_truth: &Path,
    predictions: &Path,
    config: EvalConfig,
) -> Result<Evaluation> {
    let gt = annotation::load_dir(ground_truth)?;
    let pr = annotation::load_dir(predictions)?;

    Evaluator::new(config).evaluate(&gt, &pr)
}
