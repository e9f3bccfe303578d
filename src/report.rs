use clap::ValueEnum;
use serde_derive::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use crate::confusion::ConfusionMatrix;
use crate::error::Error;
use crate::evaluator::{EvalConfig, Evaluation};
use crate::matcher::MatchRecord;
use crate::metrics::MetricSet;
use crate::pairing::Unpaired;

const RULE: &str = "=======";

#[derive(ValueEnum, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Totals and rates only.
    #[default]
    Summary,
    /// Plus per-image counts.
    Basic,
    /// Plus per-image matched boxes.
    Full,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Images<'a> {
    Counts(BTreeMap<&'a str, ConfusionMatrix>),
    Records(&'a BTreeMap<String, MatchRecord>),
}

#[derive(Serialize)]
struct JsonReport<'a> {
    config: &'a EvalConfig,
    matrix: &'a ConfusionMatrix,
    metrics: &'a MetricSet,
    unpaired: &'a Unpaired,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Images<'a>>,
}

pub fn write_report<W: Write>(
    out: &mut W,
    eval: &Evaluation,
    format: Format,
    verbosity: Verbosity,
) -> Result<(), Error> {
    match format {
        Format::Text => Ok(write_text(out, eval, verbosity)?),
        Format::Json => write_json(out, eval, verbosity),
    }
}

fn write_json<W: Write>(
    out: &mut W,
    eval: &Evaluation,
    verbosity: Verbosity,
) -> Result<(), Error> {
    let images = match verbosity {
        Verbosity::Summary => None,
        Verbosity::Basic => Some(Images::Counts(eval.per_image().collect())),
        Verbosity::Full => Some(Images::Records(&eval.images)),
    };

    let report = JsonReport {
        config: &eval.config,
        matrix: &eval.matrix,
        metrics: &eval.metrics,
        unpaired: &eval.unpaired,
        images,
    };

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;

    Ok(())
}

fn write_text<W: Write>(
    out: &mut W,
    eval: &Evaluation,
    verbosity: Verbosity,
) -> std::io::Result<()> {
    let m = &eval.matrix;
    let r = &eval.metrics;

    writeln!(out, "{}", RULE)?;
    writeln!(out, "TP: {}", m.tp())?;
    writeln!(out, "TN: {}", m.tn())?;
    writeln!(out, "FP: {}", m.fp())?;
    writeln!(out, "FN: {}", m.fn_())?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "ACC: {:.2}", r.acc)?;
    writeln!(out, "TPR: {:.4}", r.tpr)?;
    writeln!(out, "FPR: {:.4}", r.fpr)?;
    writeln!(out)?;

    match verbosity {
        Verbosity::Summary => {}
        Verbosity::Basic => {
            for (key, c) in eval.per_image() {
                writeln!(
                    out,
                    "{}: tp {} tn {} fp {} fn {}",
                    key,
                    c.tp(),
                    c.tn(),
                    c.fp(),
                    c.fn_()
                )?;
            }
        }
        Verbosity::Full => {
            for (key, rec) in &eval.images {
                writeln!(out, "{}:", key)?;
                for (gt, pr) in &rec.tp {
                    writeln!(out, "  tp {} ~ {}", gt, pr)?;
                }
                for pr in &rec.fp {
                    writeln!(out, "  fp {}", pr)?;
                }
                for gt in &rec.fn_ {
                    writeln!(out, "  fn {}", gt)?;
                }
            }
        }
    }

    if !eval.unpaired.is_empty() {
        writeln!(out, "{}", RULE)?;
        for key in &eval.unpaired.ground_truth_only {
            writeln!(out, "no predictions for {}", key)?;
        }
        for key in &eval.unpaired.predictions_only {
            writeln!(out, "no ground truth for {}", key)?;
        }
    }

    Ok(())
}
