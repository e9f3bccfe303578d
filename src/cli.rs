use std::path::PathBuf;

use boxmetrics::report::{Format, Verbosity};
use boxmetrics::{EvalConfig, Strategy, Threshold, UnpairedPolicy};
use clap::Parser;

/// Confusion matrix and detection rates from paired VOC annotation directories.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Directory with predicted annotations (searched recursively for *.xml).
    #[arg(short = 'd', long = "predictions")]
    pub predictions: PathBuf,
    /// Directory with ground-truth annotations.
    #[arg(short = 'g', long = "ground-truth")]
    pub ground_truth: PathBuf,
    /// Minimum share of a ground-truth box a prediction must cover, in percent (0-100).
    #[arg(short = 't', long, default_value = "100", value_parser = parse_threshold)]
    pub threshold: Threshold,
    /// Print per-image counts.
    #[arg(short = 's', long = "basic", conflicts_with = "full")]
    pub basic: bool,
    /// Print per-image matched, missed and spurious boxes.
    #[arg(short = 'v', long = "full")]
    pub full: bool,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
    /// Matching strategy. `optimal` may match more boxes than the default.
    #[arg(long, value_enum, default_value_t = Strategy::Greedy)]
    pub strategy: Strategy,
    /// How to treat images annotated on one side only.
    #[arg(long, value_enum, default_value_t = UnpairedPolicy::Count)]
    pub unpaired: UnpairedPolicy,
    /// Worker threads, 0 lets rayon decide.
    #[arg(long, default_value_t = 0)]
    pub jobs: usize,
    /// Write the report here instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Only log errors.
    #[arg(short = 'q', long, default_value_t = false)]
    pub quiet: bool,
}

impl Args {
    pub fn verbosity(&self) -> Verbosity {
        if self.full {
            Verbosity::Full
        } else if self.basic {
            Verbosity::Basic
        } else {
            Verbosity::Summary
        }
    }

    pub fn eval_config(&self) -> EvalConfig {
        EvalConfig::default()
            .with_threshold(self.threshold)
            .with_strategy(self.strategy)
            .with_unpaired(self.unpaired)
    }
}

fn parse_threshold(s: &str) -> Result<Threshold, String> {
    let percent: i64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a whole number", s))?;

    Threshold::from_percent(percent).map_err(|e| e.to_string())
}
