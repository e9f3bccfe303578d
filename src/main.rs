mod cli;

use anyhow::Context;
use clap::Parser;
use std::io::Write;

fn main() -> Result<(), anyhow::Error> {
    let args = cli::Args::parse();

    let level = if args.quiet { "error" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.jobs)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let config = args.eval_config();
    log::info!(
        "ground truth {}, predictions {}, threshold {}",
        args.ground_truth.display(),
        args.predictions.display(),
        config.threshold
    );

    let eval = boxmetrics::evaluate_dirs(&args.ground_truth, &args.predictions, config)
        .context("evaluation failed")?;

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = std::io::BufWriter::new(file);
            boxmetrics::report::write_report(&mut out, &eval, args.format, args.verbosity())?;
            out.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            boxmetrics::report::write_report(&mut out, &eval, args.format, args.verbosity())?;
        }
    }

    Ok(())
}
