use anyhow::{Context, Result};
use tracing::info_span;

use csvbind_cli::config::ModelConfig;
use csvbind_cli::pipeline::run_import;
use csvbind_cli::sample::write_sample;

use crate::cli::{CheckArgs, ReportFormatArg, SampleArgs};
use crate::summary::print_report;

/// Runs `check`; returns whether any mapping or validation error was found.
pub fn run_check(args: &CheckArgs) -> Result<bool> {
    let span = info_span!("check", model = %args.model.display());
    let _guard = span.enter();

    let model = ModelConfig::load(&args.model)
        .with_context(|| format!("load model {}", args.model.display()))?;
    let report = run_import(&args.csv, &model);

    match args.format {
        ReportFormatArg::Table => print_report(&report),
        ReportFormatArg::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize report")?;
            println!("{json}");
        }
    }
    Ok(report.has_errors())
}

pub fn run_sample(args: &SampleArgs) -> Result<()> {
    let files = write_sample(&args.dir, args.force)?;
    println!("Wrote {}", files.csv.display());
    println!("Wrote {}", files.model.display());
    println!(
        "Try: csvbind check {} --model {}",
        files.csv.display(),
        files.model.display()
    );
    Ok(())
}
