//! Scenario replay and output

use anyhow::{Context, Result};
use bankledger_core::Ledger;
use bankledger_reports::{
    AccountListing, CsvExporter, JsonExporter, ListingExporter, MarkdownExporter,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::config::ScenarioConfig;
use crate::OutputFormat;

/// What happened while replaying a scenario
#[derive(Debug, Default)]
pub struct RunSummary {
    pub accounts_opened: usize,
    pub operations_applied: usize,
    pub failures: Vec<String>,
}

/// Options shared by `demo` and `run`
pub struct RunOptions {
    pub title: String,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub keep_going: bool,
}

/// Build a fresh ledger from the scenario.
///
/// Without `keep_going` the first failure aborts the run; with it, failures
/// are recorded in the summary and skipped.
pub fn build_ledger(config: &ScenarioConfig, keep_going: bool) -> Result<(Ledger, RunSummary)> {
    let mut ledger = Ledger::new();
    let mut summary = RunSummary::default();

    for (i, spec) in config.accounts.iter().enumerate() {
        let result = spec.build().and_then(|account| ledger.add_account(account));
        match result {
            Ok(()) => summary.accounts_opened += 1,
            Err(e) if keep_going => {
                tracing::warn!(account = spec.account_number, error = %e, "skipping account");
                summary
                    .failures
                    .push(format!("account #{} ({}): {}", i + 1, spec.account_number, e));
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to open account #{} ({})", i + 1, spec.account_number)
                })
            }
        }
    }

    for (i, op) in config.operations.iter().enumerate() {
        match op.apply(&mut ledger) {
            Ok(()) => {
                tracing::info!(step = i + 1, "{}", op);
                summary.operations_applied += 1;
            }
            Err(e) if keep_going => {
                tracing::warn!(step = i + 1, error = %e, "skipping operation: {}", op);
                summary
                    .failures
                    .push(format!("operation #{} ({}): {}", i + 1, op, e));
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Operation #{} failed: {}", i + 1, op))
            }
        }
    }

    Ok((ledger, summary))
}

/// Write the ledger to `out` in the requested format
pub fn render(
    ledger: &Ledger,
    format: OutputFormat,
    title: &str,
    out: &mut dyn Write,
) -> io::Result<()> {
    let exporter: Box<dyn ListingExporter> = match format {
        OutputFormat::Table => return ledger.print_accounts(out),
        OutputFormat::Csv => Box::new(CsvExporter::new()),
        OutputFormat::Json => Box::new(JsonExporter::new()),
        OutputFormat::Markdown => Box::new(MarkdownExporter::new()),
    };

    exporter.write(&AccountListing::from_ledger(title, ledger), out)
}

/// Replay the scenario, then print or write the result
pub fn execute(config: &ScenarioConfig, options: &RunOptions) -> Result<()> {
    let (ledger, summary) = build_ledger(config, options.keep_going)?;

    match &options.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {:?}", path))?;
            let mut out = BufWriter::new(file);
            render(&ledger, options.format, &options.title, &mut out)
                .and_then(|()| out.flush())
                .with_context(|| format!("Failed to write output file {:?}", path))?;
            println!("✅ Ledger written: {:?}", path);
        }
        None => {
            let mut out = io::stdout().lock();
            render(&ledger, options.format, &options.title, &mut out)
                .context("Failed to write ledger to stdout")?;
        }
    }

    if !summary.failures.is_empty() {
        eprintln!("⚠️  {} step(s) skipped:", summary.failures.len());
        for failure in &summary.failures {
            eprintln!("   - {}", failure);
        }
    }

    tracing::info!(
        accounts = summary.accounts_opened,
        operations = summary.operations_applied,
        skipped = summary.failures.len(),
        "scenario finished"
    );

    Ok(())
}
