//! `qsync pull`: bring every changed article down.

use anyhow::{bail, Context as _, Result};
use clap::Args;
use colored::Colorize;
use qsync_sync::{broker::DEFAULT_JOBS, pull_all, PullOptions, PullOutcome, PullReport, WriteResult};

use super::Context;

/// Arguments for `qsync pull`.
#[derive(Args, Debug)]
pub struct PullArgs {
    /// Show what would be written without writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Number of articles written concurrently.
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_JOBS)]
    pub jobs: usize,
}

impl PullArgs {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let (settings, client) = ctx.connect()?;
        let options = PullOptions {
            dry_run: self.dry_run,
            jobs: self.jobs,
        };
        let report = pull_all(&client, &settings.local_root, options)
            .with_context(|| format!("pull failed for blog '{}'", settings.blog))?;

        print_report(&settings.blog, &report, self.dry_run);

        let failed = report.failures().count();
        if failed > 0 {
            bail!("{failed} of {} articles failed to pull", report.outcomes.len());
        }
        Ok(())
    }
}

fn print_report(blog: &str, report: &PullReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    if report.outcomes.is_empty() {
        println!("{prefix}✓ '{blog}' has no articles");
        return;
    }

    println!(
        "{prefix}✓ '{blog}' pulled ({} written, {} unchanged, {} failed)",
        report.written(),
        report.unchanged(),
        report.failures().count()
    );

    for outcome in &report.outcomes {
        match outcome {
            PullOutcome::Stored { result, .. } => match result {
                WriteResult::Written { path } => println!("  ✎  {}", path.display()),
                WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
                WriteResult::Unchanged { .. } => {}
            },
            PullOutcome::Failed { id, error } => {
                println!("  {}  {id}: {error}", "✗".red().bold());
            }
        }
    }
}
