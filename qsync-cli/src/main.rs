//! qsync: mirror your Qiita articles as local Markdown files.
//!
//! # Usage
//!
//! ```text
//! qsync pull [--dry-run] [--jobs N]
//! qsync push <path>
//! qsync post [--title <title>] [--tag name[:v1,v2]]...
//! ```
//!
//! Global flags: `--config <path>`, `--blog <key>`, `-v/--verbose`.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::{post::PostArgs, pull::PullArgs, push::PushArgs, Context};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "qsync",
    version,
    about = "Mirror Qiita articles to a local directory of Markdown files",
    long_about = None,
)]
struct Cli {
    /// Config file to use instead of ~/.config/qsync/config.yaml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Blog key under `blogs:` in the config; the `default` record otherwise.
    #[arg(long, global = true, value_name = "KEY")]
    blog: Option<String>,

    /// Log at debug level (RUST_LOG still takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download every article that changed remotely.
    Pull(PullArgs),

    /// Upload one local file if it is newer than the remote article.
    Push(PushArgs),

    /// Create a new private article and store it locally.
    Post(PostArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context {
        config: cli.config,
        blog: cli.blog,
    };
    let result = match cli.command {
        Commands::Pull(args) => args.run(&ctx),
        Commands::Push(args) => args.run(&ctx),
        Commands::Post(args) => args.run(&ctx),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
