//! CLI entrypoint for `addon-merge`.

use std::process::ExitCode;

use addon_merge_cli::cli::Args;
use addon_merge_cli::run;
use addon_merge_cli::settings::{DEFAULT_LOG_FILTER, Settings};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let settings = match Settings::load(&args) {
        Ok(settings) => settings,
        Err(err) => {
            init_tracing(args.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER));
            tracing::error!(error = %err, "addon-merge failed");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&settings.log_filter);
    tracing::debug!(?settings, "resolved settings");

    match run(&args, &settings, &mut std::io::stdout().lock()) {
        Ok(outcome) => {
            tracing::debug!(?outcome, "addon-merge finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "addon-merge failed");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over the configured filter.
fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
