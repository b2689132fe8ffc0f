//! Command-line interface definitions for `addon-merge`.

use camino::Utf8PathBuf;
use clap::Parser;

/// Parsed CLI arguments for `addon-merge`.
#[derive(Debug, Default, Parser)]
#[command(name = "addon-merge")]
#[command(about = "Merge a workload's addon templates into one CloudFormation template")]
#[command(version)]
pub struct Args {
    /// Workload whose `addons` directory is merged.
    pub workload: String,
    /// Workspace directory holding one subdirectory per workload.
    ///
    /// When omitted, the workspace is discovered by searching the working
    /// directory and its parents.
    #[arg(long, value_name = "path")]
    pub workspace: Option<Utf8PathBuf>,
    /// Settings file to load instead of `addon-merge.toml`.
    #[arg(long, value_name = "path")]
    pub config: Option<Utf8PathBuf>,
    /// Write the merged template to this file instead of stdout.
    #[arg(long, short, value_name = "path")]
    pub output: Option<Utf8PathBuf>,
    /// Log filter directive, for example `info` or `addon_merge=debug`.
    #[arg(long, value_name = "filter")]
    pub log_filter: Option<String>,
}
