//! Library interface for the `addon-merge` command.
//!
//! The binary parses [`cli::Args`], resolves [`settings::Settings`] and hands
//! both to [`run`], which locates the workspace, merges the workload's addons
//! and writes the result.

pub mod cli;
pub mod error;
pub mod output;
pub mod settings;

use std::io::Write;

use addon_merge::{Addons, Workspace};
use camino::Utf8PathBuf;

use crate::cli::Args;
use crate::error::CliError;
use crate::settings::Settings;

/// What a successful run produced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The merged template was written to the output stream.
    Printed,
    /// The merged template was written to this file.
    Written(Utf8PathBuf),
    /// The workload has no addons directory; nothing was written.
    NoAddons,
}

/// Merge the addons of `args.workload` and emit the template.
///
/// The template goes to `settings.output` when set, otherwise to `out`.
///
/// # Errors
///
/// Returns [`CliError::Addons`] when the workspace cannot be located or the
/// addons fail to merge, and an I/O variant when the output cannot be written.
pub fn run(args: &Args, settings: &Settings, out: &mut impl Write) -> Result<Outcome, CliError> {
    let workspace = open_workspace(settings)?;
    tracing::debug!(workspace = %workspace.root(), workload = %args.workload, "merging addons");
    let Some(template) = Addons::new(args.workload.as_str(), workspace).template()? else {
        tracing::warn!(workload = %args.workload, "workload has no addons; nothing to merge");
        return Ok(Outcome::NoAddons);
    };
    match settings.output.as_deref() {
        Some(path) => {
            output::write_template(path, &template)?;
            Ok(Outcome::Written(path.to_path_buf()))
        }
        None => {
            output::write_stream(out, &template)?;
            Ok(Outcome::Printed)
        }
    }
}

fn open_workspace(settings: &Settings) -> Result<Workspace, CliError> {
    settings.workspace.as_deref().map_or_else(
        || discover_workspace(settings),
        |root| Workspace::open(root).map_err(CliError::from),
    )
}

fn discover_workspace(settings: &Settings) -> Result<Workspace, CliError> {
    let cwd = std::env::current_dir().map_err(|source| CliError::Io {
        path: Utf8PathBuf::from("."),
        source,
    })?;
    let start = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|path| CliError::NonUtf8Path(path.display().to_string()))?;
    Ok(Workspace::discover(
        &start,
        &settings.workspace_dir_name,
        settings.max_search_depth,
    )?)
}
