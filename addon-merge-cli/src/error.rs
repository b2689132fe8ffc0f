//! Error types for the `addon-merge` command.

use addon_merge::AddonError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `addon-merge` pipeline.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading, parsing or merging the addons failed.
    #[error(transparent)]
    Addons(#[from] AddonError),

    /// Layered settings could not be extracted.
    #[error("failed to load settings: {0}")]
    Settings(#[from] Box<figment::Error>),

    /// An explicitly requested settings file does not exist.
    #[error("settings file {0} does not exist")]
    MissingConfig(Utf8PathBuf),

    /// The working directory is not valid UTF-8.
    #[error("working directory is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    /// A filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path the operation targeted.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the template to stdout failed.
    #[error("failed to write merged template to stdout: {0}")]
    Stdout(#[source] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Settings(Box::new(err))
    }
}
