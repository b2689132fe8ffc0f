//! Primary error enum for addon loading and merging.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::SectionName;

/// Errors that can occur while composing a workload's addon templates.
///
/// A workload without an addons directory is not an error; see
/// [`crate::Addons::merged_template`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AddonError {
    /// The addons directory exists but could not be listed.
    #[error("list addons for workload '{workload}': {source}")]
    Listing {
        /// Workload whose addons directory was listed.
        workload: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A listed fragment could not be read.
    #[error("read addon {fragment} under {workload}: {source}")]
    Read {
        /// File name of the fragment.
        fragment: String,
        /// Workload owning the fragment.
        workload: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Fragment content is not well-formed YAML.
    #[error("parse addon {fragment}: {source}")]
    Parse {
        /// File name of the fragment.
        fragment: String,
        /// Error reported by the YAML parser.
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// Fragment content is valid YAML but not a valid template shape.
    #[error("invalid addon {fragment}: {message}")]
    Structure {
        /// File name of the fragment.
        fragment: String,
        /// Description of the structural problem.
        message: String,
    },

    /// Two fragments declare the same key within one section.
    #[error(
        "{section} key '{key}' in addon {fragment} is already defined by addon {first_declared_in}"
    )]
    Collision {
        /// Section holding the duplicate key.
        section: SectionName,
        /// The duplicated logical ID.
        key: String,
        /// Fragment that introduced the duplicate.
        fragment: String,
        /// Fragment that declared the key first.
        first_declared_in: String,
    },

    /// The merged template could not be rendered.
    #[error("marshal merged addons template: {source}")]
    Serialize {
        /// Error reported by the YAML emitter.
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// No workspace directory was found while searching upwards.
    #[error("no '{dir_name}' directory found within {max_depth} levels above {start}")]
    WorkspaceNotFound {
        /// Directory where the search began.
        start: Utf8PathBuf,
        /// Name of the directory being searched for.
        dir_name: String,
        /// Number of parent directories examined.
        max_depth: usize,
    },

    /// A workspace path could not be opened.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
