//! Temporary workspaces laid out the way the addon loader expects.
//!
//! The layout is `<tempdir>/project/copilot/<workload>/addons/<file>`, which
//! leaves room above the workspace directory for discovery tests.
//!
//! # Examples
//!
//! ```
//! use addon_merge_test_helpers::workspace::TempWorkspace;
//!
//! # fn main() -> anyhow::Result<()> {
//! let temp = TempWorkspace::new()?
//!     .with_addon("api", "bucket.yml", "Resources:\n  Bucket:\n    Type: AWS::S3::Bucket\n")?;
//! assert!(temp.addons_dir("api").join("bucket.yml").is_file());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tempfile::TempDir;

/// Name of the workspace directory created by [`TempWorkspace`].
pub const WORKSPACE_DIR: &str = "copilot";

/// Temporary directory tree removed when dropped.
pub struct TempWorkspace {
    dir: Dir,
    project: Utf8PathBuf,
    root: Utf8PathBuf,
    _temp: TempDir,
}

impl TempWorkspace {
    /// Create an empty workspace inside a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created or its
    /// path is not valid UTF-8.
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temporary directory")?;
        let base = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path is not UTF-8: {}", path.display()))?;
        let project = base.join("project");
        let root = project.join(WORKSPACE_DIR);
        Dir::create_ambient_dir_all(&root, ambient_authority())
            .with_context(|| format!("create {root}"))?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())
            .with_context(|| format!("open {root}"))?;
        Ok(Self {
            dir,
            project,
            root,
            _temp: temp,
        })
    }

    /// The workspace directory (`.../project/copilot`).
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// The directory containing the workspace (`.../project`).
    #[must_use]
    pub fn project_dir(&self) -> &Utf8Path {
        &self.project
    }

    /// Path of `workload`'s addons directory.
    #[must_use]
    pub fn addons_dir(&self, workload: &str) -> Utf8PathBuf {
        self.root.join(workload).join("addons")
    }

    /// Create a workload directory without an addons directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_workload(self, workload: &str) -> Result<Self> {
        self.dir
            .create_dir_all(workload)
            .with_context(|| format!("create workload {workload}"))?;
        Ok(self)
    }

    /// Create an empty addons directory for `workload`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_addons_dir(self, workload: &str) -> Result<Self> {
        let addons = Utf8Path::new(workload).join("addons");
        self.dir
            .create_dir_all(&addons)
            .with_context(|| format!("create {addons}"))?;
        Ok(self)
    }

    /// Write an addon file for `workload`, creating directories as needed.
    ///
    /// `name` may contain `/` to place the file in a subdirectory of the
    /// addons directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or the file cannot be written.
    pub fn with_addon(self, workload: &str, name: &str, contents: &str) -> Result<Self> {
        let path = Utf8Path::new(workload).join("addons").join(name);
        if let Some(parent) = path.parent() {
            self.dir
                .create_dir_all(parent)
                .with_context(|| format!("create {parent}"))?;
        }
        self.dir
            .write(&path, contents)
            .with_context(|| format!("write {path}"))?;
        Ok(self)
    }
}
