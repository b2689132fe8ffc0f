//! Filesystem-backed addon source.
//!
//! A workspace is the directory holding one subdirectory per workload. The
//! addons of workload `W` live in `<root>/W/addons`. All access goes through a
//! `cap-std` directory handle, so lookups cannot escape the workspace root.

use std::io;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::FileType;
use cap_std::fs_utf8::Dir;

use super::AddonSource;
use crate::{AddonError, AddonResult};

/// Default name of the workspace directory.
pub const DEFAULT_WORKSPACE_DIR: &str = "copilot";

/// Default number of parent directories examined by [`Workspace::discover`].
pub const DEFAULT_SEARCH_DEPTH: usize = 5;

/// Name of the per-workload directory holding addon templates.
pub const ADDONS_DIR: &str = "addons";

/// Workspace directory opened with `cap-std`.
#[derive(Debug)]
pub struct Workspace {
    root: Utf8PathBuf,
    dir: Dir,
}

impl Workspace {
    /// Open the workspace rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::Io`] when `root` cannot be opened as a directory.
    pub fn open(root: impl AsRef<Utf8Path>) -> AddonResult<Self> {
        let root_path = root.as_ref();
        let dir = Dir::open_ambient_dir(root_path, ambient_authority())
            .map_err(|err| AddonError::io(root_path, err))?;
        Ok(Self {
            root: root_path.to_path_buf(),
            dir,
        })
    }

    /// Search `start` and up to `max_depth` of its parents for a directory
    /// named `dir_name`, and open the first match.
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::Io`] if `start` cannot be resolved, and
    /// [`AddonError::WorkspaceNotFound`] when no ancestor holds `dir_name`.
    pub fn discover(start: &Utf8Path, dir_name: &str, max_depth: usize) -> AddonResult<Self> {
        let resolved = start
            .canonicalize_utf8()
            .map_err(|err| AddonError::io(start, err))?;
        let found = resolved
            .ancestors()
            .take(max_depth.saturating_add(1))
            .map(|ancestor| ancestor.join(dir_name))
            .find(|candidate| candidate.is_dir());
        match found {
            Some(root) => {
                tracing::debug!(workspace = %root, "discovered workspace");
                Self::open(root)
            }
            None => Err(AddonError::WorkspaceNotFound {
                start: resolved,
                dir_name: dir_name.to_owned(),
                max_depth,
            }),
        }
    }

    /// Path the workspace was opened from.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Path of `workload`'s addons directory.
    #[must_use]
    pub fn addons_path(&self, workload: &str) -> Utf8PathBuf {
        self.root.join(workload).join(ADDONS_DIR)
    }

    fn open_addons_dir(&self, workload: &str) -> io::Result<Dir> {
        let mut components = Utf8Path::new(workload).components();
        let is_single_name = matches!(
            (components.next(), components.next()),
            (Some(Utf8Component::Normal(_)), None)
        );
        if !is_single_name {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("workload name '{workload}' must be a single path component"),
            ));
        }
        self.dir.open_dir(Utf8Path::new(workload).join(ADDONS_DIR))
    }
}

impl AddonSource for Workspace {
    /// Lists every entry of the addons directory that is not a directory or a
    /// link to one. Entries whose names are not UTF-8 are skipped.
    fn list_addons(&self, workload: &str) -> io::Result<Vec<String>> {
        let addons = self.open_addons_dir(workload)?;
        let mut names = Vec::new();
        for entry in addons.entries()? {
            let dir_entry = entry?;
            let name = match dir_entry.file_name() {
                Ok(name) => name,
                Err(err) => {
                    tracing::trace!(
                        workload,
                        error = %err,
                        "skipping addon entry with a non-UTF-8 name"
                    );
                    continue;
                }
            };
            if is_directory(&addons, &name, dir_entry.file_type()?) {
                continue;
            }
            names.push(name);
        }
        Ok(names)
    }

    fn read_addon(&self, workload: &str, file_name: &str) -> io::Result<Vec<u8>> {
        self.open_addons_dir(workload)?.read(file_name)
    }
}

/// Symlinks are resolved; a link that cannot be resolved is kept so that
/// reading it reports the failure.
fn is_directory(addons: &Dir, name: &str, file_type: FileType) -> bool {
    if file_type.is_symlink() {
        addons
            .metadata(name)
            .is_ok_and(|metadata| metadata.is_dir())
    } else {
        file_type.is_dir()
    }
}
