//! Where addon fragments come from.
//!
//! The merge pipeline only needs two capabilities: list the file names in a
//! workload's addons location and read one of them. [`AddonSource`] captures
//! that seam so the filesystem-backed [`Workspace`] and the deterministic
//! [`InMemorySource`] are interchangeable.

mod memory;
mod workspace;

use std::io;

use crate::{AddonResult, Template};

pub use memory::InMemorySource;
pub use workspace::{ADDONS_DIR, DEFAULT_SEARCH_DEPTH, DEFAULT_WORKSPACE_DIR, Workspace};

/// Read access to workloads' addons locations.
pub trait AddonSource {
    /// List the file names present in `workload`'s addons location.
    ///
    /// # Errors
    ///
    /// Implementations must report a missing addons location as
    /// [`io::ErrorKind::NotFound`]; callers treat that as "no addons".
    fn list_addons(&self, workload: &str) -> io::Result<Vec<String>>;

    /// Read the raw bytes of one addon file.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] when the file cannot be read.
    fn read_addon(&self, workload: &str, file_name: &str) -> io::Result<Vec<u8>>;
}

impl<T: AddonSource + ?Sized> AddonSource for &T {
    fn list_addons(&self, workload: &str) -> io::Result<Vec<String>> {
        (**self).list_addons(workload)
    }

    fn read_addon(&self, workload: &str, file_name: &str) -> io::Result<Vec<u8>> {
        (**self).read_addon(workload, file_name)
    }
}

/// One addon file: its name and unparsed contents.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fragment {
    name: String,
    contents: Vec<u8>,
}

impl Fragment {
    /// Create a fragment from a file name and its raw bytes.
    #[must_use]
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// File name of the fragment.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw contents.
    #[must_use]
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Parse the fragment into a [`Template`] labelled with its file name.
    ///
    /// # Errors
    ///
    /// Propagates parse and structure errors from [`Template::parse`].
    pub fn parse(&self) -> AddonResult<Template> {
        Template::parse(self.name.clone(), &self.contents)
    }
}
