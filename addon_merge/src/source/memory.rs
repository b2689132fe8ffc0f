//! In-memory fragment source.

use std::collections::HashMap;
use std::io;

use super::{AddonSource, Fragment};

/// Addon source backed by in-memory fragments.
///
/// Listing order is the insertion order of each workload's fragments, which
/// lets tests exercise the pipeline's own sorting.
///
/// # Examples
///
/// ```
/// use addon_merge::{Addons, InMemorySource};
///
/// let source = InMemorySource::new()
///     .with_fragment("api", "b.yml", "Resources:\n  Queue:\n    Type: AWS::SQS::Queue\n")
///     .with_fragment("api", "a.yml", "Resources:\n  Bucket:\n    Type: AWS::S3::Bucket\n");
///
/// let merged = Addons::new("api", &source).merged_template()?.expect("api has addons");
/// let ids: Vec<_> = merged.resources().keys().map(String::as_str).collect();
/// assert_eq!(ids, ["Bucket", "Queue"]);
///
/// assert!(Addons::new("web", &source).merged_template()?.is_none());
/// # Ok::<_, addon_merge::AddonError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    workloads: HashMap<String, Vec<Fragment>>,
}

impl InMemorySource {
    /// Create a source with no workloads.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `workload` with an empty addons location.
    #[must_use]
    pub fn with_workload(mut self, workload: impl Into<String>) -> Self {
        self.workloads.entry(workload.into()).or_default();
        self
    }

    /// Add one fragment to `workload`, registering the workload if needed.
    #[must_use]
    pub fn with_fragment(
        mut self,
        workload: impl Into<String>,
        name: impl Into<String>,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert(workload, Fragment::new(name, contents));
        self
    }

    /// Add `fragment` to `workload`, replacing any fragment with the same name.
    pub fn insert(&mut self, workload: impl Into<String>, fragment: Fragment) {
        let fragments = self.workloads.entry(workload.into()).or_default();
        fragments.retain(|existing| existing.name() != fragment.name());
        fragments.push(fragment);
    }

    fn fragments(&self, workload: &str) -> io::Result<&[Fragment]> {
        self.workloads
            .get(workload)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("workload '{workload}' has no addons location"),
                )
            })
    }
}

impl AddonSource for InMemorySource {
    fn list_addons(&self, workload: &str) -> io::Result<Vec<String>> {
        Ok(self
            .fragments(workload)?
            .iter()
            .map(|fragment| fragment.name().to_owned())
            .collect())
    }

    fn read_addon(&self, workload: &str, file_name: &str) -> io::Result<Vec<u8>> {
        self.fragments(workload)?
            .iter()
            .find(|fragment| fragment.name() == file_name)
            .map(|fragment| fragment.contents().to_vec())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("addon '{file_name}' not found for workload '{workload}'"),
                )
            })
    }
}
