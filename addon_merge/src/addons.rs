//! Top-level orchestration: one workload's addons into one template.

use std::io;

use crate::source::{AddonSource, Fragment};
use crate::{AddonError, AddonResult, Template, TemplateMerger, select_template_files};

/// Logical ID of the nested stack resource that deploys the merged template.
pub const STACK_NAME: &str = "AddonsStack";

/// Additional resources declared for a workload.
///
/// # Examples
///
/// ```
/// use addon_merge::{Addons, InMemorySource};
///
/// let source = InMemorySource::new()
///     .with_fragment("api", "bucket.yml", "Resources:\n  Bucket:\n    Type: AWS::S3::Bucket\n")
///     .with_fragment("api", "notes.txt", "not a template");
///
/// let yaml = Addons::new("api", source).template()?.expect("api has addons");
/// assert!(yaml.contains("Bucket"));
/// # Ok::<_, addon_merge::AddonError>(())
/// ```
#[derive(Debug)]
pub struct Addons<S> {
    workload: String,
    source: S,
}

impl<S: AddonSource> Addons<S> {
    /// Prepare to merge the addons of `workload` found in `source`.
    #[must_use]
    pub fn new(workload: impl Into<String>, source: S) -> Self {
        Self {
            workload: workload.into(),
            source,
        }
    }

    /// Name of the workload whose addons are merged.
    #[must_use]
    pub fn workload(&self) -> &str {
        &self.workload
    }

    /// Read, parse and merge every template fragment of the workload.
    ///
    /// Fragments are processed in lexical file-name order. Returns `Ok(None)`
    /// when the workload has no addons directory; an addons directory with no
    /// template files merges to an empty template.
    ///
    /// # Errors
    ///
    /// Returns the first listing, read, parse, structure or collision error.
    pub fn merged_template(&self) -> AddonResult<Option<Template>> {
        let Some(names) = self.list()? else {
            tracing::info!(workload = %self.workload, "workload has no addons directory");
            return Ok(None);
        };

        let mut merger = TemplateMerger::new();
        for name in select_template_files(names) {
            let fragment = self.read(name)?;
            merger.merge_fragment(fragment.parse()?)?;
        }
        tracing::info!(
            workload = %self.workload,
            fragments = merger.fragment_count(),
            "merged addon templates"
        );
        Ok(Some(merger.finish()))
    }

    /// Merge the workload's addons and render the result as YAML.
    ///
    /// Returns `Ok(None)` when the workload has no addons directory.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::merged_template`], or
    /// [`AddonError::Serialize`] if rendering fails.
    pub fn template(&self) -> AddonResult<Option<String>> {
        self.merged_template()?
            .map(|merged| merged.to_yaml())
            .transpose()
    }

    fn list(&self) -> AddonResult<Option<Vec<String>>> {
        match self.source.list_addons(&self.workload) {
            Ok(names) => Ok(Some(names)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AddonError::Listing {
                workload: self.workload.clone(),
                source,
            }),
        }
    }

    fn read(&self, name: String) -> AddonResult<Fragment> {
        match self.source.read_addon(&self.workload, &name) {
            Ok(contents) => Ok(Fragment::new(name, contents)),
            Err(source) => Err(AddonError::Read {
                fragment: name,
                workload: self.workload.clone(),
                source,
            }),
        }
    }
}
