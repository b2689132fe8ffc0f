//! Folding addon templates into a single accumulator.
//!
//! Addons are independent, additive contributions, so every section is merged
//! as a union: a logical ID may be declared by exactly one fragment. A second
//! declaration is reported as [`AddonError::Collision`] rather than being
//! overwritten.
//!
//! # Example
//!
//! ```rust
//! use addon_merge::{SectionName, Template, TemplateMerger};
//!
//! let bucket = Template::parse("a.yaml", b"Resources:\n  Bucket:\n    Type: AWS::S3::Bucket\n")?;
//! let queue = Template::parse("b.yaml", b"Resources:\n  Queue:\n    Type: AWS::SQS::Queue\n")?;
//!
//! let mut merger = TemplateMerger::new();
//! merger.merge_fragment(bucket)?;
//! merger.merge_fragment(queue)?;
//!
//! let merged = merger.finish();
//! let ids: Vec<_> = merged.resources().keys().map(String::as_str).collect();
//! assert_eq!(ids, ["Bucket", "Queue"]);
//! # Ok::<_, addon_merge::AddonError>(())
//! ```

use std::collections::HashMap;

use crate::template::MERGED_TEMPLATE_NAME;
use crate::{AddonError, AddonResult, SectionName, Template};

/// Accumulator that merges templates one fragment at a time.
///
/// Each merge is atomic: collisions are detected before any key is inserted,
/// so a rejected fragment leaves the accumulator untouched.
#[derive(Debug)]
pub struct TemplateMerger {
    merged: Template,
    declared_by: HashMap<(SectionName, String), String>,
    fragments: usize,
}

impl Default for TemplateMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateMerger {
    /// Create an accumulator with every section empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            merged: Template::empty(MERGED_TEMPLATE_NAME),
            declared_by: HashMap::new(),
            fragments: 0,
        }
    }

    /// Merge `fragment` into the accumulator.
    ///
    /// Keys are appended to their section in the fragment's order.
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::Collision`] for the first key (in canonical
    /// section order, then fragment order) that an earlier fragment already
    /// declared in the same section.
    pub fn merge_fragment(&mut self, fragment: Template) -> AddonResult<()> {
        self.check_collisions(&fragment)?;

        let name = fragment.name().to_owned();
        let mut added = 0_usize;
        let mut sections = fragment.into_sections();
        for section in SectionName::CANONICAL {
            let incoming = std::mem::take(sections.get_mut(section));
            let target = self.merged.sections_mut().get_mut(section);
            for (key, value) in incoming {
                self.declared_by
                    .insert((section, key.clone()), name.clone());
                target.insert(key, value);
                added += 1;
            }
        }
        self.fragments += 1;
        tracing::debug!(fragment = %name, keys = added, "merged addon fragment");
        Ok(())
    }

    /// Every key in the accumulator has a `declared_by` entry, so provenance
    /// doubles as the collision index.
    fn check_collisions(&self, fragment: &Template) -> AddonResult<()> {
        for (section, entries) in fragment.sections() {
            let clash = entries
                .keys()
                .find_map(|key| Some((key, self.declared_by(section, key)?)));
            if let Some((key, first)) = clash {
                return Err(AddonError::collision(section, key, fragment.name(), first));
            }
        }
        Ok(())
    }

    /// Name of the fragment that contributed `key` to `section`.
    #[must_use]
    pub fn declared_by(&self, section: SectionName, key: &str) -> Option<&str> {
        self.declared_by
            .get(&(section, key.to_owned()))
            .map(String::as_str)
    }

    /// Number of fragments merged so far.
    #[must_use]
    pub const fn fragment_count(&self) -> usize {
        self.fragments
    }

    /// Borrow the accumulator.
    #[must_use]
    pub const fn merged(&self) -> &Template {
        &self.merged
    }

    /// Consume the merger and return the merged template.
    #[must_use]
    pub fn finish(self) -> Template {
        self.merged
    }
}

/// Merge `fragments` in iteration order into a fresh accumulator.
///
/// An empty iterator yields a template with every section empty.
///
/// # Errors
///
/// Returns the first [`AddonError::Collision`] encountered; no partial result
/// is returned.
pub fn merge_templates<I>(fragments: I) -> AddonResult<Template>
where
    I: IntoIterator<Item = Template>,
{
    let mut merger = TemplateMerger::new();
    for fragment in fragments {
        merger.merge_fragment(fragment)?;
    }
    Ok(merger.finish())
}

#[cfg(test)]
mod tests;
