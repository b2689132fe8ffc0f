//! Structured template documents.
//!
//! A [`Template`] is the unit the merge engine folds together. Each typed
//! section keeps its logical IDs in insertion order, and any top-level key the
//! engine does not recognise is preserved in a passthrough bucket so it can
//! still take part in collision detection. Resource bodies and other values
//! stay as generic YAML values (custom tags such as `!Ref` included); the
//! engine never interprets them.

mod parse;
mod render;
mod section;

use serde_yaml_ng::Value;

pub use section::{SectionEntries, SectionName};

pub(crate) use section::Sections;

/// Diagnostic name given to the merge accumulator.
pub const MERGED_TEMPLATE_NAME: &str = "merged";

/// A parsed addon template or the merge accumulator.
///
/// Templates produced by [`Template::parse`] are read-only; only the merge
/// engine mutates the accumulator it owns.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    name: String,
    sections: Sections,
}

impl Template {
    /// Create an empty template labelled `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use addon_merge::{SectionName, Template};
    ///
    /// let template = Template::empty("merged");
    /// assert!(template.is_empty());
    /// assert!(template.section(SectionName::Resources).is_empty());
    /// ```
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Sections::default(),
        }
    }

    /// Diagnostic label: the fragment file name, or `"merged"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries of `section` in insertion order.
    #[must_use]
    pub const fn section(&self, section: SectionName) -> &SectionEntries {
        self.sections.get(section)
    }

    /// Top-level keys outside the typed sections.
    #[must_use]
    pub const fn passthrough(&self) -> &SectionEntries {
        self.sections.get(SectionName::Passthrough)
    }

    /// The `Resources` section.
    #[must_use]
    pub const fn resources(&self) -> &SectionEntries {
        self.sections.get(SectionName::Resources)
    }

    /// The `Parameters` section.
    #[must_use]
    pub const fn parameters(&self) -> &SectionEntries {
        self.sections.get(SectionName::Parameters)
    }

    /// The `Outputs` section.
    #[must_use]
    pub const fn outputs(&self) -> &SectionEntries {
        self.sections.get(SectionName::Outputs)
    }

    /// Look up one logical ID in `section`.
    #[must_use]
    pub fn get(&self, section: SectionName, key: &str) -> Option<&Value> {
        self.section(section).get(key)
    }

    /// Returns `true` when every section is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|(_, entries)| entries.is_empty())
    }

    /// Iterate over all sections in canonical order, including empty ones.
    pub fn sections(&self) -> impl Iterator<Item = (SectionName, &SectionEntries)> {
        self.sections.iter()
    }

    pub(crate) const fn sections_mut(&mut self) -> &mut Sections {
        &mut self.sections
    }

    pub(crate) fn into_sections(self) -> Sections {
        self.sections
    }
}
