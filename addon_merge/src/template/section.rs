//! Named top-level sections of an addon template.

use std::fmt;

use indexmap::IndexMap;
use serde_yaml_ng::Value;

/// Ordered mapping from logical ID to its definition.
///
/// Insertion order is preserved so merged output lists keys in the order
/// fragments were processed.
pub type SectionEntries = IndexMap<String, Value>;

/// Top-level template sections that the merge engine understands.
///
/// Any other top-level key is carried in the template's passthrough bucket
/// and reported as [`SectionName::Passthrough`] in collisions.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[non_exhaustive]
pub enum SectionName {
    /// Free-form top-level keys such as `AWSTemplateFormatVersion`.
    Passthrough,
    /// The `Metadata` section.
    Metadata,
    /// The `Parameters` section.
    Parameters,
    /// The `Mappings` section.
    Mappings,
    /// The `Conditions` section.
    Conditions,
    /// The `Resources` section.
    Resources,
    /// The `Outputs` section.
    Outputs,
}

impl SectionName {
    /// Typed sections in canonical render order.
    pub const TYPED: [Self; 6] = [
        Self::Metadata,
        Self::Parameters,
        Self::Mappings,
        Self::Conditions,
        Self::Resources,
        Self::Outputs,
    ];

    /// Every section, passthrough first, in canonical render order.
    pub const CANONICAL: [Self; 7] = [
        Self::Passthrough,
        Self::Metadata,
        Self::Parameters,
        Self::Mappings,
        Self::Conditions,
        Self::Resources,
        Self::Outputs,
    ];

    /// Resolve a top-level key to its typed section.
    ///
    /// Matching is case-sensitive; unknown keys return `None` and belong in
    /// the passthrough bucket.
    ///
    /// # Examples
    ///
    /// ```
    /// use addon_merge::SectionName;
    ///
    /// assert_eq!(SectionName::from_key("Resources"), Some(SectionName::Resources));
    /// assert_eq!(SectionName::from_key("resources"), None);
    /// assert_eq!(SectionName::from_key("Description"), None);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::TYPED.into_iter().find(|section| section.as_str() == key)
    }

    /// The key as written in a template.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passthrough => "top-level",
            Self::Metadata => "Metadata",
            Self::Parameters => "Parameters",
            Self::Mappings => "Mappings",
            Self::Conditions => "Conditions",
            Self::Resources => "Resources",
            Self::Outputs => "Outputs",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage for every section of one template, indexed by [`SectionName`].
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Sections {
    passthrough: SectionEntries,
    metadata: SectionEntries,
    parameters: SectionEntries,
    mappings: SectionEntries,
    conditions: SectionEntries,
    resources: SectionEntries,
    outputs: SectionEntries,
}

impl Sections {
    pub(crate) const fn get(&self, section: SectionName) -> &SectionEntries {
        match section {
            SectionName::Passthrough => &self.passthrough,
            SectionName::Metadata => &self.metadata,
            SectionName::Parameters => &self.parameters,
            SectionName::Mappings => &self.mappings,
            SectionName::Conditions => &self.conditions,
            SectionName::Resources => &self.resources,
            SectionName::Outputs => &self.outputs,
        }
    }

    pub(crate) const fn get_mut(&mut self, section: SectionName) -> &mut SectionEntries {
        match section {
            SectionName::Passthrough => &mut self.passthrough,
            SectionName::Metadata => &mut self.metadata,
            SectionName::Parameters => &mut self.parameters,
            SectionName::Mappings => &mut self.mappings,
            SectionName::Conditions => &mut self.conditions,
            SectionName::Resources => &mut self.resources,
            SectionName::Outputs => &mut self.outputs,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (SectionName, &SectionEntries)> {
        SectionName::CANONICAL
            .into_iter()
            .map(move |section| (section, self.get(section)))
    }
}
