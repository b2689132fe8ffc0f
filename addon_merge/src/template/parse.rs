//! Conversion from raw fragment bytes into [`Template`] values.

use serde_yaml_ng::{Mapping, Value};

use super::{SectionEntries, SectionName, Template};
use crate::{AddonError, AddonResult};

impl Template {
    /// Parse one addon fragment.
    ///
    /// Whitespace-only content yields an empty template. Top-level keys that
    /// are not typed sections are preserved in the passthrough bucket.
    ///
    /// # Examples
    ///
    /// ```
    /// use addon_merge::{SectionName, Template};
    ///
    /// let yaml = b"Description: queue addon\nResources:\n  Queue:\n    Type: AWS::SQS::Queue\n";
    /// let template = Template::parse("queue.yml", yaml)?;
    /// assert!(template.resources().contains_key("Queue"));
    /// assert!(template.passthrough().contains_key("Description"));
    /// # Ok::<_, addon_merge::AddonError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::Parse`] when the content is not well-formed YAML
    /// (duplicate keys included) and [`AddonError::Structure`] when the
    /// document is not shaped like a template.
    pub fn parse(name: impl Into<String>, contents: &[u8]) -> AddonResult<Self> {
        let fragment = name.into();
        if contents.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::empty(fragment));
        }
        let document: Value = match serde_yaml_ng::from_slice(contents) {
            Ok(document) => document,
            Err(source) => return Err(AddonError::Parse { fragment, source }),
        };
        Self::from_value(fragment, document)
    }

    /// Build a template from an already-parsed YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::Structure`] when the top level is not a mapping,
    /// a key is not a string, a section is not a mapping, or a declared
    /// `Resources` section is empty.
    pub fn from_value(name: impl Into<String>, document: Value) -> AddonResult<Self> {
        let mut template = Self::empty(name);
        let mapping = match document {
            Value::Null => return Ok(template),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(AddonError::structure(
                    template.name,
                    format!("expected a mapping at the top level, found {}", kind(&other)),
                ));
            }
        };

        for (raw_key, value) in mapping {
            let key = string_key(&template.name, SectionName::Passthrough, raw_key)?;
            match SectionName::from_key(&key) {
                Some(section) => {
                    let entries = section_entries(&template.name, section, value)?;
                    *template.sections_mut().get_mut(section) = entries;
                }
                None => {
                    template
                        .sections_mut()
                        .get_mut(SectionName::Passthrough)
                        .insert(key, value);
                }
            }
        }
        Ok(template)
    }
}

fn section_entries(
    fragment: &str,
    section: SectionName,
    value: Value,
) -> AddonResult<SectionEntries> {
    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null if section != SectionName::Resources => Mapping::new(),
        other => {
            return Err(AddonError::structure(
                fragment,
                format!("{section} must be a mapping, found {}", kind(&other)),
            ));
        }
    };
    if section == SectionName::Resources && mapping.is_empty() {
        return Err(AddonError::structure(
            fragment,
            "Resources must declare at least one resource",
        ));
    }

    let mut entries = SectionEntries::with_capacity(mapping.len());
    for (raw_key, entry) in mapping {
        let key = string_key(fragment, section, raw_key)?;
        entries.insert(key, entry);
    }
    Ok(entries)
}

fn string_key(fragment: &str, section: SectionName, key: Value) -> AddonResult<String> {
    match key {
        Value::String(key) => Ok(key),
        other => Err(AddonError::structure(
            fragment,
            format!("{section} keys must be strings, found {}", kind(&other)),
        )),
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
