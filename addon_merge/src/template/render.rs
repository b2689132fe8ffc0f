//! Canonical serialisation of templates.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{SectionName, Template};
use crate::{AddonError, AddonResult};

impl Serialize for Template {
    /// Passthrough keys come first, then typed sections in canonical order.
    /// Empty sections are omitted.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let populated = SectionName::TYPED
            .into_iter()
            .filter(|section| !self.section(*section).is_empty());
        let len = self.passthrough().len() + populated.clone().count();

        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in self.passthrough() {
            map.serialize_entry(key, value)?;
        }
        for section in populated {
            map.serialize_entry(section.as_str(), self.section(section))?;
        }
        map.end()
    }
}

impl Template {
    /// Render the template as YAML text.
    ///
    /// Output is deterministic: the same template always renders to the same
    /// bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use addon_merge::Template;
    ///
    /// let yaml = Template::empty("merged").to_yaml()?;
    /// assert_eq!(yaml.trim(), "{}");
    /// # Ok::<_, addon_merge::AddonError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::Serialize`] if the YAML emitter rejects a value.
    pub fn to_yaml(&self) -> AddonResult<String> {
        serde_yaml_ng::to_string(self).map_err(|source| AddonError::Serialize { source })
    }
}
