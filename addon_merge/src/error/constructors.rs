//! Constructors and inspection helpers for `AddonError`.

use camino::Utf8Path;

use super::AddonError;
use crate::SectionName;

impl AddonError {
    /// Construct a [`AddonError::Structure`] for `fragment`.
    ///
    /// # Examples
    ///
    /// ```
    /// use addon_merge::AddonError;
    ///
    /// let err = AddonError::structure("db.yml", "top level must be a mapping");
    /// assert_eq!(err.to_string(), "invalid addon db.yml: top level must be a mapping");
    /// ```
    #[must_use]
    pub fn structure(fragment: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Structure {
            fragment: fragment.into(),
            message: message.into(),
        }
    }

    /// Construct a [`AddonError::Collision`].
    #[must_use]
    pub fn collision(
        section: SectionName,
        key: impl Into<String>,
        fragment: impl Into<String>,
        first_declared_in: impl Into<String>,
    ) -> Self {
        Self::Collision {
            section,
            key: key.into(),
            fragment: fragment.into(),
            first_declared_in: first_declared_in.into(),
        }
    }

    pub(crate) fn io(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns `true` when the error reports a key declared by two fragments.
    #[must_use]
    pub const fn is_collision(&self) -> bool {
        matches!(self, Self::Collision { .. })
    }

    /// The fragment the error is attributed to, when there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use addon_merge::{AddonError, SectionName};
    ///
    /// let err = AddonError::collision(SectionName::Resources, "Bucket", "b.yaml", "a.yaml");
    /// assert_eq!(err.fragment(), Some("b.yaml"));
    /// ```
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        match self {
            Self::Read { fragment, .. }
            | Self::Parse { fragment, .. }
            | Self::Structure { fragment, .. }
            | Self::Collision { fragment, .. } => Some(fragment),
            _ => None,
        }
    }
}
