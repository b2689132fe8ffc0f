//! Merge a workload's addon templates into one deployable template.
//!
//! Each file in a workload's `addons` directory is a partial template that
//! declares some `Parameters`, `Resources`, `Outputs` and so on. This crate
//! selects the template files, parses them into [`Template`] values, and folds
//! them together with [`TemplateMerger`]. Addons are additive: two fragments
//! declaring the same key in one section is an [`AddonError::Collision`],
//! never a silent overwrite.
//!
//! ```rust
//! use addon_merge::{Addons, AddonError, InMemorySource, SectionName};
//!
//! let source = InMemorySource::new()
//!     .with_fragment("api", "a.yaml", "Resources:\n  Bucket:\n    Type: AWS::S3::Bucket\n")
//!     .with_fragment("api", "b.yaml", "Resources:\n  Bucket:\n    Type: AWS::S3::Bucket\n");
//!
//! match Addons::new("api", &source).merged_template() {
//!     Err(AddonError::Collision { section, key, fragment, .. }) => {
//!         assert_eq!(section, SectionName::Resources);
//!         assert_eq!(key, "Bucket");
//!         assert_eq!(fragment, "b.yaml");
//!     }
//!     other => panic!("expected a collision, got {other:?}"),
//! }
//! ```

mod addons;
mod error;
mod merge;
mod selection;
pub mod source;
mod template;

pub use addons::{Addons, STACK_NAME};
pub use error::{AddonError, AddonResult};
pub use merge::{TemplateMerger, merge_templates};
pub use selection::{TEMPLATE_EXTENSIONS, is_template_file, select_template_files};
pub use source::{AddonSource, Fragment, InMemorySource, Workspace};
pub use template::{MERGED_TEMPLATE_NAME, SectionEntries, SectionName, Template};
