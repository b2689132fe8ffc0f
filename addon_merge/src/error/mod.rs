//! Error types produced while loading and merging addon templates.

mod constructors;
mod types;

pub use types::AddonError;

/// Result alias used throughout the crate.
pub type AddonResult<T> = Result<T, AddonError>;

#[cfg(test)]
mod tests;
