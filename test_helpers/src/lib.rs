//! Test helpers shared across crates.
//!
//! This crate provides temporary addon workspaces and `figment::Jail`
//! wrappers.

pub mod figment;
pub mod workspace;
