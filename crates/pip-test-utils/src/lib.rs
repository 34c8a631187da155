//! Shared test utilities for the pip-sync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`xml`]: canonical project XML documents built from entry lists
//! - [`project`]: [`TestProject`] builder for a package directory with a
//!   `pipsync.toml` and its project files

pub mod project;
pub mod xml;

pub use project::TestProject;
