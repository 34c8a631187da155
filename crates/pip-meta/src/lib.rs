//! Configuration and metadata for the PIP synchronization engine.
//!
//! This crate provides the installer configuration, the registry of known
//! plugin implementations and the field validators run at the form boundary.

pub mod config;
pub mod error;
pub mod registry;
pub mod validation;

pub use config::{CORE_PACKAGE, DatabaseConfig, InstallerConfig, PackageConfig, ProjectConfig};
pub use error::{Error, Result};
pub use registry::{Capability, PluginImplementation, PluginRegistry};
pub use validation::{FieldError, ValidationErrorKind, ValidationErrors};
