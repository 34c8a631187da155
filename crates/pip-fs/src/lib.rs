//! Filesystem primitives for the PIP synchronization engine
//!
//! Provides normalized paths, atomic whole-file writes and a
//! format-agnostic configuration store.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
