//! XML document store for package installation plugin files
//!
//! Parses XML into an owned element tree, answers XPath-style path queries,
//! renders the tree back to canonical text and persists it atomically.

pub mod diff;
pub mod document;
pub mod error;
pub mod node;
mod parser;
pub mod query;
pub mod store;
mod writer;

pub use diff::TextDiffReport;
pub use document::{Declaration, XmlDocument};
pub use error::{Error, Result};
pub use node::{Attribute, Element, Node};
pub use store::XmlStore;
