//! Installer configuration
//!
//! The configuration lives in a `pipsync.toml` next to the package sources:
//!
//! ```toml
//! [package]
//! id = 1
//! identifier = "com.woltlab.wcf"
//!
//! [database]
//! path = "wcf.db"
//! table_prefix = "wcf1_"
//!
//! [project]
//! paths = ["packageInstallationPlugin.xml"]
//!
//! [[plugins]]
//! class_name = "vendor\\system\\package\\plugin\\FooPackageInstallationPlugin"
//! ```
//!
//! Relative paths are resolved against the directory of the config file.

use serde::{Deserialize, Serialize};

use pip_fs::{ConfigStore, NormalizedPath};

use crate::error::{Error, Result};
use crate::registry::{Capability, PluginImplementation};

/// Identifier of the core package. Plugins it registers get priority 1.
pub const CORE_PACKAGE: &str = "com.woltlab.wcf";

/// Default name of the XML file a package ships its plugins in.
pub const DEFAULT_FILENAME: &str = "packageInstallationPlugin.xml";

/// The package whose plugins are being installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Database id of the package (`packageID`)
    pub id: i64,
    /// Package identifier such as `com.woltlab.wcf`
    pub identifier: String,
}

impl PackageConfig {
    pub fn new(id: i64, identifier: impl Into<String>) -> Self {
        Self {
            id,
            identifier: identifier.into(),
        }
    }

    /// Whether this is the core package.
    pub fn is_core(&self) -> bool {
        self.identifier == CORE_PACKAGE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
}

fn default_database_path() -> String {
    "pipsync.db".to_string()
}

fn default_table_prefix() -> String {
    "wcf1_".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            table_prefix: default_table_prefix(),
        }
    }
}

/// The project XML files managed together.
///
/// One path selects the single-document reconciler, several paths the
/// multi-document one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_project_paths")]
    pub paths: Vec<String>,
}

fn default_project_paths() -> Vec<String> {
    vec![DEFAULT_FILENAME.to_string()]
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            paths: default_project_paths(),
        }
    }
}

/// A plugin implementation declared in the config, in addition to the
/// built-in ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDeclaration {
    pub class_name: String,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default = "default_capabilities")]
    pub capabilities: Vec<Capability>,
}

fn default_capabilities() -> Vec<Capability> {
    vec![Capability::PackageInstallationPlugin]
}

impl From<&PluginDeclaration> for PluginImplementation {
    fn from(declaration: &PluginDeclaration) -> Self {
        PluginImplementation::new(
            declaration.class_name.clone(),
            declaration.is_abstract,
            declaration.capabilities.iter().copied(),
        )
    }
}

/// Top-level installer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerConfig {
    pub package: PackageConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub plugins: Vec<PluginDeclaration>,
}

impl InstallerConfig {
    pub fn new(package: PackageConfig) -> Self {
        Self {
            package,
            database: DatabaseConfig::default(),
            project: ProjectConfig::default(),
            plugins: Vec::new(),
        }
    }

    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file does not exist, `Fs` if it
    /// cannot be parsed and `InvalidConfig` if required values are empty.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_native(),
            });
        }

        let config: InstallerConfig = ConfigStore::new().load(path)?;
        config.validate(path)?;
        tracing::debug!(
            path = %path,
            package = %config.package.identifier,
            documents = config.project.paths.len(),
            "loaded installer configuration"
        );
        Ok(config)
    }

    fn validate(&self, path: &NormalizedPath) -> Result<()> {
        let invalid = |message: &str| Error::InvalidConfig {
            path: path.to_native(),
            message: message.to_string(),
        };

        if self.package.identifier.trim().is_empty() {
            return Err(invalid("package.identifier must not be empty"));
        }
        if self.project.paths.is_empty() {
            return Err(invalid("project.paths must list at least one XML file"));
        }
        if self.project.paths.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid("project.paths must not contain empty entries"));
        }
        Ok(())
    }

    /// Project XML paths resolved against `base_dir`.
    pub fn project_paths(&self, base_dir: &NormalizedPath) -> Vec<NormalizedPath> {
        self.project
            .paths
            .iter()
            .map(|p| NormalizedPath::new(p).resolve_against(base_dir))
            .collect()
    }

    /// Database path resolved against `base_dir`.
    pub fn database_path(&self, base_dir: &NormalizedPath) -> NormalizedPath {
        NormalizedPath::new(&self.database.path).resolve_against(base_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_package_detection() {
        assert!(PackageConfig::new(1, "com.woltlab.wcf").is_core());
        assert!(!PackageConfig::new(2, "com.example.addon").is_core());
    }

    #[test]
    fn test_defaults_apply() {
        let config: InstallerConfig =
            toml::from_str("[package]\nid = 3\nidentifier = \"com.example.addon\"\n").unwrap();
        assert_eq!(config.database, DatabaseConfig::default());
        assert_eq!(config.project.paths, vec![DEFAULT_FILENAME.to_string()]);
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn test_plugin_declaration_defaults_to_pip_capability() {
        let config: InstallerConfig = toml::from_str(
            r#"
[package]
id = 3
identifier = "com.example.addon"

[[plugins]]
class_name = "vendor\\FooPackageInstallationPlugin"
"#,
        )
        .unwrap();
        let implementation = PluginImplementation::from(&config.plugins[0]);
        assert!(implementation.has_capability(Capability::PackageInstallationPlugin));
        assert!(implementation.is_instantiable());
    }
}
