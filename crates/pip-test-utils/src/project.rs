//! [`TestProject`] builder for package directories.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::xml;

/// Name of the configuration file written by [`TestProject::with_config`].
pub const CONFIG_FILE: &str = "pipsync.toml";

/// A temporary package directory with helper methods for test setup and
/// assertion.
///
/// # Example
///
/// ```rust,no_run
/// use pip_test_utils::TestProject;
///
/// let project = TestProject::new()
///     .with_config(3, "com.example.addon", &["packageInstallationPlugin.xml"])
///     .with_pip_xml("packageInstallationPlugin.xml", &[("foo", "vendor\\Foo")]);
/// project.assert_file_contains("packageInstallationPlugin.xml", "name=\"foo\"");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn config_path(&self) -> PathBuf {
        self.path(CONFIG_FILE)
    }

    /// Write a `pipsync.toml` for the package with the given project files
    /// and a database next to it.
    pub fn with_config(self, package_id: i64, identifier: &str, paths: &[&str]) -> Self {
        let paths = paths
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let config = format!(
            "[package]\nid = {package_id}\nidentifier = \"{identifier}\"\n\n\
             [database]\npath = \"pipsync.db\"\n\n\
             [project]\npaths = [{paths}]\n"
        );
        self.write_file(CONFIG_FILE, &config);
        self
    }

    /// Write a canonical project XML with the given entries.
    pub fn with_pip_xml(self, relative: &str, imports: &[(&str, &str)]) -> Self {
        self.write_file(relative, &xml::pip_document(imports, &[]));
        self
    }

    /// Write `content` to `relative`, creating parent directories.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn write_file(&self, relative: &str, content: &str) {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", full_path.display()));
    }

    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_file(&self, relative: &str) -> String {
        let full_path = self.path(relative);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read_file(path);
        assert!(
            file_content.contains(content),
            "File {path} does not contain expected content.\nExpected: {content}\nActual: {file_content}"
        );
    }

    /// Assert that no temp file of an atomic write was left behind.
    ///
    /// # Panics
    /// Panics if a `.tmp` file exists in the project root.
    pub fn assert_no_temp_files(&self) {
        let leftovers: Vec<_> = fs::read_dir(self.root())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "Leftover temp files: {leftovers:?}");
    }
}
