//! Session context shared by all commands
//!
//! A session is the loaded `pipsync.toml`, the plugin registry it extends
//! and an open database connection. Paths in the config are resolved
//! against the directory holding it.

use std::path::Path;

use rusqlite::Connection;

use pip_core::{
    EntryHook, EntryReconciler, MultiDocumentReconciler, PipDatabaseSync, PipEntryKind,
    ProjectXml, SingleDocumentReconciler,
};
use pip_fs::NormalizedPath;
use pip_meta::{InstallerConfig, PackageConfig, PluginImplementation, PluginRegistry};

use crate::error::Result;

pub struct Session {
    config: InstallerConfig,
    base_dir: NormalizedPath,
    registry: PluginRegistry,
    conn: Connection,
}

impl Session {
    /// Load the configuration and open the database it points to.
    pub fn open(config_path: &Path) -> Result<Self> {
        let config_path = NormalizedPath::new(std::path::absolute(config_path)?);
        let config = InstallerConfig::load(&config_path)?;
        let base_dir = config_path
            .parent()
            .unwrap_or_else(|| NormalizedPath::new("."));

        let mut registry = PluginRegistry::with_builtins();
        for declaration in &config.plugins {
            registry.register(PluginImplementation::from(declaration));
        }

        let database_path = config.database_path(&base_dir);
        let conn = Connection::open(database_path.to_native())?;
        tracing::debug!(database = %database_path, "opened database");

        Ok(Self {
            config,
            base_dir,
            registry,
            conn,
        })
    }

    pub fn package(&self) -> &PackageConfig {
        &self.config.package
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn kind(&self) -> PipEntryKind {
        PipEntryKind::new(&self.config.package)
    }

    /// The configured project files. Missing files start out empty.
    pub fn load_projects(&self) -> Result<Vec<ProjectXml>> {
        let kind = self.kind();
        let projects = self
            .config
            .project_paths(&self.base_dir)
            .iter()
            .map(|path| ProjectXml::load_or_create(path, &kind))
            .collect::<pip_core::Result<Vec<_>>>()?;
        Ok(projects)
    }

    /// Run `f` against the plugin table inside one transaction. Nothing is
    /// committed if `f` fails.
    pub fn transaction<T>(
        &mut self,
        f: impl FnOnce(&mut PipDatabaseSync<'_>) -> Result<T>,
    ) -> Result<T> {
        let tx = self.conn.transaction()?;
        let value = {
            let mut sync = PipDatabaseSync::new(
                &tx,
                self.config.package.clone(),
                &self.config.database.table_prefix,
            )?;
            sync.ensure_schema()?;
            f(&mut sync)?
        };
        tx.commit()?;
        Ok(value)
    }
}

/// A reconciler over `projects`: single-document for one file, otherwise
/// multi-document.
pub fn build_reconciler<'h, H: EntryHook + 'h>(
    kind: PipEntryKind,
    hook: H,
    mut projects: Vec<ProjectXml>,
) -> Result<Box<dyn EntryReconciler + 'h>> {
    if projects.len() == 1 {
        let project = projects.remove(0);
        return Ok(Box::new(SingleDocumentReconciler::new(kind, hook, project)));
    }
    Ok(Box::new(MultiDocumentReconciler::new(kind, hook, projects)?))
}
