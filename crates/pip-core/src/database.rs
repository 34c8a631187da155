//! Syncing plugin registrations into the database
//!
//! Rows live in `{prefix}package_installation_plugin` and are keyed by
//! `(pluginName, packageID)`. Statements run on the caller's connection;
//! wrapping them in a transaction is up to the caller.

use std::collections::{BTreeMap, HashSet};

use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use serde::Serialize;

use pip_meta::PackageConfig;
use pip_meta::config::DEFAULT_FILENAME;
use pip_xml::{Element, XmlDocument};

use crate::error::{Error, Result};
use crate::hooks::{EntryHook, EntrySnapshot};
use crate::identifier::IdentifierResolver;
use crate::pip::{self, TAG_NAME};

pub const TABLE_NAME: &str = "package_installation_plugin";

/// Attributes and character data of one XML item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportItem {
    pub attributes: BTreeMap<String, String>,
    pub node_value: String,
}

impl ImportItem {
    pub fn from_element(element: &Element) -> Self {
        Self {
            attributes: element
                .attributes()
                .iter()
                .map(|a| (a.name.clone(), a.value.clone()))
                .collect(),
            node_value: element.text_content(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").map(String::as_str)
    }
}

/// A row of the plugin table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipRow {
    pub plugin_name: String,
    #[serde(rename = "packageID")]
    pub package_id: i64,
    pub priority: i64,
    pub class_name: String,
}

/// Statement locating the row an item would replace.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingItemQuery {
    pub sql: String,
    pub parameters: Vec<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallAction {
    Install,
    /// Remove the items listed in `<delete>` before importing
    Update,
}

/// Counts of an install run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    /// New rows
    pub imported: usize,
    /// Existing rows updated in place
    pub updated: usize,
    pub deleted: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportResult {
    Inserted,
    Updated,
}

/// Database side of the `pip` entry kind.
pub struct PipDatabaseSync<'c> {
    conn: &'c Connection,
    package: PackageConfig,
    table: String,
}

impl<'c> PipDatabaseSync<'c> {
    /// # Errors
    ///
    /// Returns `InvalidTableName` unless the prefix consists of ASCII
    /// letters, digits and underscores.
    pub fn new(conn: &'c Connection, package: PackageConfig, table_prefix: &str) -> Result<Self> {
        let table = format!("{table_prefix}{TABLE_NAME}");
        if !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::InvalidTableName { name: table });
        }
        Ok(Self {
            conn,
            package,
            table,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn package(&self) -> &PackageConfig {
        &self.package
    }

    pub fn default_filename() -> &'static str {
        DEFAULT_FILENAME
    }

    /// Plugins that must run before this one.
    pub fn sync_dependencies() -> &'static [&'static str] {
        &[]
    }

    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                pluginName TEXT NOT NULL,
                packageID INTEGER NOT NULL,
                priority INTEGER NOT NULL DEFAULT 0,
                className TEXT NOT NULL,
                UNIQUE (pluginName, packageID)
            );",
            table = self.table
        ))?;
        Ok(())
    }

    /// Map an XML item to a row of this package.
    pub fn prepare_import(&self, item: &ImportItem) -> Result<PipRow> {
        let plugin_name = item.name().ok_or_else(|| Error::MissingField {
            field: pip::PLUGIN_NAME.to_string(),
        })?;
        Ok(PipRow {
            plugin_name: plugin_name.to_string(),
            package_id: self.package.id,
            priority: pip::priority_for(&self.package),
            class_name: item.node_value.clone(),
        })
    }

    pub fn find_existing_item(&self, row: &PipRow) -> ExistingItemQuery {
        ExistingItemQuery {
            sql: format!(
                "SELECT pluginName, packageID, priority, className FROM {} \
                 WHERE pluginName = ? AND packageID = ?",
                self.table
            ),
            parameters: vec![
                Value::Text(row.plugin_name.clone()),
                Value::Integer(row.package_id),
            ],
        }
    }

    pub fn find_existing(&self, row: &PipRow) -> Result<Option<PipRow>> {
        let query = self.find_existing_item(row);
        let existing = self
            .conn
            .query_row(&query.sql, params_from_iter(query.parameters.iter()), read_row)
            .optional()?;
        Ok(existing)
    }

    /// Update the row in place when it exists, insert it otherwise.
    pub fn import(&self, row: &PipRow) -> Result<ImportResult> {
        if self.find_existing(row)?.is_some() {
            self.update(&row.plugin_name, row)?;
            return Ok(ImportResult::Updated);
        }
        self.conn.execute(
            &format!(
                "INSERT INTO {} (pluginName, packageID, priority, className) VALUES (?1, ?2, ?3, ?4)",
                self.table
            ),
            params![row.plugin_name, row.package_id, row.priority, row.class_name],
        )?;
        tracing::debug!(plugin = %row.plugin_name, "inserted plugin row");
        Ok(ImportResult::Inserted)
    }

    fn update(&self, plugin_name: &str, row: &PipRow) -> Result<usize> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE {} SET pluginName = ?1, priority = ?2, className = ?3 \
                 WHERE pluginName = ?4 AND packageID = ?5",
                self.table
            ),
            params![
                row.plugin_name,
                row.priority,
                row.class_name,
                plugin_name,
                row.package_id
            ],
        )?;
        tracing::debug!(old = plugin_name, new = %row.plugin_name, changed, "updated plugin row");
        Ok(changed)
    }

    /// Delete the rows of the given items. Returns the number of rows
    /// removed.
    pub fn handle_delete(&self, items: &[ImportItem]) -> Result<usize> {
        let sql = format!(
            "DELETE FROM {} WHERE pluginName = ?1 AND packageID = ?2",
            self.table
        );
        let mut deleted = 0;
        for item in items {
            let Some(name) = item.name() else {
                continue;
            };
            deleted += self.conn.execute(&sql, params![name, self.package.id])?;
        }
        Ok(deleted)
    }

    /// Apply a document to the table.
    pub fn install(&self, document: &XmlDocument, action: InstallAction) -> Result<InstallReport> {
        self.install_documents([document], action)
    }

    /// Apply several documents of the package as one install run.
    ///
    /// On update, deletion markers of every document are handled before any
    /// import. An entry declared in more than one document is imported once,
    /// from the first document declaring it, so each row is counted once.
    pub fn install_documents<'d>(
        &self,
        documents: impl IntoIterator<Item = &'d XmlDocument>,
        action: InstallAction,
    ) -> Result<InstallReport> {
        let documents: Vec<&XmlDocument> = documents.into_iter().collect();
        let resolver = IdentifierResolver::new(TAG_NAME, "name");
        let mut report = InstallReport::default();

        if action == InstallAction::Update {
            let items: Vec<ImportItem> = documents
                .iter()
                .copied()
                .flat_map(|document| resolver.delete_entries(document))
                .map(ImportItem::from_element)
                .collect();
            report.deleted = self.handle_delete(&items)?;
        }

        let mut seen = HashSet::new();
        for element in documents
            .iter()
            .copied()
            .flat_map(|document| resolver.import_entries(document))
        {
            let row = self.prepare_import(&ImportItem::from_element(element))?;
            if !seen.insert(row.plugin_name.clone()) {
                tracing::debug!(plugin = %row.plugin_name, "skipping entry declared twice");
                continue;
            }
            match self.import(&row)? {
                ImportResult::Inserted => report.imported += 1,
                ImportResult::Updated => report.updated += 1,
            }
        }

        tracing::info!(
            package = %self.package.identifier,
            documents = documents.len(),
            imported = report.imported,
            updated = report.updated,
            deleted = report.deleted,
            "installed package installation plugins"
        );
        Ok(report)
    }

    /// Remove every row of the package.
    pub fn uninstall(&self) -> Result<usize> {
        let removed = self.conn.execute(
            &format!("DELETE FROM {} WHERE packageID = ?1", self.table),
            params![self.package.id],
        )?;
        tracing::info!(package = %self.package.identifier, removed, "uninstalled plugins");
        Ok(removed)
    }

    /// Names of all registered plugins, of every package.
    pub fn plugin_names(&self) -> Result<Vec<String>> {
        let mut statement = self
            .conn
            .prepare(&format!("SELECT pluginName FROM {} ORDER BY pluginName", self.table))?;
        let names = statement
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Rows of this package ordered by plugin name.
    pub fn rows(&self) -> Result<Vec<PipRow>> {
        let mut statement = self.conn.prepare(&format!(
            "SELECT pluginName, packageID, priority, className FROM {} \
             WHERE packageID = ?1 ORDER BY pluginName",
            self.table
        ))?;
        let rows = statement
            .query_map(params![self.package.id], read_row)?
            .collect::<rusqlite::Result<Vec<PipRow>>>()?;
        Ok(rows)
    }
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PipRow> {
    Ok(PipRow {
        plugin_name: row.get(0)?,
        package_id: row.get(1)?,
        priority: row.get(2)?,
        class_name: row.get(3)?,
    })
}

impl EntryHook for PipDatabaseSync<'_> {
    fn save_object(&mut self, new: &EntrySnapshot, old: Option<&EntrySnapshot>) -> Result<()> {
        let row = self.prepare_import(&ImportItem::from_element(&new.element))?;
        match old {
            None => {
                self.import(&row)?;
            }
            Some(old) => {
                if self.update(&old.identifier, &row)? == 0 {
                    self.import(&row)?;
                }
            }
        }
        Ok(())
    }

    fn delete_object(&mut self, old: &EntrySnapshot) -> Result<()> {
        self.handle_delete(&[ImportItem::from_element(&old.element)])?;
        Ok(())
    }
}
