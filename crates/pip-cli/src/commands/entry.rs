//! Entry mutations: add, edit and delete
//!
//! Submissions are validated first. Each command then runs inside one
//! database transaction so the table follows the files.

use std::collections::BTreeSet;

use colored::Colorize;

use pip_core::pip::{CLASS_NAME, PLUGIN_NAME};
use pip_core::{FieldMapping, PipDatabaseSync, PipFormValidator, ProjectXml};

use crate::context::{Session, build_reconciler};
use crate::error::Result;

/// Names that a new plugin name must not collide with: registered rows of
/// every package plus entries not installed yet.
fn taken_names(sync: &PipDatabaseSync<'_>, projects: &[ProjectXml]) -> Result<BTreeSet<String>> {
    let mut names: BTreeSet<String> = sync.plugin_names()?.into_iter().collect();
    let resolver = pip_core::IdentifierResolver::new(pip_core::pip::TAG_NAME, "name");
    for project in projects {
        names.extend(
            resolver
                .import_entries(project.document())
                .into_iter()
                .map(|e| resolver.identifier_of(e)),
        );
    }
    Ok(names)
}

/// Run the add command
pub fn run_add(session: &mut Session, name: &str, class_name: &str) -> Result<()> {
    println!("{} Adding entry: {}", "=>".blue().bold(), name.cyan());

    let kind = session.kind();
    let projects = session.load_projects()?;
    let registry = session.registry().clone();
    let fields = FieldMapping::new()
        .with(PLUGIN_NAME, name)
        .with(CLASS_NAME, class_name);

    session.transaction(|sync| {
        let taken = taken_names(sync, &projects)?;
        PipFormValidator::new(&registry, taken)
            .validate(&fields)
            .map_err(pip_core::Error::from)?;

        let mut reconciler = build_reconciler(kind, &mut *sync, projects)?;
        reconciler.add_entry(&fields)?;
        Ok(())
    })?;

    println!("{} Entry {} added.", "OK".green().bold(), name.cyan());
    Ok(())
}

/// Run the edit command
///
/// Fields not given keep their current value.
pub fn run_edit(
    session: &mut Session,
    identifier: &str,
    name: Option<&str>,
    class_name: Option<&str>,
) -> Result<()> {
    println!("{} Editing entry: {}", "=>".blue().bold(), identifier.cyan());

    let kind = session.kind();
    let projects = session.load_projects()?;
    let registry = session.registry().clone();

    let outcome = session.transaction(|sync| {
        let taken = taken_names(sync, &projects)?;
        let mut reconciler = build_reconciler(kind, &mut *sync, projects)?;
        reconciler.set_edited_entry_identifier(identifier)?;

        let mut fields = reconciler.entry_data(identifier).unwrap_or_default();
        if let Some(name) = name {
            fields.insert(PLUGIN_NAME, name);
        }
        if let Some(class_name) = class_name {
            fields.insert(CLASS_NAME, class_name);
        }

        PipFormValidator::new(&registry, taken)
            .editing(identifier)
            .validate(&fields)
            .map_err(pip_core::Error::from)?;

        Ok(reconciler.edit_entry(&fields, identifier)?)
    })?;

    if outcome.partial {
        eprintln!(
            "{} Entry {} is missing from some project files.",
            "warning:".yellow().bold(),
            identifier
        );
    }
    println!(
        "{} Entry {} saved as {}.",
        "OK".green().bold(),
        identifier.cyan(),
        outcome.identifier.cyan()
    );
    Ok(())
}

/// Run the delete command
pub fn run_delete(session: &mut Session, identifier: &str) -> Result<()> {
    println!("{} Deleting entry: {}", "=>".blue().bold(), identifier.cyan());

    let kind = session.kind();
    let projects = session.load_projects()?;

    let outcome = session.transaction(|sync| {
        let mut reconciler = build_reconciler(kind, &mut *sync, projects)?;
        Ok(reconciler.delete_entry(identifier)?)
    })?;

    if outcome.partial {
        eprintln!(
            "{} Entry {} is missing from some project files.",
            "warning:".yellow().bold(),
            identifier
        );
    }
    println!(
        "{} Entry {} deleted from {} file(s).",
        "OK".green().bold(),
        identifier.cyan(),
        outcome.removed
    );
    Ok(())
}
