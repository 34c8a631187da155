//! Installing into and removing from the database

use colored::Colorize;

use pip_core::{InstallAction, ProjectXml};

use crate::context::Session;
use crate::error::Result;

/// Run the install command
pub fn run_install(session: &mut Session, update: bool) -> Result<()> {
    let action = if update {
        InstallAction::Update
    } else {
        InstallAction::Install
    };
    println!(
        "{} {} package {}",
        "=>".blue().bold(),
        if update { "Updating" } else { "Installing" },
        session.package().identifier.cyan()
    );

    let projects = session.load_projects()?;
    let report = session.transaction(|sync| {
        Ok(sync.install_documents(projects.iter().map(ProjectXml::document), action)?)
    })?;

    println!(
        "{} {} imported, {} updated, {} deleted.",
        "OK".green().bold(),
        report.imported,
        report.updated,
        report.deleted
    );
    Ok(())
}

/// Run the uninstall command
pub fn run_uninstall(session: &mut Session) -> Result<()> {
    let removed = session.transaction(|sync| Ok(sync.uninstall()?))?;
    println!(
        "{} Removed {} registration(s) of {}.",
        "OK".green().bold(),
        removed,
        session.package().identifier.cyan()
    );
    Ok(())
}
