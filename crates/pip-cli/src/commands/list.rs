//! Read-only commands: list and show

use colored::Colorize;

use pip_core::{EntryKind, NoopHook};

use crate::context::{Session, build_reconciler};
use crate::error::{CliError, Result};

/// Run the list command
pub fn run_list(session: &Session, json: bool) -> Result<()> {
    let kind = session.kind();
    let keys = kind.entry_list_keys();
    let reconciler = build_reconciler(kind, NoopHook, session.load_projects()?)?;
    let list = reconciler.entry_list(&keys);

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if list.is_empty() {
        println!("{} No entries.", "=>".blue().bold());
        return Ok(());
    }

    println!("{}", "Package Installation Plugins".bold());
    println!();
    for entry in list.entries() {
        let class_name = entry.fields.get("className").unwrap_or_default();
        println!("  {:<28} {}", entry.identifier.green(), class_name);
    }
    println!();
    println!("{} {} entries", "Total:".dimmed(), list.len());
    Ok(())
}

/// Run the show command
pub fn run_show(session: &Session, identifier: &str, json: bool) -> Result<()> {
    let reconciler = build_reconciler(session.kind(), NoopHook, session.load_projects()?)?;
    let data = reconciler
        .entry_data(identifier)
        .ok_or_else(|| CliError::user(format!("Unknown entry '{identifier}'")))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!("{}", identifier.cyan().bold());
    for (field, value) in data.iter() {
        println!("  {:<12} {}", format!("{field}:").dimmed(), value);
    }
    Ok(())
}
