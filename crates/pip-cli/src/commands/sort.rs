//! Normalizing project files

use colored::Colorize;

use crate::context::Session;
use crate::error::{CliError, Result};

/// Run the sort command
///
/// With `check`, nothing is written and unsorted files are reported as an
/// error together with their diff.
pub fn run_sort(session: &Session, check: bool) -> Result<()> {
    let kind = session.kind();
    let mut unsorted = 0;

    for mut project in session.load_projects()? {
        let report = project.normalization_diff(&kind)?;
        if report.is_equivalent {
            println!("{} {} is sorted.", "OK".green().bold(), project.path());
            continue;
        }

        if check {
            unsorted += 1;
            println!("{} {} is not sorted:", "!!".yellow().bold(), project.path());
            print!("{}", report.unified);
        } else {
            project.normalize(&kind)?;
            println!(
                "{} {} rewritten ({} lines changed).",
                "OK".green().bold(),
                project.path(),
                report.changed_lines()
            );
        }
    }

    if unsorted > 0 {
        return Err(CliError::user(format!(
            "{unsorted} project file(s) are not in canonical order"
        )));
    }
    Ok(())
}
