//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pipsync - Edit package installation plugin XML and install it into the database
#[derive(Parser, Debug)]
#[command(name = "pipsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the installer configuration
    #[arg(short, long, global = true, env = "PIPSYNC_CONFIG", default_value = "pipsync.toml")]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List the entries of all project files
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the data of one entry
    Show {
        /// Plugin name of the entry
        identifier: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Add an entry to every project file and register it
    Add {
        /// Plugin name, e.g. `acpMenu`
        #[arg(long)]
        name: String,

        /// Fully-qualified plugin class name
        #[arg(long = "class")]
        class_name: String,
    },

    /// Change an existing entry
    Edit {
        /// Current plugin name of the entry
        identifier: String,

        /// New plugin name
        #[arg(long)]
        name: Option<String>,

        /// New class name
        #[arg(long = "class")]
        class_name: Option<String>,
    },

    /// Remove an entry and record it for deletion on update
    Delete {
        /// Plugin name of the entry
        identifier: String,
    },

    /// Rewrite project files in canonical order
    Sort {
        /// Only report files that are not in canonical order
        #[arg(long)]
        check: bool,
    },

    /// Install the project files into the database
    Install {
        /// Also remove the entries listed for deletion
        #[arg(long)]
        update: bool,
    },

    /// Remove every registration of the package
    Uninstall,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_class_flag() {
        let cli = Cli::parse_from(["pipsync", "add", "--name", "foo", "--class", "vendor\\Foo"]);
        assert_eq!(
            cli.command,
            Commands::Add {
                name: "foo".to_string(),
                class_name: "vendor\\Foo".to_string()
            }
        );
        assert_eq!(cli.config, PathBuf::from("pipsync.toml"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pipsync", "list", "--json", "-v", "--config", "x.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("x.toml"));
        assert_eq!(cli.command, Commands::List { json: true });
    }
}
