//! Command implementations for pip-cli

pub mod entry;
pub mod install;
pub mod list;
pub mod sort;

pub use entry::{run_add, run_delete, run_edit};
pub use install::{run_install, run_uninstall};
pub use list::{run_list, run_show};
pub use sort::run_sort;
