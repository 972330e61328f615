//! CLI command handlers. Each command is in its own file.

mod check;
mod completions;
mod extract;
mod list;

pub use check::run_check;
pub use completions::{run_completions, run_man};
pub use extract::{extract_with, run_extract};
pub use list::run_commands;
