//! Command-line interface definitions and helpers.
//!
//! This module contains CLI argument parsing, the command runner and
//! plain-text rendering of command outcomes.

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::execute;
pub use output::{
    render_add, render_item, render_list, render_remove, render_search, render_toggle,
    watched_label,
};
