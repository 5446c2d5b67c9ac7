//! Library components of the `dspace` command-line tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod payload;
pub mod summary;
