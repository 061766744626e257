//! # pp-console
//!
//! Console adapter for PowerPresenter: bootstrap (config, tracing, wiring),
//! the command line, a text surface and the line-command interpreter.

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod surface;

pub use bootstrap::run;
pub use cli::Cli;
