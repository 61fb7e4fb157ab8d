//! vs-cli library
//!
//! The `vs` application root, exported for tests.

pub mod app;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod profile_commands;
pub mod views;


pub use app::{App, Outcome, SESSION_ENDED_EXIT_CODE};
pub use cli::Cli;
pub use error::{CliError, Result as CliResult};
