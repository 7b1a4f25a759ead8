//! The `sidon` command-line front end: argument parsing, the batch worker
//! pool, and the glue that wires a parsed command to `sidon-engine` and
//! `sidon-persist`.
//!
//! Modeled on the teacher's `cesso-uci` crate (command parsing + error type
//! + an engine-loop struct), but built around `clap` subcommands rather than
//! a line protocol, since a batch search is driven by arguments rather than
//! an interactive session.

pub mod app;
pub mod command;
pub mod error;
pub mod pool;

pub use app::dispatch;
pub use command::{Cli, Command};
pub use error::CliError;
