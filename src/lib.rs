//! Interactive Worker Pool Controller Library
//!
//! This library contains the core logic for the workerctl utility: the
//! shared atomic control state, the worker thread loop, the fixed worker
//! pool, the console menu controller with its pause/resume output
//! protocol, settings parsing, command-line interface handling, and
//! termination signal handling.
//!
//! The binary (`main.rs`) wires these together: parse arguments, load
//! settings, spawn the pool, run the menu loop, join everything on exit.

// Module declarations
pub mod cli;
pub mod config;
pub mod console;
pub mod control;
pub mod menu;
pub mod pool;
pub mod signals;
pub mod worker;

// Re-export key items for easy use by the binary (main.rs)
pub use cli::parse_args;
pub use config::{parse_settings, Settings};
pub use console::{set_log_file, Console};
pub use control::ControlState;
pub use menu::{CommandInput, Controller, StdinInput};
pub use pool::WorkerPool;
pub use signals::install_signal_handler;
pub use worker::run_worker;

/// Name of the program used for usage and version output
pub const PROGRAM_NAME: &str = "workerctl";

/// Current version of the program (from Cargo.toml)
/// Follows semantic versioning (MAJOR.MINOR.PATCH)
pub const PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");
