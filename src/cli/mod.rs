//! CLI module
//!
//! Provides:
//! - Argument parsing for CLI modes
//! - Mode dispatch (apply, extract, tool) with deterministic exit codes

pub mod args;
pub mod dispatch;

// Re-exports
pub use args::{parse_args, Args, Mode};
pub use dispatch::{run_cli_mode, ExitCode};

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("Tool error: {0}")]
    Tool(#[from] crate::tools::ToolError),

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
