//! CLI mode dispatch
//!
//! Dispatches to the mode handlers:
//! - apply: run the edit pipeline over a saved response file
//! - extract: list the edit intents without touching the workspace
//! - tool: run one exploration tool and print its output

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::cli::{Args, Error, Mode, Result, EXIT_FAILURE, EXIT_SUCCESS};
use crate::edit_engine::{extract_and_apply, extract_intents, ApplyResult};
use crate::file_store::WorkspaceStore;
use crate::tools::{ToolCall, ToolExecutor, WorkspaceToolExecutor};

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

/// Run CLI mode and return exit code
///
/// This is the main entry point for mode dispatch, called from `main()`
/// after argument parsing.
pub fn run_cli_mode(args: Args) -> ExitCode {
    let workspace = args
        .workspace
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let mode = match args.mode {
        Some(mode) => mode,
        None => return EXIT_SUCCESS,
    };

    match run_mode(mode, workspace, args.json_output) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_FAILURE
        }
    }
}

/// Run specific CLI mode
fn run_mode(mode: Mode, workspace: PathBuf, json_output: bool) -> Result<()> {
    match mode {
        Mode::Apply { response_file } => run_apply_mode(workspace, &response_file, json_output),
        Mode::Extract { response_file } => {
            run_extract_mode(workspace, &response_file, json_output)
        }
        Mode::Tool { name, tool_args } => {
            run_tool_mode(workspace, &name, &tool_args, json_output)
        }
    }
}

/// Apply every actionable block in a saved response
fn run_apply_mode(workspace: PathBuf, response_file: &str, json_output: bool) -> Result<()> {
    let response = fs::read_to_string(response_file)?;
    let mut store = WorkspaceStore::new(workspace);

    let results = extract_and_apply(&response, &mut store);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_apply_summary(&results);
    }
    Ok(())
}

fn print_apply_summary(results: &[ApplyResult]) {
    if results.is_empty() {
        println!("No actionable code blocks found.");
        return;
    }
    for result in results {
        match &result.reason {
            None => println!(
                "applied   {} ({} lines)",
                result.file_path,
                result.final_content.len()
            ),
            Some(reason) => println!("rejected  {} ({})", result.file_path, reason),
        }
    }
}

/// List edit intents without applying anything
fn run_extract_mode(_workspace: PathBuf, response_file: &str, json_output: bool) -> Result<()> {
    let response = fs::read_to_string(response_file)?;
    let intents = extract_intents(&response);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&intents)?);
    } else if intents.is_empty() {
        println!("No actionable code blocks found.");
    } else {
        for intent in &intents {
            match intent.range() {
                Some(range) => println!(
                    "{} lines {}:{} ({} replacement lines)",
                    intent.file_path,
                    range.start,
                    range.end,
                    intent.content.len()
                ),
                None => println!(
                    "{} whole-file ({} lines)",
                    intent.file_path,
                    intent.content.len()
                ),
            }
        }
    }
    Ok(())
}

/// Run one exploration tool with key=value arguments
fn run_tool_mode(
    workspace: PathBuf,
    name: &str,
    tool_args: &[String],
    json_output: bool,
) -> Result<()> {
    let mut args = HashMap::new();
    for pair in tool_args {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            Error::InvalidArgs(format!("tool argument '{}' is not key=value", pair))
        })?;
        args.insert(key.to_string(), value.to_string());
    }

    let executor = WorkspaceToolExecutor::new(workspace);
    let call = ToolCall {
        tool: name.to_string(),
        args,
    };
    let result = executor.execute(&call)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.output);
    }
    if !result.success {
        return Err(Error::Execution(format!("tool {} failed", name)));
    }
    Ok(())
}
