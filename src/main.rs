//! Muninn CLI entry point
//!
//! Modes: apply (run the edit pipeline on a saved response), extract (list
//! intents without applying), tool (run one exploration tool).

use muninn::cli::{parse_args, run_cli_mode, EXIT_USAGE};
use tracing_subscriber::EnvFilter;

fn main() {
    // Log to stderr so stdout stays clean for mode output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let parsed = match parse_args(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'muninn --help' for usage.");
            std::process::exit(EXIT_USAGE);
        }
    };

    if parsed.show_version {
        println!("muninn v{}", env!("CARGO_PKG_VERSION"));
        return;
    }
    if parsed.show_help {
        print_help();
        return;
    }

    std::process::exit(run_cli_mode(parsed));
}

fn print_help() {
    println!(
        "\
muninn - deterministic code-block edit substrate

USAGE:
    muninn [options] <mode> [mode-args]

MODES:
    apply <response-file>       Apply code blocks from a saved response
    extract <response-file>     List edit intents without applying
    tool <name> [key=value...]  Run one exploration tool

OPTIONS:
    --workspace <path>   Workspace root (default: current directory)
    --json               Output JSON
    --version            Show version
    --help               Show this help

BLOCK HEADERS:
    ```lang:path                 whole-file create or replace
    ```lang:start:end:path       replace lines start..end (1-indexed)
    A comment-only first line (// path or // start:end:path) works too."
    );
}
