// Integration tests for the tool cycle orchestrator driving a real
// workspace executor, no mocks

use muninn::{
    CycleAction, ToolCycle, ToolExecutor, WorkspaceToolExecutor,
};
use std::fs;
use tempfile::TempDir;

fn workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("src")).unwrap();
    fs::write(
        temp_dir.path().join("src/main.rs"),
        "fn main() {\n    println!(\"hi\");\n}\n",
    )
    .unwrap();
    temp_dir
}

#[test]
fn test_full_tool_cycle_against_workspace() {
    let temp_dir = workspace();
    let executor = WorkspaceToolExecutor::new(temp_dir.path());
    let mut cycle = ToolCycle::new();

    cycle.user_turn("What does this project contain?");

    // Model asks for the overview: Idle -> AwaitingToolResult
    let action = cycle.assistant_turn("TOOL_CALL:\n  tool: get_codebase_overview\n  args:");
    let call = match action {
        CycleAction::ExecuteTool(call) => call,
        other => panic!("expected ExecuteTool, got {:?}", other),
    };
    assert!(cycle.state().is_awaiting());
    assert!(!cycle.ready_for_edits());

    // External executor runs the tool; folding returns to Idle
    let result = executor.execute(&call).unwrap();
    assert!(result.success);
    cycle.fold_tool_result(&result).unwrap();

    assert!(!cycle.state().is_awaiting());
    assert!(cycle.ready_for_edits());
    // The result text reached context before the next parse cycle
    assert!(cycle.context().render().contains("1 files"));
}

#[test]
fn test_provisional_blocks_dropped_until_result_folds() {
    let temp_dir = workspace();
    let executor = WorkspaceToolExecutor::new(temp_dir.path());
    let mut cycle = ToolCycle::new();

    let action = cycle.assistant_turn(
        "TOOL_CALL:\n  tool: read_file\n  args:\n    path: src/main.rs",
    );
    let call = match action {
        CycleAction::ExecuteTool(call) => call,
        other => panic!("expected ExecuteTool, got {:?}", other),
    };

    // A code block arriving before the result is stale context
    let premature = cycle.assistant_turn("```rust:src/main.rs\nfn main() {}\n```");
    assert_eq!(premature, CycleAction::Discarded);

    let result = executor.execute(&call).unwrap();
    cycle.fold_tool_result(&result).unwrap();

    // Regenerated blocks are accepted once context is fresh
    let regenerated = cycle.assistant_turn("```rust:src/main.rs\nfn main() { run(); }\n```");
    assert_eq!(regenerated, CycleAction::ApplyBlocks);
}

#[test]
fn test_failed_tool_still_completes_cycle() {
    let temp_dir = workspace();
    let executor = WorkspaceToolExecutor::new(temp_dir.path());
    let mut cycle = ToolCycle::new();

    let action = cycle.assistant_turn(
        "TOOL_CALL:\n  tool: read_file\n  args:\n    path: does/not/exist.rs",
    );
    let call = match action {
        CycleAction::ExecuteTool(call) => call,
        other => panic!("expected ExecuteTool, got {:?}", other),
    };

    let result = executor.execute(&call).unwrap();
    assert!(!result.success);

    // Failure text folds back into context like any result
    cycle.fold_tool_result(&result).unwrap();
    assert!(!cycle.state().is_awaiting());
    assert!(cycle.context().render().contains("FAILED"));
}

#[test]
fn test_unknown_tool_is_error_not_panic() {
    let temp_dir = workspace();
    let executor = WorkspaceToolExecutor::new(temp_dir.path());
    let mut cycle = ToolCycle::new();

    let action = cycle.assistant_turn("TOOL_CALL:\n  tool: delete_everything\n  args:");
    let call = match action {
        CycleAction::ExecuteTool(call) => call,
        other => panic!("expected ExecuteTool, got {:?}", other),
    };

    assert!(executor.execute(&call).is_err());
}

#[test]
fn test_search_cycle_feeds_matches_into_context() {
    let temp_dir = workspace();
    let executor = WorkspaceToolExecutor::new(temp_dir.path());
    let mut cycle = ToolCycle::new();

    let action = cycle.assistant_turn(
        "Searching first.\n\nTOOL_CALL:\n  tool: search_codebase\n  args:\n    query: println",
    );
    let call = match action {
        CycleAction::ExecuteTool(call) => call,
        other => panic!("expected ExecuteTool, got {:?}", other),
    };

    let result = executor.execute(&call).unwrap();
    cycle.fold_tool_result(&result).unwrap();

    assert!(cycle.context().render().contains("src/main.rs:2"));
}
