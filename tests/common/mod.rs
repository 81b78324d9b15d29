/*!
 * Common test utilities for the flowlingo test suite
 */

use anyhow::Result;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Re-export the mock engines module
pub mod mock_engines;

/// Route library logs to the test harness; `RUST_LOG=debug` shows batch dispatch
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Writes the sample workflow into the specified directory
pub fn create_test_workflow(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, &serde_json::to_string_pretty(&sample_workflow())?)
}

/// The smallest workflow with one node
pub fn demo_workflow() -> Value {
    json!({
        "name": "Demo",
        "nodes": [
            {"name": "Start", "type": "n8n-nodes-base.start", "parameters": {}}
        ]
    })
}

/// A realistic workflow touching every extraction rule
pub fn sample_workflow() -> Value {
    json!({
        "name": "Sample Workflow",
        "nodes": [
            {
                "id": "a1",
                "name": "Start",
                "type": "n8n-nodes-base.manualTrigger",
                "position": [100, 200],
                "parameters": {}
            },
            {
                "id": "b2",
                "name": "Edit Fields",
                "type": "n8n-nodes-base.set",
                "notes": "Prepare the greeting",
                "position": [300, 200],
                "parameters": {
                    "message": "Hello World",
                    "options": [
                        {"label": "First option", "value": "one"},
                        {"label": "Second option", "value": "two"}
                    ],
                    "placeholders": ["Type here", "Or here"],
                    "values": {"string": [{"name": "greeting", "value": "Hi {{ $json.name }}"}]}
                }
            },
            {
                "id": "c3",
                "name": "Agent",
                "type": "@n8n/n8n-nodes-langchain.agent",
                "position": [500, 200],
                "parameters": {
                    "options": {"systemMessage": "You are a helpful workflow assistant"},
                    "text": "   "
                }
            },
            {
                "id": "d4",
                "name": "End",
                "type": "n8n-nodes-base.noOp",
                "position": [700, 200],
                "parameters": {}
            }
        ],
        "connections": {
            "Start": {"main": [[{"node": "Edit Fields", "type": "main", "index": 0}]]},
            "Edit Fields": {"main": [[{"node": "Agent", "type": "main", "index": 0}]]},
            "Agent": {"main": [[{"node": "End", "type": "main", "index": 0}]]}
        },
        "settings": {"executionOrder": "v1"},
        "versionId": "0f1e2d3c",
        "meta": {"instanceId": "abc123"}
    })
}

/// Strip the translation marker fields, leaving any other `meta` content
pub fn without_marker(document: &Value) -> Value {
    let mut document = document.clone();
    if let Some(meta) = document.get_mut("meta").and_then(Value::as_object_mut) {
        meta.remove("translated");
        meta.remove("translationDate");
        meta.remove("translationPlatform");
    }
    if document.get("meta").and_then(Value::as_object).is_some_and(|m| m.is_empty()) {
        if let Some(fields) = document.as_object_mut() {
            fields.remove("meta");
        }
    }
    document
}
