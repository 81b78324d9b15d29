/*!
 * Document scanner for workflow definition files.
 *
 * Walks a workflow document and enumerates every human-readable string that
 * should be translated, together with the path needed to write a translation
 * back to the same place.
 */

use log::debug;
use serde_json::{Map, Value};

use super::model::{ExtractedText, ScanResult, TextContext, WorkflowMetadata};
use super::path::DocumentPath;
use crate::errors::WorkflowError;

/// Field-name fragments that mark a string as translatable.
///
/// Matching is case-insensitive containment, so `systemMessage` matches
/// through `message` as well as through its own entry.
pub const TRANSLATABLE_FIELDS: &[&str] = &[
    // Basic fields
    "name", "displayName", "description", "placeholder", "notice",
    "hint", "tooltip", "label", "subtitle", "notes",
    // AI prompt fields
    "systemMessage", "userMessage", "promptTemplate", "instructions",
    "prompt", "message", "content", "text", "template",
    // UI messages
    "errorMessage", "successMessage", "warningMessage", "confirmMessage",
    "infoMessage", "helpText", "statusText",
    // Condition and rule descriptions
    "conditionDescription", "ruleDescription", "stepDescription",
    "comment", "annotation", "remarks",
    // Webhook and HTTP
    "responseMessage", "requestDescription", "headerDescription",
    // Data processing
    "fieldDescription", "columnDescription", "valueDescription",
    "mappingDescription", "transformDescription",
    // Workflow specific
    "summary", "reason", "explanation", "note", "memo",
    "title", "subject", "topic", "caption",
];

/// Parameter trees deeper than this are not scanned further
pub const MAX_SCAN_DEPTH: usize = 10;

/// Check whether a field name is translatable
pub fn is_translatable_field(field_name: &str) -> bool {
    let lowered = field_name.to_lowercase();
    TRANSLATABLE_FIELDS
        .iter()
        .any(|field| lowered.contains(&field.to_lowercase()))
}

fn non_blank(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

/// Scanner producing [`ExtractedText`] records in document order
#[derive(Debug, Clone, Copy)]
pub struct WorkflowScanner {
    max_depth: usize,
}

impl Default for WorkflowScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowScanner {
    pub fn new() -> Self {
        Self {
            max_depth: MAX_SCAN_DEPTH,
        }
    }

    /// Scanner with a custom depth bound for parameter trees
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Scan a workflow document.
    ///
    /// Order is: workflow name, then each node (name, notes, parameters),
    /// then settings. Documents that are not JSON objects fail with
    /// [`WorkflowError::Parse`]; a missing `nodes` array just yields zero counts.
    pub fn scan(&self, document: &Value) -> Result<ScanResult, WorkflowError> {
        let workflow = document.as_object().ok_or_else(|| {
            WorkflowError::Parse(format!("expected a JSON object, found {}", json_kind(document)))
        })?;

        let mut extracted_texts = Vec::new();
        let mut metadata = WorkflowMetadata::default();

        if let Some(meta) = workflow.get("meta").and_then(Value::as_object) {
            if let Some(version) = meta.get("version") {
                metadata.version = match version {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
            }
            metadata.instance_id = meta.get("instanceId").and_then(Value::as_str).map(str::to_string);
        }

        if let Some(name) = workflow.get("name").and_then(non_blank) {
            extracted_texts.push(ExtractedText {
                id: "workflow_name".to_string(),
                path: DocumentPath::root().key("name"),
                original: name.to_string(),
                context: TextContext::Workflow,
                node_type: None,
                field_type: "name".to_string(),
            });
        }

        if let Some(nodes) = workflow.get("nodes").and_then(Value::as_array) {
            metadata.node_count = nodes.len();
            for (node_index, node) in nodes.iter().enumerate() {
                if let Some(node) = node.as_object() {
                    self.extract_node_texts(node, node_index, &mut extracted_texts);
                }
            }
        }

        if let Some(connections) = workflow.get("connections").and_then(Value::as_object) {
            metadata.connection_count = connections.len();
        }

        if let Some(settings) = workflow.get("settings").and_then(Value::as_object) {
            extract_settings_texts(settings, &mut extracted_texts);
        }

        debug!(
            "Scanned workflow: {} nodes, {} connections, {} translatable texts",
            metadata.node_count,
            metadata.connection_count,
            extracted_texts.len()
        );

        Ok(ScanResult {
            extracted_texts,
            metadata,
        })
    }

    fn extract_node_texts(&self, node: &Map<String, Value>, node_index: usize, out: &mut Vec<ExtractedText>) {
        let node_path = DocumentPath::root().key("nodes").index(node_index);
        let node_type = node.get("type").and_then(Value::as_str).map(str::to_string);

        for field in ["name", "notes"] {
            if let Some(text) = node.get(field).and_then(non_blank) {
                out.push(ExtractedText {
                    id: format!("node_{}_{}", node_index, field),
                    path: node_path.key(field),
                    original: text.to_string(),
                    context: TextContext::Node,
                    node_type: node_type.clone(),
                    field_type: field.to_string(),
                });
            }
        }

        if let Some(parameters) = node.get("parameters").and_then(Value::as_object) {
            self.extract_parameter_texts(parameters, &node_path.key("parameters"), node_type.as_deref(), 0, out);
        }
    }

    fn extract_parameter_texts(
        &self,
        params: &Map<String, Value>,
        base_path: &DocumentPath,
        node_type: Option<&str>,
        depth: usize,
        out: &mut Vec<ExtractedText>,
    ) {
        if depth > self.max_depth {
            return;
        }

        for (key, value) in params {
            let current_path = base_path.key(key.as_str());
            match value {
                Value::String(_) => {
                    if let Some(text) = non_blank(value) {
                        if is_translatable_field(key) {
                            push_parameter_text(out, current_path, text, key, node_type);
                        }
                    }
                }
                Value::Array(items) => {
                    self.extract_array_texts(items, &current_path, key, node_type, depth + 1, out);
                }
                Value::Object(child) => {
                    self.extract_parameter_texts(child, &current_path, node_type, depth + 1, out);
                }
                _ => {}
            }
        }
    }

    /// Array elements: objects are recursed, strings are judged by the parent key
    fn extract_array_texts(
        &self,
        items: &[Value],
        base_path: &DocumentPath,
        parent_key: &str,
        node_type: Option<&str>,
        depth: usize,
        out: &mut Vec<ExtractedText>,
    ) {
        for (index, item) in items.iter().enumerate() {
            let item_path = base_path.index(index);
            match item {
                Value::Object(child) => {
                    self.extract_parameter_texts(child, &item_path, node_type, depth, out);
                }
                Value::Array(nested) if depth < self.max_depth => {
                    self.extract_array_texts(nested, &item_path, parent_key, node_type, depth + 1, out);
                }
                Value::String(_) => {
                    if let Some(text) = non_blank(item) {
                        if is_translatable_field(parent_key) {
                            push_parameter_text(out, item_path, text, parent_key, node_type);
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

fn push_parameter_text(
    out: &mut Vec<ExtractedText>,
    path: DocumentPath,
    text: &str,
    key: &str,
    node_type: Option<&str>,
) {
    out.push(ExtractedText {
        id: format!("text_{}", out.len()),
        path,
        original: text.to_string(),
        context: TextContext::Parameter,
        node_type: node_type.map(str::to_string),
        field_type: key.to_string(),
    });
}

fn extract_settings_texts(settings: &Map<String, Value>, out: &mut Vec<ExtractedText>) {
    let settings_path = DocumentPath::root().key("settings");

    if let Some(order) = settings.get("executionOrder").and_then(non_blank) {
        out.push(ExtractedText {
            id: "settings_executionOrder".to_string(),
            path: settings_path.key("executionOrder"),
            original: order.to_string(),
            context: TextContext::Settings,
            node_type: None,
            field_type: "executionOrder".to_string(),
        });
    }

    for (key, value) in settings {
        if key == "executionOrder" {
            continue;
        }
        if let Some(text) = non_blank(value) {
            if is_translatable_field(key) {
                out.push(ExtractedText {
                    id: format!("settings_{}", key),
                    path: settings_path.key(key.as_str()),
                    original: text.to_string(),
                    context: TextContext::Settings,
                    node_type: None,
                    field_type: key.clone(),
                });
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
