/*!
 * Reintegration of translated strings into a workflow document.
 *
 * The original document is never touched: integration deep-copies it, writes
 * every translation at its recorded path and stamps a translation marker
 * block under `meta`.
 */

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::model::TranslatedText;
use super::path::{DocumentPath, PathSegment};
use crate::errors::WorkflowError;

/// Platform tag written into every translated document
pub const TRANSLATION_PLATFORM: &str = "n8n-workflow-localization";

/// Top-level key holding the translation marker fields
pub const MARKER_KEY: &str = "meta";

/// Most `null` slots a single write may add in front of a new array element
pub const MAX_INDEX_GAP: usize = 1024;

/// Fields stamped under `meta` once a document went through integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationMarker {
    pub translated: bool,
    pub translation_date: String,
    pub translation_platform: String,
}

impl TranslationMarker {
    /// Marker stamped with the current time
    pub fn now() -> Self {
        Self {
            translated: true,
            translation_date: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            translation_platform: TRANSLATION_PLATFORM.to_string(),
        }
    }

    /// Read a marker back from a document, if one is present
    pub fn read(document: &Value) -> Option<Self> {
        let meta = document.get(MARKER_KEY)?.as_object()?;
        Some(Self {
            translated: meta.get("translated")?.as_bool()?,
            translation_date: meta.get("translationDate")?.as_str()?.to_string(),
            translation_platform: meta.get("translationPlatform")?.as_str()?.to_string(),
        })
    }

    fn stamp(&self, document: &mut Map<String, Value>) {
        let meta = document
            .entry(MARKER_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        if !meta.is_object() {
            warn!("Replacing non-object '{}' field with translation marker block", MARKER_KEY);
            *meta = Value::Object(Map::new());
        }
        if let Value::Object(fields) = meta {
            fields.insert("translated".to_string(), Value::Bool(self.translated));
            fields.insert("translationDate".to_string(), Value::String(self.translation_date.clone()));
            fields.insert("translationPlatform".to_string(), Value::String(self.translation_platform.clone()));
        }
    }
}

/// Anything that can be written back: a path plus an optional replacement
pub trait Reintegrable {
    fn target_path(&self) -> &DocumentPath;
    fn replacement(&self) -> Option<&str>;
}

impl Reintegrable for TranslatedText {
    fn target_path(&self) -> &DocumentPath {
        self.path()
    }

    fn replacement(&self) -> Option<&str> {
        self.translation()
    }
}

impl Reintegrable for (DocumentPath, String) {
    fn target_path(&self) -> &DocumentPath {
        &self.0
    }

    fn replacement(&self) -> Option<&str> {
        Some(self.1.as_str()).filter(|s| !s.is_empty())
    }
}

/// Result of writing a list of translations into a document copy
#[derive(Debug, Clone)]
pub struct IntegrationResult {
    /// The new document
    pub document: Value,
    /// Number of values written
    pub applied: usize,
    /// Items with no translation, left at their original value
    pub untranslated: usize,
    /// Items whose path could not be written
    pub skipped: Vec<WorkflowError>,
}

impl IntegrationResult {
    /// Textual paths of the skipped items
    pub fn skipped_paths(&self) -> Vec<String> {
        self.skipped
            .iter()
            .map(|e| match e {
                WorkflowError::PathResolution { path, .. } => path.clone(),
                other => other.to_string(),
            })
            .collect()
    }
}

/// Writes translated strings back into copies of workflow documents
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkflowIntegrator;

impl WorkflowIntegrator {
    pub fn new() -> Self {
        Self
    }

    /// Integrate translations into a deep copy of `original`.
    ///
    /// Items without a translation are left untouched; items whose path runs
    /// into a value of the wrong kind are skipped and reported. The marker
    /// block is always stamped, so `original` must be a JSON object.
    pub fn integrate<T: Reintegrable>(&self, original: &Value, translations: &[T]) -> Result<IntegrationResult, WorkflowError> {
        if !original.is_object() {
            return Err(WorkflowError::Parse("cannot integrate into a non-object document".to_string()));
        }

        let mut document = original.clone();
        let mut applied = 0;
        let mut untranslated = 0;
        let mut skipped = Vec::new();

        for item in translations {
            let Some(replacement) = item.replacement() else {
                untranslated += 1;
                continue;
            };

            match write_at(&mut document, item.target_path(), replacement) {
                Ok(()) => applied += 1,
                Err(e) => {
                    warn!("Failed to integrate translation: {}", e);
                    skipped.push(e);
                }
            }
        }

        if let Value::Object(fields) = &mut document {
            TranslationMarker::now().stamp(fields);
        }

        debug!(
            "Integrated {} translations ({} untranslated, {} skipped)",
            applied,
            untranslated,
            skipped.len()
        );

        Ok(IntegrationResult {
            document,
            applied,
            untranslated,
            skipped,
        })
    }
}

/// Write `value` at `path`, creating missing intermediate containers.
///
/// A fresh container is an array when the following segment is an index and
/// an object otherwise. `null` counts as missing. Writing past the end of an
/// array pads the gap with `null`.
pub fn write_at(document: &mut Value, path: &DocumentPath, value: &str) -> Result<(), WorkflowError> {
    let fail = |reason: String| WorkflowError::PathResolution {
        path: path.to_string(),
        reason,
    };

    let segments = path.segments();
    let Some((last, intermediate)) = segments.split_last() else {
        return Err(fail("path is empty".to_string()));
    };

    let mut current = document;
    for (position, segment) in intermediate.iter().enumerate() {
        let next = &segments[position + 1];
        let slot = child_slot(current, segment).map_err(&fail)?;
        if slot.is_null() {
            *slot = next.empty_container();
        }
        current = slot;
    }

    let slot = child_slot(current, last).map_err(&fail)?;
    *slot = Value::String(value.to_string());
    Ok(())
}

/// Mutable slot for `segment` inside `container`, inserting `null` when absent
fn child_slot<'a>(container: &'a mut Value, segment: &PathSegment) -> Result<&'a mut Value, String> {
    match (container, segment) {
        (Value::Object(map), PathSegment::Key(key)) => Ok(map.entry(key.as_str()).or_insert(Value::Null)),
        (Value::Array(items), PathSegment::Index(index)) => {
            let index = *index;
            if index >= items.len() {
                let out_of_range = || format!("index [{}] out of range for array of length {}", index, items.len());
                if index - items.len() > MAX_INDEX_GAP {
                    return Err(out_of_range());
                }
                let new_len = index.checked_add(1).ok_or_else(out_of_range)?;
                items.resize(new_len, Value::Null);
            }
            Ok(&mut items[index])
        }
        (Value::Object(_), PathSegment::Index(index)) => Err(format!("index [{}] applied to an object", index)),
        (Value::Array(_), PathSegment::Key(key)) => Err(format!("key '{}' applied to an array", key)),
        (other, _) => Err(format!("cannot step into a {} value", scalar_kind(other))),
    }
}

fn scalar_kind(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Null => "null",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
