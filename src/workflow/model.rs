/*!
 * Records produced and consumed by the localization pipeline.
 *
 * These types are JSON-serializable with camelCase field names so that scan
 * and translation reports can be stored or handed to other tools as-is.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use super::path::DocumentPath;
use crate::errors::WorkflowError;

/// Where in the document structure a string was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextContext {
    /// Top-level workflow field
    Workflow,
    /// A node's own name or notes
    Node,
    /// Somewhere inside a node's parameters
    Parameter,
    /// The workflow settings block
    Settings,
}

impl fmt::Display for TextContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Workflow => "workflow",
            Self::Node => "node",
            Self::Parameter => "parameter",
            Self::Settings => "settings",
        };
        write!(f, "{}", name)
    }
}

/// A translatable string located by the scanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedText {
    /// Token unique within one scan pass
    pub id: String,

    /// Address of the string in the source document
    pub path: DocumentPath,

    /// The string as found in the document
    pub original: String,

    /// Coarse location class
    pub context: TextContext,

    /// Type tag of the owning node, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,

    /// Name of the field that held the string
    #[serde(rename = "type")]
    pub field_type: String,
}

/// Informational counts gathered during a scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowMetadata {
    pub node_count: usize,
    pub connection_count: usize,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
}

impl Default for WorkflowMetadata {
    fn default() -> Self {
        Self {
            node_count: 0,
            connection_count: 0,
            version: "unknown".to_string(),
            instance_id: None,
        }
    }
}

/// Output of a successful scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub extracted_texts: Vec<ExtractedText>,
    pub metadata: WorkflowMetadata,
}

/// Scan outcome as exchanged with callers that expect a success flag
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub extracted_texts: Vec<ExtractedText>,
    pub metadata: WorkflowMetadata,
}

impl From<Result<ScanResult, WorkflowError>> for ScanReport {
    fn from(result: Result<ScanResult, WorkflowError>) -> Self {
        match result {
            Ok(scan) => Self {
                success: true,
                error: None,
                extracted_texts: scan.extracted_texts,
                metadata: scan.metadata,
            },
            Err(e) => Self {
                success: false,
                error: Some(e.to_string()),
                extracted_texts: Vec::new(),
                metadata: WorkflowMetadata::default(),
            },
        }
    }
}

/// An extracted string together with its translation outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedText {
    #[serde(flatten)]
    pub source: ExtractedText,

    /// Translation, absent when the item failed
    #[serde(default)]
    pub translated: Option<String>,

    pub target_language: String,

    pub translation_engine: String,

    /// RFC 3339 timestamp of the translation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_at: Option<String>,

    /// Advisory confidence in [0, 100]
    #[serde(default)]
    pub quality_score: u8,
}

impl TranslatedText {
    /// Attach a translation to an extracted record; the score starts at 0
    pub fn from_extracted(
        source: &ExtractedText,
        translated: Option<String>,
        target_language: &str,
        translation_engine: &str,
    ) -> Self {
        Self {
            source: source.clone(),
            translated,
            target_language: target_language.to_string(),
            translation_engine: translation_engine.to_string(),
            translated_at: Some(chrono::Utc::now().to_rfc3339()),
            quality_score: 0,
        }
    }

    pub fn path(&self) -> &DocumentPath {
        &self.source.path
    }

    pub fn original(&self) -> &str {
        &self.source.original
    }

    /// Translation if present and non-empty
    pub fn translation(&self) -> Option<&str> {
        self.translated.as_deref().filter(|t| !t.is_empty())
    }
}
