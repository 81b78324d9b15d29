use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::app_config::EngineKind;
use crate::errors::TranslationError;
use crate::workflow::{IntegrationResult, TranslatedText};

/// Lifecycle of a translation job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Completed and failed jobs never move again
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    fn can_transition_to(self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Processing) | (Self::Processing, Self::Completed) | (Self::Processing, Self::Failed)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// One translation of one document into one language with one engine
///
/// Jobs are not re-entrant: retrying means creating a new job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationJob {
    pub id: Uuid,
    pub source_language: String,
    pub target_language: String,
    pub engine: EngineKind,
    pub status: JobStatus,

    /// Average quality once completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(default)]
    pub translated_texts: Vec<TranslatedText>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_document: Option<Value>,

    /// Paths that could not be written back into the document
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_paths: Vec<String>,

    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl TranslationJob {
    /// Create a pending job
    pub fn new(source_language: &str, target_language: &str, engine: EngineKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            engine,
            status: JobStatus::Pending,
            quality_score: None,
            error_message: None,
            translated_texts: Vec::new(),
            translated_document: None,
            skipped_paths: Vec::new(),
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    fn transition(&mut self, next: JobStatus) -> Result<(), TranslationError> {
        if !self.status.can_transition_to(next) {
            return Err(TranslationError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        if next.is_terminal() {
            self.completed_at = Some(Utc::now());
        }
        Ok(())
    }

    /// pending -> processing
    pub fn start(&mut self) -> Result<(), TranslationError> {
        self.transition(JobStatus::Processing)
    }

    /// processing -> completed, keeping the results and any skipped paths
    pub fn complete(
        &mut self,
        translated_texts: Vec<TranslatedText>,
        integration: IntegrationResult,
        quality_score: u8,
    ) -> Result<(), TranslationError> {
        self.transition(JobStatus::Completed)?;
        self.skipped_paths = integration.skipped_paths();
        self.translated_texts = translated_texts;
        self.translated_document = Some(integration.document);
        self.quality_score = Some(quality_score);
        Ok(())
    }

    /// processing -> failed, keeping the error message
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), TranslationError> {
        self.transition(JobStatus::Failed)?;
        self.error_message = Some(message.into());
        Ok(())
    }
}
