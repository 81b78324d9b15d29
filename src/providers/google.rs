use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::{ensure_same_length, status_error, TranslationEngine};
use crate::app_config::EngineKind;
use crate::errors::ProviderError;
use crate::language_utils::engine_language_code;

/// Google Cloud Translation (v2) client
#[derive(Debug)]
pub struct Google {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL
    endpoint: String,
    /// Texts per request
    batch_size: usize,
}

/// Google translate request body
#[derive(Debug, Serialize)]
pub struct GoogleRequest<'a> {
    /// Texts to translate
    q: &'a [String],
    /// Source language code
    source: String,
    /// Target language code
    target: String,
    /// Treat input as plain text, not HTML
    format: &'static str,
}

/// Google translate response
#[derive(Debug, Deserialize)]
pub struct GoogleResponse {
    pub data: GoogleResponseData,
}

#[derive(Debug, Deserialize)]
pub struct GoogleResponseData {
    pub translations: Vec<GoogleTranslation>,
}

/// One translated text
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleTranslation {
    pub translated_text: String,
    #[serde(default)]
    pub detected_source_language: Option<String>,
}

impl Google {
    /// Create a new Google client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, batch_size: usize, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            batch_size: batch_size.max(1),
        }
    }

    fn request_url(&self) -> Result<Url, ProviderError> {
        Url::parse_with_params(&self.endpoint, &[("key", self.api_key.as_str())])
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid Google endpoint '{}': {}", self.endpoint, e)))
    }
}

#[async_trait]
impl TranslationEngine for Google {
    fn name(&self) -> &str {
        "google"
    }

    fn max_batch_size(&self) -> usize {
        self.batch_size
    }

    async fn translate(
        &self,
        texts: &[String],
        target_language: &str,
        source_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let request = GoogleRequest {
            q: texts,
            source: engine_language_code(source_language, EngineKind::Google),
            target: engine_language_code(target_language, EngineKind::Google),
            format: "text",
        };

        debug!("Sending {} texts to Google Translate ({} -> {})", texts.len(), request.source, request.target);

        let response = self.client.post(self.request_url()?).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate API error ({}): {}", status, error_text);
            return Err(status_error("Google Translate", status, error_text));
        }

        let body = response
            .json::<GoogleResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Google Translate response: {}", e)))?;

        let translations = body.data.translations.into_iter().map(|t| t.translated_text).collect();
        ensure_same_length(texts.len(), translations)
    }
}
