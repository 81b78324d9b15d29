use async_trait::async_trait;
use log::{debug, error};
use reqwest::{header, Client};
use serde::Deserialize;
use std::time::Duration;

use super::{ensure_same_length, status_error, TranslationEngine};
use crate::app_config::EngineKind;
use crate::errors::ProviderError;
use crate::language_utils::engine_language_code;

/// DeepL client for interacting with the DeepL API
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL
    endpoint: String,
    /// Texts per request
    batch_size: usize,
}

/// DeepL response
#[derive(Debug, Deserialize)]
pub struct DeepLResponse {
    pub translations: Vec<DeepLTranslation>,
}

/// One translated text
#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    #[serde(default)]
    pub detected_source_language: Option<String>,
    pub text: String,
}

impl DeepL {
    /// Create a new DeepL client
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

    /// Form fields for one request; `text` repeats once per input
    fn form_fields(texts: &[String], target_language: &str, source_language: &str) -> Vec<(&'static str, String)> {
        let mut fields: Vec<(&'static str, String)> = texts.iter().map(|t| ("text", t.clone())).collect();
        fields.push(("source_lang", engine_language_code(source_language, EngineKind::DeepL)));
        fields.push(("target_lang", engine_language_code(target_language, EngineKind::DeepL)));
        fields
    }
}

#[async_trait]
impl TranslationEngine for DeepL {
    fn name(&self) -> &str {
        "deepl"
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
        debug!("Sending {} texts to DeepL ({} -> {})", texts.len(), source_language, target_language);

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, format!("DeepL-Auth-Key {}", self.api_key))
            .form(&Self::form_fields(texts, target_language, source_language))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepL API error ({}): {}", status, error_text);
            return Err(status_error("DeepL", status, error_text));
        }

        let body = response
            .json::<DeepLResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("DeepL response: {}", e)))?;

        let translations = body.translations.into_iter().map(|t| t.text).collect();
        ensure_same_length(texts.len(), translations)
    }
}
