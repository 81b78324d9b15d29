/*!
 * Translation engine implementations.
 *
 * This module contains client implementations for the supported engines:
 * - Google: Google Cloud Translation v2
 * - DeepL: DeepL API
 * - Mock: deterministic offline engine used when no credentials are configured
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation engines
///
/// Engines are interchangeable: given a list of texts they return the
/// translations in the same order and of the same length.
#[async_trait]
pub trait TranslationEngine: Send + Sync + Debug {
    /// Lowercase engine identifier
    fn name(&self) -> &str;

    /// Largest number of texts accepted in one request
    fn max_batch_size(&self) -> usize;

    /// Translate a batch of texts
    ///
    /// # Arguments
    /// * `texts` - Texts to translate, at most `max_batch_size` of them
    /// * `target_language` - Target language code
    /// * `source_language` - Source language code
    ///
    /// # Returns
    /// * `Result<Vec<String>, ProviderError>` - One translation per input text
    async fn translate(
        &self,
        texts: &[String],
        target_language: &str,
        source_language: &str,
    ) -> Result<Vec<String>, ProviderError>;
}

/// Check that an engine answered with one translation per text
pub(crate) fn ensure_same_length(expected: usize, translations: Vec<String>) -> Result<Vec<String>, ProviderError> {
    if translations.len() == expected {
        Ok(translations)
    } else {
        Err(ProviderError::ResponseMismatch {
            expected,
            actual: translations.len(),
        })
    }
}

/// Map a non-success HTTP status to a provider error
pub(crate) fn status_error(engine: &str, status: reqwest::StatusCode, body: String) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationError(format!("{} rejected the API key: {}", engine, body)),
        code => ProviderError::ApiError {
            status_code: code,
            message: body,
        },
    }
}

pub mod deepl;
pub mod google;
pub mod mock;
