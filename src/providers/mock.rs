/*!
 * Deterministic offline translation engine.
 *
 * Used whenever no real engine has credentials, so the whole pipeline can run
 * without network access:
 * - target `ja`: fixed case-insensitive phrase substitutions
 * - any other target: the original text with a bracketed language tag appended
 */

use async_trait::async_trait;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::TranslationEngine;
use crate::errors::ProviderError;
use crate::language_utils::mock_language_label;

/// Phrase substitutions for the Japanese demo target, applied in order
static JAPANESE_PHRASES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        ("Hello World", "こんにちは世界"),
        ("test", "テスト"),
        ("workflow", "ワークフロー"),
        ("Start", "開始"),
        ("Edit Fields", "フィールド編集"),
        ("End", "終了"),
        ("Sample Workflow", "サンプルワークフロー"),
    ]
    .into_iter()
    .map(|(phrase, replacement)| (Regex::new(&format!("(?i){}", regex::escape(phrase))).unwrap(), replacement))
    .collect()
});

/// Mock engine
#[derive(Debug, Clone)]
pub struct MockEngine {
    /// Simulated latency per request
    delay: Duration,
    /// Texts per request
    batch_size: usize,
    /// Number of requests served
    request_count: Arc<AtomicUsize>,
}

impl MockEngine {
    /// Create a mock engine with no simulated latency
    pub fn new() -> Self {
        Self {
            delay: Duration::ZERO,
            batch_size: 100,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Simulate engine latency
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Number of translate calls served so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Translate one text deterministically
    pub fn translate_text(text: &str, target_language: &str) -> String {
        if target_language == "ja" {
            JAPANESE_PHRASES
                .iter()
                .fold(text.to_string(), |acc, (pattern, replacement)| {
                    pattern.replace_all(&acc, *replacement).into_owned()
                })
        } else {
            format!("{} [{}翻訳]", text, mock_language_label(target_language))
        }
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslationEngine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    fn max_batch_size(&self) -> usize {
        self.batch_size
    }

    async fn translate(
        &self,
        texts: &[String],
        target_language: &str,
        _source_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        debug!("Mock translating {} texts to {}", texts.len(), target_language);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(texts.iter().map(|text| Self::translate_text(text, target_language)).collect())
    }
}
