/*!
 * Mock engine implementations for testing
 *
 * These engines implement the TranslationEngine trait without any network
 * access so tests can observe exactly what the orchestrator sends.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use flowlingo::errors::ProviderError;
use flowlingo::providers::TranslationEngine;

/// Tracks the requests an engine received
#[derive(Debug, Default)]
pub struct CallTracker {
    /// Number of translate calls
    pub call_count: usize,
    /// Every batch, in the order received
    pub batches: Vec<Vec<String>>,
}

/// Engine that prefixes each text with the target language
#[derive(Debug, Clone)]
pub struct CountingEngine {
    tracker: Arc<Mutex<CallTracker>>,
    batch_size: usize,
}

impl CountingEngine {
    pub fn new(batch_size: usize) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(CallTracker::default())),
            batch_size,
        }
    }

    pub fn call_count(&self) -> usize {
        self.tracker.lock().call_count
    }

    /// Every text sent so far, flattened
    pub fn texts_sent(&self) -> Vec<String> {
        self.tracker.lock().batches.iter().flatten().cloned().collect()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.tracker.lock().batches.iter().map(Vec::len).collect()
    }
}

#[async_trait]
impl TranslationEngine for CountingEngine {
    fn name(&self) -> &str {
        "counting"
    }

    fn max_batch_size(&self) -> usize {
        self.batch_size
    }

    async fn translate(&self, texts: &[String], target_language: &str, _source_language: &str) -> Result<Vec<String>, ProviderError> {
        let mut tracker = self.tracker.lock();
        tracker.call_count += 1;
        tracker.batches.push(texts.to_vec());
        Ok(texts.iter().map(|t| format!("{}:{}", target_language, t)).collect())
    }
}

/// Engine that fails every request
#[derive(Debug, Default)]
pub struct FailingEngine;

#[async_trait]
impl TranslationEngine for FailingEngine {
    fn name(&self) -> &str {
        "failing"
    }

    fn max_batch_size(&self) -> usize {
        10
    }

    async fn translate(&self, _texts: &[String], _target_language: &str, _source_language: &str) -> Result<Vec<String>, ProviderError> {
        Err(ProviderError::ConnectionError("engine unreachable".to_string()))
    }
}

/// Engine that drops the last translation of every batch
#[derive(Debug, Default)]
pub struct ShortEngine;

#[async_trait]
impl TranslationEngine for ShortEngine {
    fn name(&self) -> &str {
        "short"
    }

    fn max_batch_size(&self) -> usize {
        10
    }

    async fn translate(&self, texts: &[String], _target_language: &str, _source_language: &str) -> Result<Vec<String>, ProviderError> {
        Ok(texts.iter().skip(1).cloned().collect())
    }
}
