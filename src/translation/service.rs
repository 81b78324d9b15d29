/*!
 * Translation orchestration.
 *
 * The service takes extracted workflow texts, consults the translation cache,
 * sends whatever is left to an engine in engine-sized batches (one request at
 * a time, in order) and attaches quality scores to the results.
 */

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::cache::TranslationCache;
use super::quality::QualityScorer;
use crate::app_config::{EngineKind, TranslationConfig};
use crate::errors::{ProviderError, TranslationError};
use crate::providers::deepl::DeepL;
use crate::providers::google::Google;
use crate::providers::mock::MockEngine;
use crate::providers::TranslationEngine;
use crate::workflow::{ExtractedText, TranslatedText};

/// Texts the estimate assumes are translated per second
const TEXTS_PER_SECOND: usize = 10;

/// Summary of one batch translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationSummary {
    pub total_texts: usize,
    /// Engine the caller asked for
    pub engine: String,
    pub target_language: String,
    pub average_quality: u8,
    pub cache_hits: usize,
    pub batches_dispatched: usize,
}

/// Translated records plus their summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTranslation {
    pub translated_texts: Vec<TranslatedText>,
    pub summary: TranslationSummary,
}

/// Translations for one call plus what it cost
#[derive(Debug, Default)]
struct Dispatch {
    translations: Vec<String>,
    cache_hits: usize,
    batches_dispatched: usize,
}

/// Translation service coordinating cache, engines and scoring
#[derive(Debug, Clone)]
pub struct TranslationService {
    /// Google engine, present when it has credentials
    google: Option<Arc<dyn TranslationEngine>>,

    /// DeepL engine, present when it has credentials
    deepl: Option<Arc<dyn TranslationEngine>>,

    /// Offline fallback
    mock: Arc<dyn TranslationEngine>,

    /// Translation cache, process-wide unless replaced
    cache: TranslationCache,
}

impl TranslationService {
    /// Create a service from configuration
    ///
    /// Real engines are only registered when an API key is available,
    /// either in the config or in the environment.
    pub fn new(config: &TranslationConfig) -> Self {
        let google = config.is_configured(EngineKind::Google).then(|| {
            Arc::new(Google::new(
                config.get_api_key(EngineKind::Google),
                config.get_endpoint(EngineKind::Google),
                config.get_batch_size(EngineKind::Google),
                config.get_timeout_secs(EngineKind::Google),
            )) as Arc<dyn TranslationEngine>
        });

        let deepl = config.is_configured(EngineKind::DeepL).then(|| {
            Arc::new(DeepL::new(
                config.get_api_key(EngineKind::DeepL),
                config.get_endpoint(EngineKind::DeepL),
                config.get_batch_size(EngineKind::DeepL),
                config.get_timeout_secs(EngineKind::DeepL),
            )) as Arc<dyn TranslationEngine>
        });

        let mock = MockEngine::new()
            .with_delay(Duration::from_millis(config.common.mock_delay_ms))
            .with_batch_size(config.get_batch_size(EngineKind::Mock));

        let cache = if config.common.cache_enabled {
            TranslationCache::global()
        } else {
            TranslationCache::new(false)
        };

        Self {
            google,
            deepl,
            mock: Arc::new(mock),
            cache,
        }
    }

    /// Service with only the mock engine and a private cache
    pub fn offline() -> Self {
        Self {
            google: None,
            deepl: None,
            mock: Arc::new(MockEngine::new()),
            cache: TranslationCache::new(true),
        }
    }

    /// Register or replace the engine serving `kind`
    pub fn with_engine(mut self, kind: EngineKind, engine: Arc<dyn TranslationEngine>) -> Self {
        match kind {
            EngineKind::Google => self.google = Some(engine),
            EngineKind::DeepL => self.deepl = Some(engine),
            EngineKind::Mock => self.mock = engine,
        }
        self
    }

    /// Use a different cache
    pub fn with_cache(mut self, cache: TranslationCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Pick the engine that will serve a request for `requested`
    ///
    /// DeepL is used only when asked for and available. Otherwise Google
    /// serves every real-engine request it can, and the mock covers the rest.
    pub fn resolve_engine(&self, requested: EngineKind) -> Arc<dyn TranslationEngine> {
        if requested == EngineKind::Mock {
            return self.mock.clone();
        }

        match (&self.google, &self.deepl) {
            (None, None) => {
                warn!("No translation API key configured, using the mock engine");
                self.mock.clone()
            }
            (_, Some(deepl)) if requested == EngineKind::DeepL => deepl.clone(),
            (Some(google), _) => {
                if requested != EngineKind::Google {
                    warn!("{} is not available, using Google Translate", requested.display_name());
                }
                google.clone()
            }
            (None, Some(_)) => {
                warn!("{} is not available, using the mock engine", requested.display_name());
                self.mock.clone()
            }
        }
    }

    /// Translate plain texts
    ///
    /// Blank texts are dropped; the result holds one translation per
    /// remaining text, in input order.
    pub async fn translate(
        &self,
        texts: &[String],
        target_language: &str,
        engine: EngineKind,
        source_language: &str,
    ) -> Result<Vec<String>, TranslationError> {
        let valid: Vec<&str> = texts.iter().map(String::as_str).filter(|t| !t.trim().is_empty()).collect();
        let dispatch = self
            .dispatch(&valid, target_language, engine, source_language, &|_, _| {})
            .await?;
        Ok(dispatch.translations)
    }

    /// Translate extracted workflow texts and score each result
    pub async fn translate_batch(
        &self,
        extracted: &[ExtractedText],
        target_language: &str,
        engine: EngineKind,
        source_language: &str,
    ) -> Result<BatchTranslation, TranslationError> {
        self.translate_batch_with_progress(extracted, target_language, engine, source_language, |_, _| {})
            .await
    }

    /// Same as `translate_batch`, reporting `(done, total)` after each engine batch
    pub async fn translate_batch_with_progress<F>(
        &self,
        extracted: &[ExtractedText],
        target_language: &str,
        engine: EngineKind,
        source_language: &str,
        progress: F,
    ) -> Result<BatchTranslation, TranslationError>
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        let items: Vec<&ExtractedText> = extracted.iter().filter(|t| !t.original.trim().is_empty()).collect();
        if items.len() < extracted.len() {
            debug!("Skipping {} blank texts", extracted.len() - items.len());
        }

        let originals: Vec<&str> = items.iter().map(|t| t.original.as_str()).collect();
        let dispatch = self
            .dispatch(&originals, target_language, engine, source_language, &progress)
            .await?;

        let engine_name = engine.to_lowercase_string();
        let mut translated_texts: Vec<TranslatedText> = items
            .into_iter()
            .zip(dispatch.translations)
            .map(|(item, translation)| {
                TranslatedText::from_extracted(item, Some(translation), target_language, &engine_name)
            })
            .collect();

        let average_quality = QualityScorer::rescore(&mut translated_texts);

        info!(
            "Translated {} texts to {} (average quality {}, {} from cache)",
            translated_texts.len(),
            target_language,
            average_quality,
            dispatch.cache_hits
        );

        Ok(BatchTranslation {
            summary: TranslationSummary {
                total_texts: translated_texts.len(),
                engine: engine_name,
                target_language: target_language.to_string(),
                average_quality,
                cache_hits: dispatch.cache_hits,
                batches_dispatched: dispatch.batches_dispatched,
            },
            translated_texts,
        })
    }

    /// Recompute scores of an edited translation list; returns the new average
    pub fn rescore(&self, texts: &mut [TranslatedText]) -> u8 {
        QualityScorer::rescore(texts)
    }

    async fn dispatch(
        &self,
        texts: &[&str],
        target_language: &str,
        engine: EngineKind,
        source_language: &str,
        progress: &(dyn Fn(usize, usize) + Send + Sync),
    ) -> Result<Dispatch, TranslationError> {
        let mut results: Vec<Option<String>> = vec![None; texts.len()];
        let mut cache_hits = 0;

        // Unique uncached texts, and which result slots each one fills
        let mut pending: Vec<String> = Vec::new();
        let mut pending_slots: Vec<Vec<usize>> = Vec::new();
        let mut pending_index: HashMap<&str, usize> = HashMap::new();

        for (slot, &text) in texts.iter().enumerate() {
            if let Some(cached) = self.cache.get(engine, target_language, text) {
                results[slot] = Some(cached);
                cache_hits += 1;
                continue;
            }

            let index = *pending_index.entry(text).or_insert_with(|| {
                pending.push(text.to_string());
                pending_slots.push(Vec::new());
                pending.len() - 1
            });
            pending_slots[index].push(slot);
        }

        let mut batches_dispatched = 0;
        if !pending.is_empty() {
            let backend = self.resolve_engine(engine);
            let batch_size = backend.max_batch_size().max(1);
            let total_batches = pending.len().div_ceil(batch_size);

            for (batch_index, batch) in pending.chunks(batch_size).enumerate() {
                debug!(
                    "Dispatching batch {}/{} ({} texts) to {}",
                    batch_index + 1,
                    total_batches,
                    batch.len(),
                    backend.name()
                );

                let translations = backend
                    .translate(batch, target_language, source_language)
                    .await
                    .map_err(|e| {
                        error!("Batch {}/{} failed on {}: {}", batch_index + 1, total_batches, backend.name(), e);
                        e
                    })?;

                if translations.len() != batch.len() {
                    return Err(ProviderError::ResponseMismatch {
                        expected: batch.len(),
                        actual: translations.len(),
                    }
                    .into());
                }

                let offset = batch_index * batch_size;
                for (i, (text, translation)) in batch.iter().zip(translations).enumerate() {
                    self.cache.store(engine, target_language, text, &translation);
                    for &slot in &pending_slots[offset + i] {
                        results[slot] = Some(translation.clone());
                    }
                }

                batches_dispatched += 1;
                progress(batches_dispatched, total_batches);
            }
        }

        Ok(Dispatch {
            translations: results.into_iter().flatten().collect(),
            cache_hits,
            batches_dispatched,
        })
    }
}

/// Rough time hint in seconds for translating `text_count` texts
pub fn estimated_seconds(text_count: usize) -> u64 {
    text_count.div_ceil(TEXTS_PER_SECOND) as u64
}
