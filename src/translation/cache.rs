/*!
 * Translation caching functionality.
 *
 * Translated strings are remembered for the lifetime of the process so the
 * same text is never sent to an engine twice for the same target language.
 * Entries are never evicted.
 */

use log::debug;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::app_config::EngineKind;

/// Process-wide cache shared by every service that does not bring its own
static GLOBAL_CACHE: Lazy<TranslationCache> = Lazy::new(|| TranslationCache::new(true));

/// Cache key combining requested engine, target language and source text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    /// Engine the caller asked for
    engine: EngineKind,

    /// Target language code
    target_language: String,

    /// Source text
    source_text: String,
}

impl CacheKey {
    fn new(engine: EngineKind, target_language: &str, source_text: &str) -> Self {
        Self {
            engine,
            target_language: target_language.to_string(),
            source_text: source_text.to_string(),
        }
    }
}

/// Translation cache for storing and retrieving translations
///
/// Clones share storage and counters.
pub struct TranslationCache {
    /// Internal cache storage
    cache: Arc<RwLock<HashMap<CacheKey, String>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,

    /// Whether caching is enabled
    enabled: bool,
}

impl TranslationCache {
    /// Create a new, private translation cache
    pub fn new(enabled: bool) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
            enabled,
        }
    }

    /// Handle on the process-wide cache
    pub fn global() -> Self {
        GLOBAL_CACHE.clone()
    }

    /// Get a translation from the cache
    pub fn get(&self, engine: EngineKind, target_language: &str, source_text: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let key = CacheKey::new(engine, target_language, source_text);
        let found = self.cache.read().get(&key).cloned();

        match found {
            Some(translation) => {
                *self.hits.write() += 1;
                debug!("Cache hit for '{}' ({}, {})", truncate_text(source_text, 30), engine, target_language);
                Some(translation)
            }
            None => {
                *self.misses.write() += 1;
                None
            }
        }
    }

    /// Store a translation in the cache
    pub fn store(&self, engine: EngineKind, target_language: &str, source_text: &str, translation: &str) {
        if !self.enabled {
            return;
        }

        let key = CacheKey::new(engine, target_language, source_text);
        self.cache.write().insert(key, translation.to_string());

        debug!("Cached translation for '{}' ({}, {})", truncate_text(source_text, 30), engine, target_language);
    }

    /// Get cache statistics as (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };

        (hits, misses, hit_rate)
    }

    /// Clear the cache and its counters
    pub fn clear(&self) {
        self.cache.write().clear();
        *self.hits.write() = 0;
        *self.misses.write() = 0;

        debug!("Translation cache cleared");
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Check if the cache is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Clone for TranslationCache {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
            enabled: self.enabled,
        }
    }
}

impl std::fmt::Debug for TranslationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationCache")
            .field("entries", &self.len())
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Truncate text to a maximum number of characters with ellipsis
fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
