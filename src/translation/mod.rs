/*!
 * Translation of extracted workflow texts.
 *
 * - `service`: orchestration of cache, engine dispatch and scoring
 * - `cache`: process-wide translation cache
 * - `quality`: heuristic quality scoring
 * - `job`: translation job lifecycle
 */

// Re-export main types for easier usage
pub use self::cache::TranslationCache;
pub use self::job::{JobStatus, TranslationJob};
pub use self::quality::QualityScorer;
pub use self::service::{estimated_seconds, BatchTranslation, TranslationService, TranslationSummary};

// Submodules
pub mod cache;
pub mod job;
pub mod quality;
pub mod service;
