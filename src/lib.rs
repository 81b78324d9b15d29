/*!
 * # flowlingo - workflow localization
 *
 * A Rust library for translating the human-readable text embedded in n8n
 * workflow documents while leaving everything else untouched.
 *
 * ## Features
 *
 * - Extract translatable strings from workflow JSON with reversible paths
 * - Translate them with Google Translate, DeepL, or an offline mock engine
 * - Cache translations for the lifetime of the process
 * - Score each translation with a cheap, explainable heuristic
 * - Write translations back into a copy of the original document
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `workflow`: document model and the scan/integrate pipeline ends:
 *   - `workflow::path`: reversible document addresses
 *   - `workflow::scanner`: translatable text extraction
 *   - `workflow::integrator`: writing translations back
 * - `translation`: translation orchestration:
 *   - `translation::service`: batching, engine dispatch and scoring
 *   - `translation::cache`: process-wide translation cache
 *   - `translation::quality`: quality heuristic
 *   - `translation::job`: job lifecycle
 * - `providers`: translation engine clients (`google`, `deepl`, `mock`)
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: Supported languages and engine language codes
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;
pub mod workflow;

// Re-export main types for easier usage
pub use app_config::{Config, EngineKind};
pub use errors::{AppError, ProviderError, TranslationError, WorkflowError};
pub use translation::{QualityScorer, TranslationJob, TranslationService};
pub use workflow::{DocumentPath, ExtractedText, TranslatedText, WorkflowIntegrator, WorkflowScanner};
