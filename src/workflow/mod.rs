/*!
 * Workflow document handling.
 *
 * - `path`: reversible addresses into a document
 * - `model`: extracted and translated text records
 * - `scanner`: finds translatable strings
 * - `integrator`: writes translations back into a document copy
 */

pub mod integrator;
pub mod model;
pub mod path;
pub mod scanner;

pub use self::integrator::{IntegrationResult, Reintegrable, TranslationMarker, WorkflowIntegrator};
pub use self::model::{ExtractedText, ScanReport, ScanResult, TextContext, TranslatedText, WorkflowMetadata};
pub use self::path::{DocumentPath, PathSegment};
pub use self::scanner::{is_translatable_field, WorkflowScanner};
