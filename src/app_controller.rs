use anyhow::{Result, anyhow};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::{AppError, TranslationError, WorkflowError};
use crate::file_utils::FileManager;
use crate::language_utils::output_file_prefix;
use crate::translation::{estimated_seconds, TranslationJob, TranslationService};
use crate::workflow::{IntegrationResult, ScanResult, TranslatedText, WorkflowIntegrator, WorkflowScanner};

// @module: Application controller for workflow localization

/// Translated records, the integration result and the average quality
type Outcome = (Vec<TranslatedText>, IntegrationResult, u8);

/// Outcome counts of a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for workflow translation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Translation orchestrator
    service: TranslationService,

    // @field: Text extraction
    scanner: WorkflowScanner,

    // @field: Write-back into document copies
    integrator: WorkflowIntegrator,

    // @field: Also write the translated text list next to each output
    export_texts: bool,
}

impl Controller {
    /// Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::new(&config.translation);
        Self::with_service(config, service)
    }

    /// Create a controller around an existing translation service
    pub fn with_service(config: Config, service: TranslationService) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            service,
            scanner: WorkflowScanner::new(),
            integrator: WorkflowIntegrator::new(),
            export_texts: false,
        })
    }

    /// Write `{output}.texts.json` with the translated records after each run
    pub fn with_text_export(mut self, enabled: bool) -> Self {
        self.export_texts = enabled;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translation orchestrator used by this controller
    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Scan a workflow document
    pub fn scan(&self, document: &Value) -> Result<ScanResult, WorkflowError> {
        self.scanner.scan(document)
    }

    /// Translate a document in one job: scan, translate, integrate
    ///
    /// Pipeline failures end the job as failed with the error message; the
    /// returned error is only for an impossible job transition. Paths that
    /// could not be written back are recorded on the completed job.
    pub async fn translate_document(&self, document: &Value) -> Result<TranslationJob, TranslationError> {
        self.translate_document_with_progress(document, |_, _| {}).await
    }

    /// Same as `translate_document`, reporting `(done, total)` engine batches
    pub async fn translate_document_with_progress<F>(
        &self,
        document: &Value,
        progress: F,
    ) -> Result<TranslationJob, TranslationError>
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        let mut job = self.new_job()?;
        let outcome = self.execute(document, progress).await;
        Self::finish_job(&mut job, outcome)?;
        Ok(job)
    }

    fn new_job(&self) -> Result<TranslationJob, TranslationError> {
        let mut job = TranslationJob::new(
            &self.config.source_language,
            &self.config.target_language,
            self.config.translation.engine,
        );
        job.start()?;
        debug!("Job {} started", job.id);
        Ok(job)
    }

    fn finish_job(job: &mut TranslationJob, outcome: Result<Outcome, AppError>) -> Result<(), TranslationError> {
        match outcome {
            Ok((texts, integration, quality)) => {
                job.complete(texts, integration, quality)?;
                if job.skipped_paths.is_empty() {
                    info!("Job {} completed (average quality {})", job.id, quality);
                } else {
                    warn!(
                        "Job {} completed with {} skipped paths (average quality {})",
                        job.id,
                        job.skipped_paths.len(),
                        quality
                    );
                }
            }
            Err(e) => {
                error!("Job {} failed: {}", job.id, e);
                job.fail(e.to_string())?;
            }
        }
        Ok(())
    }

    async fn execute<F>(&self, document: &Value, progress: F) -> Result<Outcome, AppError>
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        let scan = self.scanner.scan(document)?;
        info!(
            "Found {} translatable texts in {} nodes (estimated {}s)",
            scan.extracted_texts.len(),
            scan.metadata.node_count,
            estimated_seconds(scan.extracted_texts.len())
        );

        let batch = self
            .service
            .translate_batch_with_progress(
                &scan.extracted_texts,
                &self.config.target_language,
                self.config.translation.engine,
                &self.config.source_language,
                progress,
            )
            .await?;

        let integration = self.integrator.integrate(document, &batch.translated_texts)?;

        Ok((batch.translated_texts, integration, batch.summary.average_quality))
    }

    /// Apply a user-edited translation list to a document as one job
    ///
    /// Scores are recomputed first and the new average becomes the job's
    /// quality. Items whose path cannot be written end up in `skipped_paths`.
    pub fn integrate_edited(
        &self,
        document: &Value,
        mut texts: Vec<TranslatedText>,
    ) -> Result<TranslationJob, TranslationError> {
        let mut job = self.new_job()?;
        let average = self.service.rescore(&mut texts);
        let outcome = self
            .integrator
            .integrate(document, &texts)
            .map(|integration| (texts, integration, average))
            .map_err(AppError::from);
        Self::finish_job(&mut job, outcome)?;
        Ok(job)
    }

    /// Translate one workflow file into `output_dir`
    ///
    /// Returns the written path, or `None` when an existing translation was kept.
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<Option<PathBuf>> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(&input_file, &output_dir, &multi_progress, force_overwrite)
            .await
    }

    async fn run_with_progress(
        &self,
        input_file: &Path,
        output_dir: &Path,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        FileManager::ensure_dir(output_dir)?;

        let output_path = FileManager::generate_output_path(input_file, output_dir, &self.config.target_language);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, translation already exists (use -f to force overwrite)", input_file);
            return Ok(None);
        }

        let document = FileManager::read_workflow(input_file)?;

        info!(
            "Translating {:?} ({} -> {}) with {}",
            input_file,
            self.config.source_language,
            self.config.target_language,
            self.config.translation.engine.display_name()
        );

        let progress_bar = multi_progress.add(ProgressBar::new(0));
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("=>-"));
        progress_bar.set_message("Translating");

        let pb = progress_bar.clone();
        let job = self
            .translate_document_with_progress(&document, move |done, total| {
                pb.set_length(total as u64);
                pb.set_position(done as u64);
            })
            .await?;
        progress_bar.finish_and_clear();

        let translated = match job.translated_document {
            Some(translated) => translated,
            None => {
                let message = job.error_message.unwrap_or_else(|| "unknown error".to_string());
                return Err(anyhow!("Translation of {:?} failed: {}", input_file, message));
            }
        };

        FileManager::write_json(&output_path, &translated)?;

        if self.export_texts {
            let texts_path = FileManager::generate_texts_path(&output_path);
            FileManager::write_json(&texts_path, &job.translated_texts)?;
            info!("Translated texts written to {}", texts_path.display());
        }

        info!(
            "Success: {} ({} texts, {} skipped, quality {}, {})",
            output_path.display(),
            job.translated_texts.len(),
            job.skipped_paths.len(),
            job.quality_score.unwrap_or_default(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(Some(output_path))
    }

    /// Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Translate every workflow file in a directory, writing next to each input
    ///
    /// Files that already carry the target prefix are outputs of earlier runs
    /// and are not translated again.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let prefix = output_file_prefix(&self.config.target_language);
        let workflow_files: Vec<PathBuf> = FileManager::find_files(&input_dir, "json")?
            .into_iter()
            .filter(|path| {
                !path
                    .file_name()
                    .is_some_and(|name| name.to_string_lossy().starts_with(&prefix))
            })
            .collect();

        if workflow_files.is_empty() {
            return Err(anyhow!("No workflow files found in directory: {:?}", input_dir));
        }

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(workflow_files.len() as u64));
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(style.progress_chars("=>-"));

        let mut summary = FolderSummary::default();

        for workflow_file in &workflow_files {
            let file_name = workflow_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = workflow_file.parent().map(Path::to_path_buf).unwrap_or_else(|| input_dir.clone());

            match self
                .run_with_progress(workflow_file, &output_dir, &multi_progress, force_overwrite)
                .await
            {
                Ok(Some(_)) => summary.processed += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");
        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors",
            summary.processed, summary.skipped, summary.failed
        );

        Ok(summary)
    }
}
