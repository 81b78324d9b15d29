// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use flowlingo::app_config::{self, Config, EngineKind};
use flowlingo::app_controller::Controller;
use flowlingo::file_utils::FileManager;
use flowlingo::language_utils::{SUPPORTED_LANGUAGES, get_language_name};
use flowlingo::translation::JobStatus;
use flowlingo::workflow::{ScanReport, TranslatedText};

/// CLI Wrapper for EngineKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliEngine {
    Google,
    Deepl,
    Mock,
}

impl From<CliEngine> for EngineKind {
    fn from(cli_engine: CliEngine) -> Self {
        match cli_engine {
            CliEngine::Google => EngineKind::Google,
            CliEngine::Deepl => EngineKind::DeepL,
            CliEngine::Mock => EngineKind::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the translatable texts of a workflow as JSON
    Scan {
        /// Workflow JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Translate a workflow file, or every workflow in a directory
    Translate(TranslateArgs),

    /// Apply an edited translation list to a workflow
    Integrate {
        /// Workflow JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON list of translated texts
        #[arg(value_name = "TRANSLATIONS")]
        translations: PathBuf,

        /// Output file (defaults to the prefixed name next to FILE)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the languages offered for translation
    Languages,

    /// Generate shell completions for flowlingo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Workflow file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation engine to use
    #[arg(short, long, value_enum)]
    engine: Option<CliEngine>,

    /// Source language code (e.g., 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'ja', 'zh', 'ko')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Output directory for a single file (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write the translated text list (`*.texts.json`) for editing and `integrate`
    #[arg(short = 'x', long)]
    export_texts: bool,
}

/// flowlingo - workflow localization
///
/// Extracts the human-readable text from n8n workflow files, translates it and
/// writes it back without touching anything else.
#[derive(Parser, Debug)]
#[command(name = "flowlingo")]
#[command(version)]
#[command(about = "Translate the text inside n8n workflow files")]
#[command(long_about = "flowlingo extracts translatable text from n8n workflows, translates it and writes it back.

EXAMPLES:
    flowlingo scan flow.json                          # Show translatable texts
    flowlingo translate flow.json                     # Translate using default config
    flowlingo translate -t ko -e deepl flow.json      # Korean via DeepL
    flowlingo translate -f /workflows/                # Whole directory, overwrite outputs
    flowlingo integrate flow.json edited.json         # Apply hand-edited translations
    flowlingo completions bash > flowlingo.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. API keys may also come from the
    GOOGLE_TRANSLATE_API_KEY and DEEPL_API_KEY environment variables; without
    any key the offline mock engine is used.

SUPPORTED ENGINES:
    google - Google Cloud Translation (requires API key)
    deepl  - DeepL API (requires API key)
    mock   - Offline demonstration engine")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());
            let _ = writeln!(std::io::stderr(), "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "flowlingo", &mut std::io::stdout());
            Ok(())
        }
        Commands::Languages => {
            for language in SUPPORTED_LANGUAGES {
                println!("{:<4} {:<10} {}", language.code, language.name, language.native_name);
            }
            Ok(())
        }
        Commands::Scan { file } => run_scan(&file, &cli.config_path, cli.log_level),
        Commands::Translate(args) => run_translate(args, &cli.config_path, cli.log_level).await,
        Commands::Integrate {
            file,
            translations,
            output,
        } => run_integrate(&file, &translations, output, &cli.config_path, cli.log_level),
    }
}

/// Load the configuration file, creating a default one when missing
fn load_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config: Config = if Path::new(config_path).exists() {
        let file = File::open(config_path).context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json =
            serde_json::to_string_pretty(&config).context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    match log_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}

fn run_scan(file: &Path, config_path: &str, log_level: Option<CliLogLevel>) -> Result<()> {
    let config = load_config(config_path, log_level)?;
    let controller = Controller::with_config(config)?;

    let document = FileManager::read_workflow(file)?;
    let report = ScanReport::from(controller.scan(&document));

    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.success {
        Ok(())
    } else {
        Err(anyhow!(report.error.unwrap_or_default()))
    }
}

async fn run_translate(options: TranslateArgs, config_path: &str, log_level: Option<CliLogLevel>) -> Result<()> {
    let mut config = load_config(config_path, log_level)?;

    // Override config with CLI options if provided
    if let Some(engine) = options.engine {
        config.translation.engine = engine.into();
    }
    if let Some(source_lang) = options.source_language {
        config.source_language = source_lang;
    }
    if let Some(target_lang) = options.target_language {
        config.target_language = target_lang;
    }

    config.validate().context("Configuration validation failed")?;
    info!(
        "Translating from {} to {}",
        get_language_name(&config.source_language)?,
        get_language_name(&config.target_language)?
    );

    let controller = Controller::with_config(config)?.with_text_export(options.export_texts);

    if options.input_path.is_file() {
        let output_dir = match options.output_dir {
            Some(dir) => dir,
            None => options.input_path.parent().unwrap_or(Path::new(".")).to_path_buf(),
        };
        controller.run(options.input_path, output_dir, options.force_overwrite).await?;
    } else if options.input_path.is_dir() {
        if options.output_dir.is_some() {
            warn!("--output-dir is ignored for directories; outputs are written next to each workflow");
        }
        controller.run_folder(options.input_path, options.force_overwrite).await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

fn run_integrate(
    file: &Path,
    translations: &Path,
    output: Option<PathBuf>,
    config_path: &str,
    log_level: Option<CliLogLevel>,
) -> Result<()> {
    let config = load_config(config_path, log_level)?;
    let controller = Controller::with_config(config)?;

    let document = FileManager::read_workflow(file)?;
    let texts: Vec<TranslatedText> = FileManager::read_json(translations)?;
    let target_language = texts.first().map(|t| t.target_language.clone());

    let job = controller.integrate_edited(&document, texts)?;
    let translated = match (&job.status, &job.translated_document) {
        (JobStatus::Completed, Some(document)) => document,
        _ => {
            return Err(anyhow!(
                "Integration failed: {}",
                job.error_message.as_deref().unwrap_or("no translated document produced")
            ));
        }
    };

    let output_path = output.unwrap_or_else(|| {
        let target_language = target_language
            .as_deref()
            .unwrap_or(controller.config().target_language.as_str());
        FileManager::generate_output_path(file, file.parent().unwrap_or(Path::new(".")), target_language)
    });

    FileManager::write_json(&output_path, translated)?;

    info!(
        "Success: {} ({} texts, {} skipped)",
        output_path.display(),
        job.translated_texts.len(),
        job.skipped_paths.len()
    );
    for path in &job.skipped_paths {
        warn!("Skipped: {}", path);
    }
    println!("Average quality: {}", job.quality_score.unwrap_or_default());

    Ok(())
}
