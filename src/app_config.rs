use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::errors::TranslationError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation engine type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    // @engine: Google Cloud Translation v2
    #[default]
    Google,
    // @engine: DeepL API
    DeepL,
    // @engine: Deterministic offline engine
    Mock,
}

impl EngineKind {
    // @returns: Capitalized engine name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::DeepL => "DeepL",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase engine identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::DeepL => "deepl".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }

    // @returns: Environment variable holding the API key, if the engine needs one
    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            Self::Google => Some("GOOGLE_TRANSLATE_API_KEY"),
            Self::DeepL => Some("DEEPL_API_KEY"),
            Self::Mock => None,
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for EngineKind {
    type Err = TranslationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "deepl" => Ok(Self::DeepL),
            "mock" => Ok(Self::Mock),
            _ => Err(TranslationError::UnsupportedEngine(s.to_string())),
        }
    }
}

/// Engine configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    // @field: Engine type identifier
    #[serde(rename = "type")]
    pub engine_type: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Max texts per request (0 = engine default)
    #[serde(default)]
    pub batch_size: usize,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl EngineConfig {
    // @param engine: Engine enum
    // @returns: Engine config with defaults
    pub fn new(engine: EngineKind) -> Self {
        match engine {
            EngineKind::Google => Self {
                engine_type: "google".to_string(),
                api_key: String::new(),
                endpoint: default_google_endpoint(),
                batch_size: default_google_batch_size(),
                timeout_secs: default_timeout_secs(),
            },
            EngineKind::DeepL => Self {
                engine_type: "deepl".to_string(),
                api_key: String::new(),
                endpoint: default_deepl_endpoint(),
                batch_size: default_deepl_batch_size(),
                timeout_secs: default_timeout_secs(),
            },
            EngineKind::Mock => Self {
                engine_type: "mock".to_string(),
                api_key: String::new(),
                endpoint: String::new(),
                batch_size: default_mock_batch_size(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation engine requested by default
    #[serde(default)]
    pub engine: EngineKind,

    /// Available translation engines
    #[serde(default)]
    pub available_engines: Vec<EngineConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all engines
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Whether translated strings are cached for the lifetime of the process
    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    /// Simulated latency of the mock engine in milliseconds
    #[serde(default)]
    pub mock_delay_ms: u64,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            mock_delay_ms: 0,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "ja".to_string()
}

fn default_google_batch_size() -> usize {
    100
}

fn default_deepl_batch_size() -> usize {
    50
}

fn default_mock_batch_size() -> usize {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_google_endpoint() -> String {
    "https://translation.googleapis.com/language/translate/v2".to_string()
}

fn default_deepl_endpoint() -> String {
    // Free-tier endpoint; paid accounts use api.deepl.com
    "https://api-free.deepl.com/v2/translate".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.source_language)?;
        crate::language_utils::validate_language_code(&self.target_language)?;

        for engine in &self.translation.available_engines {
            let kind: EngineKind = engine.engine_type.parse()?;
            if !engine.endpoint.is_empty() {
                url::Url::parse(&engine.endpoint)
                    .map_err(|e| anyhow!("Invalid endpoint for {}: {}", kind.display_name(), e))?;
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get a specific engine configuration by type
    pub fn get_engine_config(&self, engine: EngineKind) -> Option<&EngineConfig> {
        let engine_str = engine.to_lowercase_string();
        self.available_engines.iter().find(|e| e.engine_type == engine_str)
    }

    /// API key for an engine, falling back to its environment variable
    pub fn get_api_key(&self, engine: EngineKind) -> String {
        if let Some(engine_config) = self.get_engine_config(engine) {
            if !engine_config.api_key.is_empty() {
                return engine_config.api_key.clone();
            }
        }

        engine
            .api_key_env_var()
            .and_then(|var| std::env::var(var).ok())
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_default()
    }

    /// Whether an engine has the credentials it needs
    pub fn is_configured(&self, engine: EngineKind) -> bool {
        match engine {
            EngineKind::Mock => true,
            _ => !self.get_api_key(engine).is_empty(),
        }
    }

    /// Get the endpoint for an engine
    pub fn get_endpoint(&self, engine: EngineKind) -> String {
        if let Some(engine_config) = self.get_engine_config(engine) {
            if !engine_config.endpoint.is_empty() {
                return engine_config.endpoint.clone();
            }
        }

        match engine {
            EngineKind::Google => default_google_endpoint(),
            EngineKind::DeepL => default_deepl_endpoint(),
            EngineKind::Mock => String::new(),
        }
    }

    /// Get the batch size for an engine
    pub fn get_batch_size(&self, engine: EngineKind) -> usize {
        if let Some(engine_config) = self.get_engine_config(engine) {
            if engine_config.batch_size > 0 {
                return engine_config.batch_size;
            }
        }

        match engine {
            EngineKind::Google => default_google_batch_size(),
            EngineKind::DeepL => default_deepl_batch_size(),
            EngineKind::Mock => default_mock_batch_size(),
        }
    }

    /// Get the request timeout for an engine
    pub fn get_timeout_secs(&self, engine: EngineKind) -> u64 {
        self.get_engine_config(engine)
            .map(|e| e.timeout_secs)
            .filter(|&t| t > 0)
            .unwrap_or_else(default_timeout_secs)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::default(),
            available_engines: vec![
                EngineConfig::new(EngineKind::Google),
                EngineConfig::new(EngineKind::DeepL),
                EngineConfig::new(EngineKind::Mock),
            ],
            common: TranslationCommonConfig::default(),
        }
    }
}
