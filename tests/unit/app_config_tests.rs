/*!
 * Tests for application configuration functionality
 */

use flowlingo::app_config::{Config, EngineConfig, EngineKind, LogLevel, TranslationConfig};
use flowlingo::errors::TranslationError;

use crate::common;

#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "ja");
    assert_eq!(config.translation.engine, EngineKind::Google);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.translation.common.cache_enabled);
    assert_eq!(config.translation.common.mock_delay_ms, 0);
    assert_eq!(config.translation.available_engines.len(), 3);
}

#[test]
fn test_engineConfig_new_shouldCarryEngineDefaults() {
    let google = EngineConfig::new(EngineKind::Google);
    assert_eq!(google.engine_type, "google");
    assert!(google.endpoint.starts_with("https://translation.googleapis.com"));
    assert_eq!(google.batch_size, 100);

    let deepl = EngineConfig::new(EngineKind::DeepL);
    assert_eq!(deepl.engine_type, "deepl");
    assert_eq!(deepl.batch_size, 50);
    assert_eq!(deepl.timeout_secs, 30);
}

#[test]
fn test_engineKind_parse_withUnknownName_shouldBeUnsupported() {
    let err = "bing".parse::<EngineKind>().unwrap_err();
    assert!(matches!(err, TranslationError::UnsupportedEngine(ref name) if name == "bing"));
    assert_eq!(" Mock ".parse::<EngineKind>().unwrap(), EngineKind::Mock);
}

#[test]
fn test_engineKind_serde_shouldUseLowercaseNames() {
    assert_eq!(serde_json::to_string(&EngineKind::DeepL).unwrap(), "\"deepl\"");
    let kind: EngineKind = serde_json::from_str("\"mock\"").unwrap();
    assert_eq!(kind, EngineKind::Mock);
    assert_eq!(EngineKind::Google.to_string(), "google");
}

#[test]
fn test_validate_withInvalidTargetLanguage_shouldFail() {
    let mut config = Config::default();
    config.target_language = "xx".to_string();
    assert!(config.validate().is_err());

    config.target_language = "zh-CN".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withUnknownEngineType_shouldFail() {
    let mut config = Config::default();
    config.translation.available_engines[2].engine_type = "bing".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_getters_withZeroValues_shouldFallBackToDefaults() {
    let mut config = TranslationConfig::default();
    config.available_engines[0].batch_size = 0;
    config.available_engines[0].timeout_secs = 0;
    config.available_engines[0].endpoint = String::new();

    assert_eq!(config.get_batch_size(EngineKind::Google), 100);
    assert_eq!(config.get_timeout_secs(EngineKind::Google), 30);
    assert!(config.get_endpoint(EngineKind::Google).contains("googleapis"));
}

#[test]
fn test_getters_withCustomValues_shouldUseThem() {
    let mut config = TranslationConfig::default();
    config.available_engines[1].batch_size = 7;
    config.available_engines[1].endpoint = "https://api.deepl.com/v2/translate".to_string();

    assert_eq!(config.get_batch_size(EngineKind::DeepL), 7);
    assert_eq!(config.get_endpoint(EngineKind::DeepL), "https://api.deepl.com/v2/translate");
}

#[test]
fn test_mock_shouldAlwaysBeConfigured() {
    let config = TranslationConfig {
        available_engines: Vec::new(),
        ..TranslationConfig::default()
    };
    assert!(config.is_configured(EngineKind::Mock));
    assert!(config.get_engine_config(EngineKind::Mock).is_none());
}

#[test]
fn test_config_fromFile_shouldRoundTrip() {
    let temp_dir = common::create_temp_dir().unwrap();
    let mut config = Config::default();
    config.target_language = "ko".to_string();
    config.translation.engine = EngineKind::DeepL;
    config.log_level = LogLevel::Debug;

    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        &serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();

    let loaded: Config = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(loaded.target_language, "ko");
    assert_eq!(loaded.translation.engine, EngineKind::DeepL);
    assert_eq!(loaded.log_level, LogLevel::Debug);
    assert_eq!(loaded.translation.available_engines.len(), 3);
}

#[test]
fn test_config_withEmptyObject_shouldUseDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.target_language, "ja");
    assert_eq!(config.translation.available_engines.len(), 3);
    assert!(config.validate().is_ok());
}

#[test]
fn test_logLevel_shouldMapToFilter() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
