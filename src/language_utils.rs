use anyhow::{Result, anyhow};
use isolang::Language;
use serde::Serialize;

use crate::app_config::EngineKind;

/// Language utilities for workflow localization
///
/// This module holds the table of languages offered for translation, the
/// per-engine language code mapping and ISO 639 validation of user input.
/// A language offered for workflow translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedLanguage {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
}

/// Languages offered for translation
pub const SUPPORTED_LANGUAGES: &[SupportedLanguage] = &[
    SupportedLanguage { code: "ja", name: "日本語", native_name: "日本語" },
    SupportedLanguage { code: "en", name: "English", native_name: "English" },
    SupportedLanguage { code: "zh", name: "Chinese", native_name: "中文" },
    SupportedLanguage { code: "ko", name: "Korean", native_name: "한국어" },
    SupportedLanguage { code: "es", name: "Spanish", native_name: "Español" },
    SupportedLanguage { code: "fr", name: "French", native_name: "Français" },
    SupportedLanguage { code: "de", name: "German", native_name: "Deutsch" },
];

/// Strip a region suffix (`zh-CN` -> `zh`) and lowercase
fn base_code(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Validate that a code is ISO 639-1 or ISO 639-3, with an optional region suffix
pub fn validate_language_code(code: &str) -> Result<()> {
    let base = base_code(code);
    let known = match base.len() {
        2 => Language::from_639_1(&base).is_some(),
        3 => Language::from_639_3(&base).is_some(),
        _ => false,
    };

    if known {
        Ok(())
    } else {
        Err(anyhow!("Invalid language code: {}", code))
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let base = base_code(code);
    let lang = match base.len() {
        2 => Language::from_639_1(&base),
        3 => Language::from_639_3(&base),
        _ => None,
    }
    .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// Language code in the form a given engine expects
pub fn engine_language_code(code: &str, engine: EngineKind) -> String {
    let lowered = code.trim().to_lowercase();
    match engine {
        EngineKind::Google => match lowered.as_str() {
            "zh" => "zh-CN".to_string(),
            _ => code.trim().to_string(),
        },
        EngineKind::DeepL => code.trim().to_uppercase(),
        EngineKind::Mock => lowered,
    }
}

/// Label the mock engine appends to untranslated text
pub fn mock_language_label(code: &str) -> String {
    match code {
        "ja" => "日本語",
        "zh" => "中国語",
        "ko" => "韓国語",
        "es" => "スペイン語",
        "fr" => "フランス語",
        "de" => "ドイツ語",
        other => other,
    }
    .to_string()
}

/// File name prefix for a translated workflow download
pub fn output_file_prefix(code: &str) -> String {
    match code {
        "ja" => "jp_".to_string(),
        "zh" => "cn_".to_string(),
        "ko" => "kr_".to_string(),
        other => format!("{}_", other),
    }
}
