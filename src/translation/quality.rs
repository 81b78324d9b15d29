/*!
 * Heuristic translation quality scoring.
 *
 * Scores are advisory only: cheap, deterministic and explainable, they never
 * decide whether a translation is kept.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::workflow::{TextContext, TranslatedText};

/// Bracket-family characters that usually belong to placeholders or expressions
static BRACKET_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[{}()<>\[\]]").unwrap());

const BASE_SCORE: u8 = 70;
const LENGTH_RATIO_BONUS: u8 = 10;
const BRACKET_BONUS: u8 = 10;
const NODE_NAME_BONUS: u8 = 5;
const MAX_SCORE: u8 = 100;

/// Quality scorer for single translated strings
#[derive(Debug, Default, Clone, Copy)]
pub struct QualityScorer;

impl QualityScorer {
    /// Score one translation in [0, 100].
    ///
    /// Missing or empty translations score 0. Otherwise the base score of 70
    /// gets +10 for a length ratio strictly between 0.5 and 2.0, +10 when the
    /// original has brackets and the translation has the same number of them,
    /// and +5 for node names.
    pub fn score(original: &str, translated: Option<&str>, context: TextContext, field_type: &str) -> u8 {
        let Some(translated) = translated.filter(|t| !t.is_empty()) else {
            return 0;
        };

        let mut score = BASE_SCORE;

        let original_len = original.chars().count();
        if original_len > 0 {
            let ratio = translated.chars().count() as f64 / original_len as f64;
            if ratio > 0.5 && ratio < 2.0 {
                score += LENGTH_RATIO_BONUS;
            }
        }

        let original_brackets = BRACKET_REGEX.find_iter(original).count();
        if original_brackets > 0 && BRACKET_REGEX.find_iter(translated).count() == original_brackets {
            score += BRACKET_BONUS;
        }

        if context == TextContext::Node && field_type == "name" {
            score += NODE_NAME_BONUS;
        }

        score.min(MAX_SCORE)
    }

    /// Score a translated record
    pub fn score_text(text: &TranslatedText) -> u8 {
        Self::score(
            text.original(),
            text.translated.as_deref(),
            text.source.context,
            &text.source.field_type,
        )
    }

    /// Rounded arithmetic mean, 0 for no scores
    pub fn average_score(scores: &[u8]) -> u8 {
        if scores.is_empty() {
            return 0;
        }
        let sum: u32 = scores.iter().map(|&s| u32::from(s)).sum();
        (f64::from(sum) / scores.len() as f64).round() as u8
    }

    /// Recompute every score in place and return the new average
    pub fn rescore(texts: &mut [TranslatedText]) -> u8 {
        let scores: Vec<u8> = texts
            .iter_mut()
            .map(|text| {
                text.quality_score = Self::score_text(text);
                text.quality_score
            })
            .collect();
        Self::average_score(&scores)
    }
}
