/*!
 * Tests for the translation orchestrator
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use flowlingo::app_config::EngineKind;
use flowlingo::errors::{ProviderError, TranslationError};
use flowlingo::translation::{TranslationCache, TranslationService};
use flowlingo::workflow::WorkflowScanner;

use crate::common;
use crate::common::mock_engines::{CountingEngine, FailingEngine, ShortEngine};

fn service_with(engine: CountingEngine) -> TranslationService {
    TranslationService::offline().with_engine(EngineKind::Google, Arc::new(engine))
}

fn strings(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

#[tokio::test]
async fn test_translate_withBlankTexts_shouldDropThem() {
    let engine = CountingEngine::new(100);
    let service = service_with(engine.clone());

    let result = service
        .translate(&strings(&["Hello", "", "World", "  "]), "ja", EngineKind::Google, "en")
        .await
        .unwrap();

    assert_eq!(result, vec!["ja:Hello", "ja:World"]);
    assert_eq!(engine.texts_sent(), vec!["Hello", "World"]);
}

#[tokio::test]
async fn test_translate_withOnlyBlankTexts_shouldNotCallEngine() {
    let engine = CountingEngine::new(100);
    let service = service_with(engine.clone());

    let result = service
        .translate(&strings(&["", " "]), "ja", EngineKind::Google, "en")
        .await
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(engine.call_count(), 0);
}

#[tokio::test]
async fn test_translate_secondCall_shouldBeServedFromCache() {
    let engine = CountingEngine::new(100);
    let service = service_with(engine.clone());
    let texts = strings(&["Start", "End"]);

    let first = service.translate(&texts, "ja", EngineKind::Google, "en").await.unwrap();
    let second = service.translate(&texts, "ja", EngineKind::Google, "en").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(engine.call_count(), 1);
    assert_eq!(service.cache().stats().0, 2);
}

#[tokio::test]
async fn test_translate_withOtherTarget_shouldMissCache() {
    let engine = CountingEngine::new(100);
    let service = service_with(engine.clone());
    let texts = strings(&["Start"]);

    service.translate(&texts, "ja", EngineKind::Google, "en").await.unwrap();
    let korean = service.translate(&texts, "ko", EngineKind::Google, "en").await.unwrap();

    assert_eq!(korean, vec!["ko:Start"]);
    assert_eq!(engine.call_count(), 2);
}

#[tokio::test]
async fn test_translate_withDisabledCache_shouldAlwaysCallEngine() {
    let engine = CountingEngine::new(100);
    let service = service_with(engine.clone()).with_cache(TranslationCache::new(false));
    let texts = strings(&["Start"]);

    service.translate(&texts, "ja", EngineKind::Google, "en").await.unwrap();
    service.translate(&texts, "ja", EngineKind::Google, "en").await.unwrap();

    assert_eq!(engine.call_count(), 2);
}

#[tokio::test]
async fn test_translate_withManyTexts_shouldChunkInOrder() {
    let engine = CountingEngine::new(3);
    let service = service_with(engine.clone());
    let texts: Vec<String> = (0..8).map(|i| format!("text {}", i)).collect();

    let result = service.translate(&texts, "ja", EngineKind::Google, "en").await.unwrap();

    assert_eq!(engine.batch_sizes(), vec![3, 3, 2]);
    assert_eq!(engine.texts_sent(), texts);
    let expected: Vec<String> = texts.iter().map(|t| format!("ja:{}", t)).collect();
    assert_eq!(result, expected);
}

#[tokio::test]
async fn test_translate_withDuplicates_shouldSendEachTextOnce() {
    let engine = CountingEngine::new(100);
    let service = service_with(engine.clone());

    let result = service
        .translate(&strings(&["Start", "End", "Start"]), "ja", EngineKind::Google, "en")
        .await
        .unwrap();

    assert_eq!(result, vec!["ja:Start", "ja:End", "ja:Start"]);
    assert_eq!(engine.texts_sent(), vec!["Start", "End"]);
}

#[tokio::test]
async fn test_translate_withFailingEngine_shouldSurfaceEngineError() {
    let service = TranslationService::offline().with_engine(EngineKind::Google, Arc::new(FailingEngine));

    let err = service
        .translate(&strings(&["Start"]), "ja", EngineKind::Google, "en")
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::Engine(ProviderError::ConnectionError(_))));
    assert!(err.to_string().contains("engine unreachable"));
}

#[tokio::test]
async fn test_translate_withShortResponse_shouldReportMismatch() {
    let service = TranslationService::offline().with_engine(EngineKind::Google, Arc::new(ShortEngine));

    let err = service
        .translate(&strings(&["a", "b", "c"]), "ja", EngineKind::Google, "en")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TranslationError::Engine(ProviderError::ResponseMismatch { expected: 3, actual: 2 })
    ));
}

#[tokio::test]
async fn test_translateBatch_shouldScoreAndSummarize() {
    let engine = CountingEngine::new(5);
    let service = service_with(engine.clone());
    let scan = WorkflowScanner::new().scan(&common::sample_workflow()).unwrap();

    let batch = service
        .translate_batch(&scan.extracted_texts, "ja", EngineKind::Google, "en")
        .await
        .unwrap();

    assert_eq!(batch.translated_texts.len(), scan.extracted_texts.len());
    for (translated, extracted) in batch.translated_texts.iter().zip(&scan.extracted_texts) {
        assert_eq!(translated.path(), &extracted.path);
        assert_eq!(translated.translated.as_deref(), Some(format!("ja:{}", extracted.original).as_str()));
        assert_eq!(translated.translation_engine, "google");
        assert_eq!(translated.target_language, "ja");
    }

    assert_eq!(batch.summary.total_texts, 14);
    assert_eq!(batch.summary.engine, "google");
    assert_eq!(batch.summary.cache_hits, 0);
    assert_eq!(batch.summary.batches_dispatched, 3);
    assert_eq!(engine.batch_sizes(), vec![5, 5, 4]);

    let scores: Vec<u8> = batch.translated_texts.iter().map(|t| t.quality_score).collect();
    assert_eq!(
        batch.summary.average_quality,
        flowlingo::translation::QualityScorer::average_score(&scores)
    );
}

#[tokio::test]
async fn test_translateBatch_withProgress_shouldReportEveryBatch() {
    let engine = CountingEngine::new(4);
    let service = service_with(engine.clone());
    let scan = WorkflowScanner::new().scan(&common::sample_workflow()).unwrap();
    let calls = AtomicUsize::new(0);
    let last_total = AtomicUsize::new(0);

    service
        .translate_batch_with_progress(&scan.extracted_texts, "ja", EngineKind::Google, "en", |done, total| {
            calls.fetch_add(1, Ordering::SeqCst);
            assert!(done <= total);
            last_total.store(total, Ordering::SeqCst);
        })
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), engine.call_count());
    assert_eq!(last_total.load(Ordering::SeqCst), engine.call_count());
}

#[tokio::test]
async fn test_translate_withoutRealEngines_shouldUseMock() {
    let service = TranslationService::offline();

    let result = service
        .translate(&strings(&["Start", "Hello"]), "ja", EngineKind::DeepL, "en")
        .await
        .unwrap();

    assert_eq!(result, vec!["開始", "Hello"]);
}

#[tokio::test]
async fn test_translate_withMockToKorean_shouldTagText() {
    let service = TranslationService::offline();

    let result = service
        .translate(&strings(&["Start"]), "ko", EngineKind::Mock, "en")
        .await
        .unwrap();

    assert_eq!(result, vec!["Start [韓国語翻訳]"]);
}

#[test]
fn test_resolveEngine_shouldPreferRequestedDeepL() {
    let google = CountingEngine::new(1);
    let service = TranslationService::offline()
        .with_engine(EngineKind::Google, Arc::new(google))
        .with_engine(EngineKind::DeepL, Arc::new(ShortEngine));

    assert_eq!(service.resolve_engine(EngineKind::DeepL).name(), "short");
    assert_eq!(service.resolve_engine(EngineKind::Google).name(), "counting");
    assert_eq!(service.resolve_engine(EngineKind::Mock).name(), "mock");
}

#[test]
fn test_resolveEngine_withOnlyGoogle_shouldServeDeepLRequests() {
    let service = service_with(CountingEngine::new(1));
    assert_eq!(service.resolve_engine(EngineKind::DeepL).name(), "counting");
}

#[test]
fn test_resolveEngine_withOnlyDeepL_shouldFallBackToMockForGoogle() {
    let service = TranslationService::offline().with_engine(EngineKind::DeepL, Arc::new(ShortEngine));
    assert_eq!(service.resolve_engine(EngineKind::Google).name(), "mock");
}
