/*!
 * Tests for error types and conversions
 */

use flowlingo::errors::{AppError, ProviderError, TranslationError, WorkflowError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_providerError_responseMismatch_shouldNameCounts() {
    let error = ProviderError::ResponseMismatch { expected: 3, actual: 2 };
    assert_eq!(error.to_string(), "Engine returned 2 translations for 3 texts");
}

#[test]
fn test_workflowError_pathResolution_shouldIncludePath() {
    let error = WorkflowError::PathResolution {
        path: "nodes[0].name".to_string(),
        reason: "index [0] applied to an object".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Cannot resolve path 'nodes[0].name': index [0] applied to an object"
    );
}

#[test]
fn test_translationError_fromProviderError_shouldWrap() {
    let error: TranslationError = ProviderError::AuthenticationError("bad key".to_string()).into();
    assert!(matches!(error, TranslationError::Engine(ProviderError::AuthenticationError(_))));
    assert!(error.to_string().contains("bad key"));
}

#[test]
fn test_appError_fromWorkflowError_shouldWrap() {
    let error: AppError = WorkflowError::Parse("expected an object".to_string()).into();
    assert!(matches!(error, AppError::Workflow(WorkflowError::Parse(_))));
    assert!(error.to_string().starts_with("Workflow error:"));
}

#[test]
fn test_appError_fromSerdeError_shouldBeWorkflowParse() {
    let serde_error = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
    let error: AppError = serde_error.into();
    assert!(matches!(error, AppError::Workflow(WorkflowError::Parse(_))));
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "flow.json missing");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(ref message) if message.contains("flow.json")));
}

#[test]
fn test_appError_fromAnyhow_shouldBeUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert_eq!(error.to_string(), "Unknown error: something odd");
}

#[test]
fn test_errorChain_shouldPropagateThroughQuestionMark() {
    fn inner() -> Result<(), ProviderError> {
        Err(ProviderError::ConnectionError("refused".to_string()))
    }

    fn outer() -> Result<(), AppError> {
        inner().map_err(TranslationError::from)?;
        Ok(())
    }

    let error = outer().unwrap_err();
    assert!(matches!(error, AppError::Translation(TranslationError::Engine(_))));
}
