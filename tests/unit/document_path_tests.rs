/*!
 * Tests for document path addressing
 */

use flowlingo::errors::WorkflowError;
use flowlingo::workflow::{DocumentPath, PathSegment};
use serde_json::json;

#[test]
fn test_parse_withNumericLookingKey_shouldKeepItAKey() {
    let path: DocumentPath = "settings.0[0]".parse().unwrap();
    assert_eq!(
        path.segments(),
        &[
            PathSegment::Key("settings".to_string()),
            PathSegment::Key("0".to_string()),
            PathSegment::Index(0),
        ]
    );
}

#[test]
fn test_display_withAwkwardKeys_shouldQuoteAndRoundTrip() {
    let path = DocumentPath::root()
        .key("parameters")
        .key("a.b")
        .key("")
        .key("x[1]")
        .key("say \"hi\"")
        .index(2);

    let text = path.to_string();
    assert_eq!(text, r#"parameters["a.b"][""]["x[1]"]["say \"hi\""][2]"#);
    assert_eq!(text.parse::<DocumentPath>().unwrap(), path);
}

#[test]
fn test_parse_withUnicodeKeys_shouldRoundTrip() {
    let path = DocumentPath::root().key("nodes").index(0).key("パラメータ").key("名前");
    assert_eq!(path.to_string().parse::<DocumentPath>().unwrap(), path);
}

#[test]
fn test_parse_withMalformedInput_shouldReturnInvalidPath() {
    for input in ["", ".name", "nodes[", "nodes[-1]", "nodes[a]", "nodes..name", "nodes]", r#"["open"#, "a[0]b"] {
        let result = input.parse::<DocumentPath>();
        assert!(
            matches!(result, Err(WorkflowError::InvalidPath(_))),
            "'{}' should be rejected, got {:?}",
            input,
            result
        );
    }
}

#[test]
fn test_resolve_shouldFollowKeysAndIndexes() {
    let document = json!({"nodes": [{"parameters": {"options": [{"label": "A"}, {"label": "B"}]}}]});
    let path: DocumentPath = "nodes[0].parameters.options[1].label".parse().unwrap();
    assert_eq!(path.resolve(&document), Some(&json!("B")));
}

#[test]
fn test_resolve_withKindMismatch_shouldReturnNone() {
    let document = json!({"nodes": {"0": {"name": "Start"}}});
    let as_index: DocumentPath = "nodes[0].name".parse().unwrap();
    let as_key: DocumentPath = "nodes.0.name".parse().unwrap();
    assert_eq!(as_index.resolve(&document), None);
    assert_eq!(as_key.resolve(&document), Some(&json!("Start")));
}

#[test]
fn test_serde_shouldUseTextualForm() {
    let path = DocumentPath::root().key("nodes").index(1).key("notes");
    assert_eq!(serde_json::to_value(&path).unwrap(), json!("nodes[1].notes"));

    let back: DocumentPath = serde_json::from_value(json!("nodes[1].notes")).unwrap();
    assert_eq!(back, path);

    assert!(serde_json::from_value::<DocumentPath>(json!("nodes[x]")).is_err());
}

#[test]
fn test_startsWithKey_shouldOnlyCheckFirstSegment() {
    let path: DocumentPath = "meta.translated".parse().unwrap();
    assert!(path.starts_with_key("meta"));
    assert!(!path.starts_with_key("translated"));
    assert!(!DocumentPath::root().starts_with_key("meta"));
}
