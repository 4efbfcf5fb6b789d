//! Unit tests for response decoding and the convenience accessors.

use crate::content::{Annotation, OutputContent, OutputText};
use crate::enums::*;
use crate::errors::{OpenRouterError, WireError};
use crate::items::*;
use crate::request::InputItem;
use crate::response::*;
use crate::wire::WireDecode;
use serde_json::json;

#[test]
fn test_single_message_response() {
    let response = Response::from_body(
        r#"{"output":[{"type":"message","id":"m1","role":"assistant",
            "content":[{"type":"output_text","text":"Hello!"}]}]}"#,
    )
    .unwrap();
    assert_eq!(
        response.output,
        Some(vec![OutputItem::Message(OutputMessage {
            content: vec![OutputContent::Text(OutputText::new("Hello!"))],
            id: "m1".to_string(),
            status: None,
        })])
    );
    assert_eq!(response.output_text().as_deref(), Some("Hello!"));
}

#[test]
fn test_reasoning_then_function_call() {
    let response = Response::from_value(&json!({
        "output": [
            {"type": "reasoning", "id": "r1", "summary": [{"type": "summary_text", "text": "need weather"}]},
            {"type": "function_call", "call_id": "c1", "name": "get_weather", "arguments": "{\"city\":\"Paris\"}"}
        ]
    }))
    .unwrap();
    let items = response.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].type_name(), "reasoning");
    assert_eq!(items[1].type_name(), "function_call");

    let calls: Vec<_> = response.function_calls().collect();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "get_weather");
    assert_eq!(calls[0].call_id, "c1");
    assert!(calls[0].id.is_none());

    let reasoning: Vec<_> = response.reasoning().collect();
    assert_eq!(reasoning[0].summary, vec!["need weather".to_string()]);
    assert_eq!(response.output_text(), None);
}

#[test]
fn test_unknown_web_search_status_fails() {
    let err = Response::from_value(&json!({
        "output": [{"type": "web_search_call", "id": "ws1", "status": "bogus"}]
    }))
    .unwrap_err();
    assert_eq!(
        err.as_wire(),
        Some(&WireError::UnknownEnumValue {
            enum_name: "WebSearchCall.status".to_string(),
            value: "bogus".to_string(),
        })
    );
}

#[test]
fn test_unknown_output_item_fails() {
    let err = Response::from_json(&json!({
        "output": [{"type": "code_interpreter_call", "id": "x"}]
    }))
    .unwrap_err();
    assert_eq!(
        err,
        WireError::UnknownVariant {
            union: "OutputItem",
            discriminator: "code_interpreter_call".to_string(),
        }
    );
}

#[test]
fn test_missing_output_is_none() {
    let response = Response::from_body("{}").unwrap();
    assert!(response.output.is_none());
    assert!(response.items().is_empty());
    assert_eq!(serde_json::to_value(&response).unwrap(), json!({}));
}

#[test]
fn test_empty_output_list_preserved() {
    let response = Response::from_body(r#"{"output": []}"#).unwrap();
    assert_eq!(response.output, Some(vec![]));
    assert_eq!(serde_json::to_value(&response).unwrap(), json!({"output": []}));
}

#[test]
fn test_unrelated_top_level_fields_ignored() {
    let response = Response::from_value(&json!({
        "id": "resp_1",
        "object": "response",
        "model": "openai/gpt-4o",
        "usage": {"input_tokens": 3},
        "output": []
    }))
    .unwrap();
    assert_eq!(response.output, Some(vec![]));
}

#[test]
fn test_output_must_be_array() {
    let err = Response::from_json(&json!({"output": "nope"})).unwrap_err();
    assert_eq!(
        err,
        WireError::TypeMismatch {
            path: "$.output".to_string(),
            expected: "array",
        }
    );
}

#[test]
fn test_error_envelope_becomes_api_error() {
    let err = Response::from_body(
        r#"{"error": {"message": "No endpoints found", "code": 404}}"#,
    )
    .unwrap_err();
    match err {
        OpenRouterError::Api {
            status_code,
            message,
            code,
        } => {
            assert_eq!(status_code, None);
            assert_eq!(message, "No endpoints found");
            assert_eq!(code.as_deref(), Some("404"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn test_null_error_is_ignored() {
    let response = Response::from_body(r#"{"error": null, "output": []}"#).unwrap();
    assert_eq!(response.output, Some(vec![]));
}

#[test]
fn test_invalid_json_body() {
    let err = Response::from_body("not json").unwrap_err();
    assert!(matches!(err, OpenRouterError::Json(_)));
}

#[test]
fn test_error_path_points_into_output() {
    let err = Response::from_json(&json!({
        "output": [
            {"type": "web_search_call", "id": "ws1", "status": "completed"},
            {"type": "file_search_call", "id": "fs1", "status": "completed"}
        ]
    }))
    .unwrap_err();
    assert_eq!(
        err,
        WireError::MissingField {
            path: "$.output[1]".to_string(),
            field: "queries".to_string(),
        }
    );
}

#[test]
fn test_refusals_accessor() {
    let response = Response::from_value(&json!({
        "output": [{
            "type": "message",
            "id": "m1",
            "role": "assistant",
            "content": [
                {"type": "refusal", "refusal": "I can't help with that."}
            ]
        }]
    }))
    .unwrap();
    let refusals: Vec<_> = response.refusals().collect();
    assert_eq!(refusals, vec!["I can't help with that."]);
    assert_eq!(response.output_text(), None);
}

#[test]
fn test_output_text_concatenates_messages() {
    let response = Response {
        output: Some(vec![
            OutputItem::Message(OutputMessage {
                content: vec![OutputText::new("Hello, ").into()],
                id: "m1".to_string(),
                status: None,
            }),
            OutputItem::WebSearchCall(WebSearchCall {
                id: "ws1".to_string(),
                status: SearchCallStatus::Completed,
            }),
            OutputItem::Message(OutputMessage {
                content: vec![OutputText::new("world").into()],
                id: "m2".to_string(),
                status: None,
            }),
        ]),
    };
    assert_eq!(response.output_text().as_deref(), Some("Hello, world"));
}

#[test]
fn test_annotated_message_roundtrip() {
    let response = Response {
        output: Some(vec![OutputItem::Message(OutputMessage {
            content: vec![
                OutputText::new("Paris is the capital.")
                    .with_annotations(vec![Annotation::UrlCitation(crate::content::UrlCitation {
                        url: "https://en.wikipedia.org/wiki/Paris".to_string(),
                        title: "Paris".to_string(),
                        start_index: 0.0,
                        end_index: 5.0,
                    })])
                    .into(),
            ],
            id: "m1".to_string(),
            status: Some(ItemStatus::Completed),
        })]),
    };
    let json = serde_json::to_string(&response).unwrap();
    let back: Response = serde_json::from_str(&json).unwrap();
    assert_eq!(back, response);
}

#[test]
fn test_into_input_items_preserves_order() {
    let response = Response::from_value(&json!({
        "output": [
            {"type": "reasoning", "id": "r1", "summary": []},
            {"type": "message", "id": "m1", "role": "assistant",
             "content": [{"type": "output_text", "text": "checking"}]},
            {"type": "function_call", "call_id": "c1", "name": "f", "arguments": "{}"}
        ]
    }))
    .unwrap();
    let items = response.into_input_items();
    assert_eq!(items.len(), 3);
    assert!(matches!(items[0], InputItem::OutputReasoning(_)));
    assert!(matches!(items[1], InputItem::OutputMessage(_)));
    assert!(matches!(items[2], InputItem::OutputFunctionCall(_)));
}

#[test]
fn test_every_output_kind_decodes() {
    let response = Response::from_value(&json!({
        "output": [
            {"type": "reasoning", "id": "r1", "summary": [], "encrypted_content": "e"},
            {"type": "message", "id": "m1", "content": []},
            {"type": "function_call", "call_id": "c1", "name": "f", "arguments": "{}", "status": "in_progress"},
            {"type": "web_search_call", "id": "ws1", "status": "searching"},
            {"type": "file_search_call", "id": "fs1", "queries": ["q"], "status": "failed"},
            {"type": "image_generation_call", "id": "ig1", "status": "in_progress"}
        ]
    }))
    .unwrap();
    let kinds: Vec<_> = response.items().iter().map(OutputItem::type_name).collect();
    assert_eq!(
        kinds,
        vec![
            "reasoning",
            "message",
            "function_call",
            "web_search_call",
            "file_search_call",
            "image_generation_call"
        ]
    );
}

#[test]
fn test_message_with_empty_annotations() {
    let response = Response::from_value(&json!({
        "output": [{
            "type": "message",
            "id": "m1",
            "role": "assistant",
            "content": [{"type": "output_text", "text": "hi", "annotations": []}]
        }]
    }))
    .unwrap();
    let expected = OutputItem::Message(OutputMessage {
        content: vec![OutputText::new("hi").with_annotations(vec![]).into()],
        id: "m1".to_string(),
        status: None,
    });
    assert_eq!(response.output, Some(vec![expected]));
}

#[test]
fn test_error_envelope_checked_before_output() {
    // `output` is malformed, but the error envelope wins.
    let err = Response::from_value(&json!({
        "error": {"message": "rate limited"},
        "output": "garbage"
    }))
    .unwrap_err();
    assert_eq!(err.to_string(), "API error: rate limited");
    assert!(err.as_wire().is_none());
}

#[test]
fn test_serde_decode_rejects_error_envelope() {
    let err = serde_json::from_str::<Response>(r#"{"error":{"message":"rate limited"}}"#)
        .unwrap_err();
    assert!(err.to_string().contains("rate limited"), "got {err}");
}

#[test]
fn test_from_json_reports_error_envelope() {
    let err = Response::from_json(&json!({
        "error": {"message": "No endpoints found", "code": 404},
        "output": []
    }))
    .unwrap_err();
    assert_eq!(
        err,
        WireError::Api {
            message: "No endpoints found".to_string(),
            code: Some("404".to_string()),
        }
    );
}

#[test]
fn test_serde_decode_ignores_null_error() {
    let response: Response = serde_json::from_str(r#"{"error": null, "output": []}"#).unwrap();
    assert_eq!(response.output, Some(vec![]));
}
