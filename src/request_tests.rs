//! Unit tests for the request envelope and input-item decoding rules.

use crate::content::{EasyContent, InputContent, InputImage, InputText, OutputText};
use crate::enums::*;
use crate::errors::WireError;
use crate::items::*;
use crate::request::*;
use crate::wire::WireDecode;
use serde_json::json;

#[test]
fn test_empty_request_is_empty_object() {
    let value = Request::new().to_json().unwrap();
    assert_eq!(value, json!({}));
    assert_eq!(Request::from_json(&value).unwrap(), Request::new());
}

#[test]
fn test_plain_string_input() {
    let request = Request::new().with_text("What is 2+2?").with_model("openai/gpt-4o");
    let json = serde_json::to_string(&request).unwrap();
    assert_eq!(json, r#"{"input":"What is 2+2?","model":"openai/gpt-4o"}"#);
}

#[test]
fn test_multimodal_user_message() {
    let request = Request::new().push_user_content(vec![
        EasyContent::from(InputContent::from(InputText::new("Describe"))),
        EasyContent::from(InputContent::from(
            InputImage::from_url("https://x/y.png").with_detail(ImageDetail::Auto),
        )),
    ]);
    assert_eq!(
        request.to_json().unwrap(),
        json!({
            "input": [{
                "type": "message",
                "role": "user",
                "content": [
                    {"type": "input_text", "text": "Describe"},
                    {"type": "input_image", "detail": "auto", "image_url": "https://x/y.png"}
                ]
            }]
        })
    );
}

#[test]
fn test_push_item_converts_text_input() {
    let request = Request::new()
        .with_text("first")
        .push_item(FunctionCallOutput::new("c1", "done"));
    let Some(RequestInput::Items(items)) = &request.input else {
        panic!("expected item list");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], InputItem::EasyMessage(EasyInputMessage::user("first")));
    assert!(matches!(items[1], InputItem::FunctionCallOutput(_)));
}

#[test]
fn test_input_order_preserved() {
    let items: Vec<InputItem> = vec![
        EasyInputMessage::system("be brief").into(),
        EasyInputMessage::user("hi").into(),
        FunctionCallOutput::new("c1", "ok").into(),
        EasyInputMessage::user("thanks").into(),
    ];
    let request = Request::new().with_items(items.clone());
    let value = request.to_json().unwrap();
    let input = value["input"].as_array().unwrap();
    assert_eq!(input[0]["role"], "system");
    assert_eq!(input[2]["type"], "function_call_output");
    assert_eq!(input[3]["content"], json!(["thanks"]));

    let back = Request::from_json(&value).unwrap();
    assert_eq!(back.input, Some(RequestInput::Items(items)));
}

#[test]
fn test_request_input_rejects_object() {
    let err = Request::from_json(&json!({"input": {"type": "message"}})).unwrap_err();
    assert_eq!(
        err,
        WireError::TypeMismatch {
            path: "$.input".to_string(),
            expected: "string or array",
        }
    );
}

#[test]
fn test_request_model_must_be_string() {
    let err = Request::from_json(&json!({"model": 4})).unwrap_err();
    assert!(matches!(err, WireError::TypeMismatch { path, .. } if path == "$.model"));
}

// --- Input-item structural rules ---

#[test]
fn test_assistant_message_with_id_decodes_as_output_message() {
    let item = InputItem::from_json(&json!({
        "type": "message",
        "id": "m1",
        "role": "assistant",
        "content": [{"type": "output_text", "text": "earlier answer"}]
    }))
    .unwrap();
    let InputItem::OutputMessage(message) = item else {
        panic!("expected OutputMessage, got {item:?}");
    };
    assert_eq!(message.text(), "earlier answer");
}

#[test]
fn test_assistant_message_without_id_decodes_as_easy_message() {
    let item = InputItem::from_json(&json!({
        "type": "message",
        "role": "assistant",
        "content": ["previous reply"]
    }))
    .unwrap();
    assert_eq!(
        item,
        InputItem::EasyMessage(EasyInputMessage::assistant("previous reply"))
    );
}

#[test]
fn test_user_message_with_id_decodes_as_message_item() {
    let item = InputItem::from_json(&json!({
        "type": "message",
        "id": "msg_1",
        "role": "user",
        "content": [{"type": "input_text", "text": "hi"}]
    }))
    .unwrap();
    assert_eq!(
        item,
        InputItem::MessageItem(InputMessageItem {
            role: InputMessageRole::User,
            content: vec![InputText::new("hi").into()],
            id: Some("msg_1".to_string()),
        })
    );
}

#[test]
fn test_message_with_id_rejects_bare_string() {
    // The easy form has no `id`, so it is not a fallback here.
    let err = InputItem::from_json(&json!({
        "type": "message",
        "id": "msg_1",
        "role": "user",
        "content": ["hi"]
    }))
    .unwrap_err();
    assert_eq!(
        err,
        WireError::TypeMismatch {
            path: "$.content[0]".to_string(),
            expected: "object",
        }
    );
}

#[test]
fn test_assistant_message_with_id_and_input_parts_fails() {
    let err = InputItem::from_json(&json!({
        "type": "message",
        "id": "m2",
        "role": "assistant",
        "content": [{"type": "input_text", "text": "hi"}]
    }))
    .unwrap_err();
    assert_eq!(
        err,
        WireError::UnknownEnumValue {
            enum_name: "InputMessageItem.role".to_string(),
            value: "assistant".to_string(),
        }
    );
}

#[test]
fn test_message_id_survives_reencode() {
    let wire = json!({
        "type": "message",
        "id": "msg_7",
        "role": "developer",
        "content": [{"type": "input_text", "text": "be brief"}]
    });
    let item = InputItem::from_json(&wire).unwrap();
    assert!(matches!(item, InputItem::MessageItem(_)));
    assert_eq!(serde_json::to_value(&item).unwrap(), wire);
}

#[test]
fn test_function_call_with_id_is_tool_call() {
    let item = InputItem::from_json(&json!({
        "type": "function_call",
        "id": "fc_1",
        "call_id": "c1",
        "name": "f",
        "arguments": "{}"
    }))
    .unwrap();
    assert!(matches!(item, InputItem::FunctionToolCall(_)));
}

#[test]
fn test_function_call_without_id_is_output_call() {
    let item = InputItem::from_json(&json!({
        "type": "function_call",
        "call_id": "c1",
        "name": "f",
        "arguments": "{}"
    }))
    .unwrap();
    assert!(matches!(item, InputItem::OutputFunctionCall(_)));
}

#[test]
fn test_reasoning_input_keeps_signature() {
    let item = InputItem::from_json(&json!({
        "type": "reasoning",
        "id": "r1",
        "summary": [],
        "signature": "sig",
        "format": "openai-response-v1"
    }))
    .unwrap();
    let InputItem::Reasoning(reasoning) = item else {
        panic!("expected Reasoning");
    };
    assert_eq!(reasoning.signature.as_deref(), Some("sig"));
    assert_eq!(reasoning.format, Some(ReasoningFormat::OpenAiResponseV1));
}

#[test]
fn test_hosted_tool_items_accepted_as_input() {
    let item = InputItem::from_json(&json!({
        "type": "image_generation_call",
        "id": "ig1",
        "status": "completed"
    }))
    .unwrap();
    assert!(matches!(item, InputItem::ImageGenerationCall(_)));
}

#[test]
fn test_unknown_input_item_discriminator() {
    let err = InputItem::from_json(&json!({"type": "computer_call", "id": "x"})).unwrap_err();
    assert_eq!(
        err,
        WireError::UnknownVariant {
            union: "InputItem",
            discriminator: "computer_call".to_string(),
        }
    );
}

#[test]
fn test_input_item_error_carries_index() {
    let err = Request::from_json(&json!({
        "input": [
            {"type": "message", "role": "user", "content": ["ok"]},
            {"type": "function_call_output", "call_id": "c1"}
        ]
    }))
    .unwrap_err();
    assert_eq!(
        err,
        WireError::MissingField {
            path: "$.input[1]".to_string(),
            field: "output".to_string(),
        }
    );
}

#[test]
fn test_history_echo_roundtrip() {
    let items: Vec<InputItem> = vec![
        EasyInputMessage::user("weather in Paris?").into(),
        OutputMessage {
            content: vec![OutputText::new("Let me check.").into()],
            id: "m1".to_string(),
            status: Some(ItemStatus::Completed),
        }
        .into(),
        FunctionToolCall {
            call_id: "c1".to_string(),
            name: "get_weather".to_string(),
            arguments: "{\"city\":\"Paris\"}".to_string(),
            id: "fc_1".to_string(),
            status: Some(ItemStatus::Completed),
        }
        .into(),
        FunctionCallOutput::new("c1", "{\"temp\":21}").into(),
        WebSearchCall {
            id: "ws1".to_string(),
            status: SearchCallStatus::Completed,
        }
        .into(),
    ];
    let request = Request::new().with_items(items).with_model("m");
    let value = request.to_json().unwrap();
    let parsed: Request = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, request);
}
