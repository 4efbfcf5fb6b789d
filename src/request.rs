//! The request envelope and the input-item union.

use serde::Serialize;
use serde::ser::SerializeMap;
use serde_json::Value;

use crate::content::EasyContent;
use crate::errors::WireError;
use crate::items::{
    EasyInputMessage, FileSearchCall, FunctionCallOutput, FunctionToolCall, ImageGenerationCall,
    InputMessageItem, OutputFunctionCall, OutputMessage, OutputReasoning, Reasoning, WebSearchCall,
};
use crate::wire::{ObjectReader, WireDecode, decode_elements, deserialize_via_wire};

/// One element of a request's `input` list.
///
/// Output-side shapes are members too so that earlier turns can be echoed back
/// verbatim as conversation history.
#[derive(Clone, Debug, PartialEq)]
pub enum InputItem {
    Reasoning(Reasoning),
    EasyMessage(EasyInputMessage),
    MessageItem(InputMessageItem),
    FunctionToolCall(FunctionToolCall),
    FunctionCallOutput(FunctionCallOutput),
    OutputMessage(OutputMessage),
    OutputReasoning(OutputReasoning),
    OutputFunctionCall(OutputFunctionCall),
    WebSearchCall(WebSearchCall),
    FileSearchCall(FileSearchCall),
    ImageGenerationCall(ImageGenerationCall),
}

macro_rules! impl_from_item {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for InputItem {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )+
    };
}

impl_from_item!(
    Reasoning(Reasoning),
    EasyMessage(EasyInputMessage),
    MessageItem(InputMessageItem),
    FunctionToolCall(FunctionToolCall),
    FunctionCallOutput(FunctionCallOutput),
    OutputMessage(OutputMessage),
    OutputReasoning(OutputReasoning),
    OutputFunctionCall(OutputFunctionCall),
    WebSearchCall(WebSearchCall),
    FileSearchCall(FileSearchCall),
    ImageGenerationCall(ImageGenerationCall),
);

impl Serialize for InputItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Reasoning(v) => v.serialize(serializer),
            Self::EasyMessage(v) => v.serialize(serializer),
            Self::MessageItem(v) => v.serialize(serializer),
            Self::FunctionToolCall(v) => v.serialize(serializer),
            Self::FunctionCallOutput(v) => v.serialize(serializer),
            Self::OutputMessage(v) => v.serialize(serializer),
            Self::OutputReasoning(v) => v.serialize(serializer),
            Self::OutputFunctionCall(v) => v.serialize(serializer),
            Self::WebSearchCall(v) => v.serialize(serializer),
            Self::FileSearchCall(v) => v.serialize(serializer),
            Self::ImageGenerationCall(v) => v.serialize(serializer),
        }
    }
}

/// Picks the message shape for a `message` input item.
///
/// - no `id`: [`EasyInputMessage`]
/// - assistant role and only `output_text`/`refusal` parts: [`OutputMessage`]
/// - otherwise: [`InputMessageItem`], which rejects an assistant role or a
///   bare-string element instead of dropping the `id`
fn decode_message(value: &Value, obj: &ObjectReader<'_>) -> Result<InputItem, WireError> {
    let path = obj.path();
    if !obj.contains("id") {
        return EasyInputMessage::decode_at(value, path).map(InputItem::EasyMessage);
    }

    let is_assistant = obj.get("role").and_then(Value::as_str) == Some("assistant");
    let all_output_parts = obj.array("content")?.iter().all(|part| {
        matches!(
            part.get("type").and_then(Value::as_str),
            Some("output_text" | "refusal")
        )
    });
    if is_assistant && all_output_parts {
        OutputMessage::decode_at(value, path).map(InputItem::OutputMessage)
    } else {
        InputMessageItem::decode_at(value, path).map(InputItem::MessageItem)
    }
}

impl WireDecode for InputItem {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        match obj.discriminator()? {
            "message" => decode_message(value, &obj),
            "reasoning" => Reasoning::decode_at(value, path).map(Self::Reasoning),
            "function_call" if obj.contains("id") => {
                FunctionToolCall::decode_at(value, path).map(Self::FunctionToolCall)
            }
            "function_call" => {
                OutputFunctionCall::decode_at(value, path).map(Self::OutputFunctionCall)
            }
            "function_call_output" => {
                FunctionCallOutput::decode_at(value, path).map(Self::FunctionCallOutput)
            }
            "web_search_call" => WebSearchCall::decode_at(value, path).map(Self::WebSearchCall),
            "file_search_call" => FileSearchCall::decode_at(value, path).map(Self::FileSearchCall),
            "image_generation_call" => {
                ImageGenerationCall::decode_at(value, path).map(Self::ImageGenerationCall)
            }
            other => Err(WireError::unknown_variant("InputItem", other)),
        }
    }
}

/// The `input` of a request: a single prompt string or a list of items.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestInput {
    Text(String),
    Items(Vec<InputItem>),
}

impl From<&str> for RequestInput {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for RequestInput {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<InputItem>> for RequestInput {
    fn from(v: Vec<InputItem>) -> Self {
        Self::Items(v)
    }
}

impl Serialize for RequestInput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Items(items) => items.serialize(serializer),
        }
    }
}

impl WireDecode for RequestInput {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        match value {
            Value::String(text) => Ok(Self::Text(text.clone())),
            Value::Array(items) => decode_elements(items, path).map(Self::Items),
            _ => Err(WireError::mismatch(path, "string or array")),
        }
    }
}

/// A request to the `/responses` endpoint.
///
/// # Example
///
/// ```
/// use openrouter_responses::Request;
///
/// let request = Request::new().with_text("hello").with_model("gpt-x");
/// let json = request.to_json().unwrap();
/// assert_eq!(json, serde_json::json!({"input": "hello", "model": "gpt-x"}));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Request {
    pub input: Option<RequestInput>,
    pub model: Option<String>,
}

impl Request {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Uses a plain prompt string as the whole input.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.input = Some(RequestInput::Text(text.into()));
        self
    }

    /// Replaces the input with a list of items.
    #[must_use]
    pub fn with_items(mut self, items: Vec<InputItem>) -> Self {
        self.input = Some(RequestInput::Items(items));
        self
    }

    /// Appends an item, converting a plain-string input into an easy user
    /// message first.
    #[must_use]
    pub fn push_item(mut self, item: impl Into<InputItem>) -> Self {
        let mut items = match self.input.take() {
            None => Vec::new(),
            Some(RequestInput::Items(items)) => items,
            Some(RequestInput::Text(text)) => {
                vec![InputItem::EasyMessage(EasyInputMessage::user(text))]
            }
        };
        items.push(item.into());
        self.input = Some(RequestInput::Items(items));
        self
    }

    /// Appends a user message made of the given content elements.
    #[must_use]
    pub fn push_user_content(self, content: Vec<EasyContent>) -> Self {
        self.push_item(EasyInputMessage::new(
            crate::enums::EasyMessageRole::User,
            content,
        ))
    }

    /// Encodes this request into its wire JSON.
    ///
    /// # Errors
    ///
    /// Returns an error only if the JSON serializer itself fails.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Serialize for Request {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if let Some(input) = &self.input {
            map.serialize_entry("input", input)?;
        }
        if let Some(model) = &self.model {
            map.serialize_entry("model", model)?;
        }
        map.end()
    }
}

impl WireDecode for Request {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        let input = match obj.get("input") {
            Some(input) => Some(RequestInput::decode_at(input, &format!("{path}.input"))?),
            None => None,
        };
        Ok(Self {
            input,
            model: obj.opt_string("model")?,
        })
    }
}

deserialize_via_wire!(InputItem, RequestInput, Request);
