//! Conversation items: the records that make up a request's `input` list and
//! a response's `output` list.
//!
//! Request-bound and response-bound shapes are kept as separate types even
//! where they share field names. The API's shapes really are asymmetric:
//! input-side [`Reasoning`] carries `format`/`signature` while
//! [`OutputReasoning`] does not, and [`FunctionToolCall`] requires `id` while
//! [`OutputFunctionCall`] does not.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::content::{EasyContent, InputContent, OutputContent};
use crate::enums::{
    EasyMessageRole, ImageGenerationStatus, InputMessageRole, ItemStatus, ReasoningFormat,
    SearchCallStatus,
};
use crate::errors::WireError;
use crate::wire::{ObjectReader, WireDecode, deserialize_via_wire};

// =============================================================================
// Reasoning text parts
// =============================================================================

/// Serializes a list of strings as `[{"type": <kind>, "text": ...}, ...]`.
struct TextParts<'a> {
    kind: &'static str,
    parts: &'a [String],
}

impl Serialize for TextParts<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;

        struct Part<'a>(&'static str, &'a str);

        impl Serialize for Part<'_> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", self.0)?;
                map.serialize_entry("text", self.1)?;
                map.end()
            }
        }

        let mut seq = serializer.serialize_seq(Some(self.parts.len()))?;
        for text in self.parts {
            seq.serialize_element(&Part(self.kind, text))?;
        }
        seq.end()
    }
}

/// Reads the `text` of each part in `items`, checking any `type` it carries.
fn decode_text_parts(
    items: &[Value],
    path: &str,
    kind: &'static str,
    union: &'static str,
) -> Result<Vec<String>, WireError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = format!("{path}[{i}]");
            let part = ObjectReader::new(item, &item_path)?;
            if part.contains("type") {
                part.expect_type(kind, union)?;
            }
            part.string("text")
        })
        .collect()
}

fn serialize_summary<S: Serializer>(parts: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    TextParts {
        kind: "summary_text",
        parts,
    }
    .serialize(serializer)
}

fn serialize_reasoning_text<S: Serializer>(
    parts: &Option<Vec<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    parts
        .as_deref()
        .map(|parts| TextParts {
            kind: "reasoning_text",
            parts,
        })
        .serialize(serializer)
}

fn summary_parts(obj: &ObjectReader<'_>) -> Result<Vec<String>, WireError> {
    let items = obj.array("summary")?;
    decode_text_parts(
        items,
        &format!("{}.summary", obj.path()),
        "summary_text",
        "ReasoningSummary",
    )
}

fn content_parts(obj: &ObjectReader<'_>) -> Result<Option<Vec<String>>, WireError> {
    match obj.opt_array("content")? {
        Some(items) => decode_text_parts(
            items,
            &format!("{}.content", obj.path()),
            "reasoning_text",
            "ReasoningContent",
        )
        .map(Some),
        None => Ok(None),
    }
}

// =============================================================================
// Request-bound items
// =============================================================================

/// A reasoning trace sent back to the provider as input.
///
/// `format` and `signature` let the provider verify and replay reasoning that
/// another (or the same) model produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "reasoning")]
pub struct Reasoning {
    pub id: String,
    #[serde(serialize_with = "serialize_summary")]
    pub summary: Vec<String>,
    #[serde(
        serialize_with = "serialize_reasoning_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ReasoningFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
}

impl Reasoning {
    #[must_use]
    pub fn new(id: impl Into<String>, summary: Vec<String>) -> Self {
        Self {
            id: id.into(),
            summary,
            content: None,
            encrypted_content: None,
            format: None,
            signature: None,
            status: None,
        }
    }
}

impl From<OutputReasoning> for Reasoning {
    fn from(r: OutputReasoning) -> Self {
        Self {
            id: r.id,
            summary: r.summary,
            content: r.content,
            encrypted_content: r.encrypted_content,
            format: None,
            signature: None,
            status: r.status,
        }
    }
}

/// The simplified message form. Content elements may be bare strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "message")]
pub struct EasyInputMessage {
    pub role: EasyMessageRole,
    pub content: Vec<EasyContent>,
}

impl EasyInputMessage {
    #[must_use]
    pub fn new(role: EasyMessageRole, content: Vec<EasyContent>) -> Self {
        Self { role, content }
    }

    /// A user message holding a single bare string.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(EasyMessageRole::User, vec![EasyContent::Text(text.into())])
    }

    /// A system message holding a single bare string.
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(EasyMessageRole::System, vec![EasyContent::Text(text.into())])
    }

    /// A developer message holding a single bare string.
    #[must_use]
    pub fn developer(text: impl Into<String>) -> Self {
        Self::new(
            EasyMessageRole::Developer,
            vec![EasyContent::Text(text.into())],
        )
    }

    /// An assistant message holding a single bare string.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(
            EasyMessageRole::Assistant,
            vec![EasyContent::Text(text.into())],
        )
    }
}

/// A response-shaped input message with typed content only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "message")]
pub struct InputMessageItem {
    pub role: InputMessageRole,
    pub content: Vec<InputContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A function call the model made in an earlier turn, echoed back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "function_call")]
pub struct FunctionToolCall {
    pub call_id: String,
    pub name: String,
    pub arguments: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
}

/// The caller's result for a function call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "function_call_output")]
pub struct FunctionCallOutput {
    pub call_id: String,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
}

impl FunctionCallOutput {
    #[must_use]
    pub fn new(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            output: output.into(),
            id: None,
            status: None,
        }
    }
}

// =============================================================================
// Response-bound items
// =============================================================================

/// An assistant message. The role is always `assistant`.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputMessage {
    pub content: Vec<OutputContent>,
    pub id: String,
    pub status: Option<ItemStatus>,
}

impl OutputMessage {
    /// Concatenates the `output_text` parts of this message.
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(OutputContent::as_text)
            .collect()
    }
}

/// A reasoning trace produced by the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "reasoning")]
pub struct OutputReasoning {
    pub id: String,
    #[serde(serialize_with = "serialize_summary")]
    pub summary: Vec<String>,
    #[serde(
        serialize_with = "serialize_reasoning_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
}

/// A function call requested by the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "function_call")]
pub struct OutputFunctionCall {
    pub arguments: String,
    pub call_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
}

impl OutputFunctionCall {
    /// Parses the JSON-encoded `arguments` string.
    ///
    /// # Errors
    ///
    /// Returns an error if the model emitted arguments that are not valid JSON.
    pub fn parsed_arguments(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.arguments)
    }
}

/// A hosted web search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "web_search_call")]
pub struct WebSearchCall {
    pub id: String,
    pub status: SearchCallStatus,
}

/// A hosted file search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "file_search_call")]
pub struct FileSearchCall {
    pub id: String,
    pub queries: Vec<String>,
    pub status: SearchCallStatus,
}

/// A hosted image generation. `result` holds the base64 image once done.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "image_generation_call")]
pub struct ImageGenerationCall {
    pub id: String,
    pub status: ImageGenerationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

// =============================================================================
// Encoding
// =============================================================================

// `role` is not a field: it is always `assistant`.
impl Serialize for OutputMessage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "message")?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("role", "assistant")?;
        map.serialize_entry("content", &self.content)?;
        if let Some(status) = &self.status {
            map.serialize_entry("status", status)?;
        }
        map.end()
    }
}

// =============================================================================
// Decoding
// =============================================================================

impl WireDecode for Reasoning {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("reasoning", "InputItem")?;
        Ok(Self {
            id: obj.string("id")?,
            summary: summary_parts(&obj)?,
            content: content_parts(&obj)?,
            encrypted_content: obj.opt_string("encrypted_content")?,
            format: obj.opt_enumeration("Reasoning", "format")?,
            signature: obj.opt_string("signature")?,
            status: obj.opt_enumeration("Reasoning", "status")?,
        })
    }
}

impl WireDecode for EasyInputMessage {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("message", "InputItem")?;
        Ok(Self {
            role: obj.enumeration("EasyInputMessage", "role")?,
            content: obj.list("content")?,
        })
    }
}

impl WireDecode for InputMessageItem {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("message", "InputItem")?;
        Ok(Self {
            role: obj.enumeration("InputMessageItem", "role")?,
            content: obj.list("content")?,
            id: obj.opt_string("id")?,
        })
    }
}

impl WireDecode for FunctionToolCall {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("function_call", "InputItem")?;
        Ok(Self {
            call_id: obj.string("call_id")?,
            name: obj.string("name")?,
            arguments: obj.string("arguments")?,
            id: obj.string("id")?,
            status: obj.opt_enumeration("FunctionToolCall", "status")?,
        })
    }
}

impl WireDecode for FunctionCallOutput {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("function_call_output", "InputItem")?;
        Ok(Self {
            call_id: obj.string("call_id")?,
            output: obj.string("output")?,
            id: obj.opt_string("id")?,
            status: obj.opt_enumeration("FunctionCallOutput", "status")?,
        })
    }
}

impl WireDecode for OutputMessage {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("message", "OutputItem")?;
        if let Some(role) = obj.get("role") {
            match role.as_str() {
                Some("assistant") => {}
                Some(other) => {
                    return Err(WireError::UnknownEnumValue {
                        enum_name: "OutputMessage.role".to_string(),
                        value: other.to_string(),
                    });
                }
                None => return Err(WireError::mismatch(&format!("{path}.role"), "string")),
            }
        }
        Ok(Self {
            content: obj.list("content")?,
            id: obj.string("id")?,
            status: obj.opt_enumeration("OutputMessage", "status")?,
        })
    }
}

impl WireDecode for OutputReasoning {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("reasoning", "OutputItem")?;
        Ok(Self {
            id: obj.string("id")?,
            summary: summary_parts(&obj)?,
            content: content_parts(&obj)?,
            encrypted_content: obj.opt_string("encrypted_content")?,
            status: obj.opt_enumeration("OutputReasoning", "status")?,
        })
    }
}

impl WireDecode for OutputFunctionCall {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("function_call", "OutputItem")?;
        Ok(Self {
            arguments: obj.string("arguments")?,
            call_id: obj.string("call_id")?,
            name: obj.string("name")?,
            id: obj.opt_string("id")?,
            status: obj.opt_enumeration("OutputFunctionCall", "status")?,
        })
    }
}

impl WireDecode for WebSearchCall {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("web_search_call", "OutputItem")?;
        Ok(Self {
            id: obj.string("id")?,
            status: obj.enumeration("WebSearchCall", "status")?,
        })
    }
}

impl WireDecode for FileSearchCall {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("file_search_call", "OutputItem")?;
        Ok(Self {
            id: obj.string("id")?,
            queries: obj.string_list("queries")?,
            status: obj.enumeration("FileSearchCall", "status")?,
        })
    }
}

impl WireDecode for ImageGenerationCall {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("image_generation_call", "OutputItem")?;
        Ok(Self {
            id: obj.string("id")?,
            status: obj.enumeration("ImageGenerationCall", "status")?,
            result: obj.opt_string("result")?,
        })
    }
}

deserialize_via_wire!(
    Reasoning,
    EasyInputMessage,
    InputMessageItem,
    FunctionToolCall,
    FunctionCallOutput,
    OutputMessage,
    OutputReasoning,
    OutputFunctionCall,
    WebSearchCall,
    FileSearchCall,
    ImageGenerationCall,
);
