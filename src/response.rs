//! The response envelope and the output-item union.

use serde::Serialize;
use serde::ser::SerializeMap;
use serde_json::Value;
use tracing::warn;

use crate::errors::{OpenRouterError, WireError};
use crate::items::{
    FileSearchCall, ImageGenerationCall, OutputFunctionCall, OutputMessage, OutputReasoning,
    WebSearchCall,
};
use crate::request::InputItem;
use crate::wire::{ObjectReader, WireDecode, deserialize_via_wire};

/// One element of a response's `output` list.
#[derive(Clone, Debug, PartialEq)]
pub enum OutputItem {
    Message(OutputMessage),
    Reasoning(OutputReasoning),
    FunctionCall(OutputFunctionCall),
    WebSearchCall(WebSearchCall),
    FileSearchCall(FileSearchCall),
    ImageGenerationCall(ImageGenerationCall),
}

impl OutputItem {
    /// The discriminator this item carries on the wire.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
            Self::Reasoning(_) => "reasoning",
            Self::FunctionCall(_) => "function_call",
            Self::WebSearchCall(_) => "web_search_call",
            Self::FileSearchCall(_) => "file_search_call",
            Self::ImageGenerationCall(_) => "image_generation_call",
        }
    }
}

impl From<OutputItem> for InputItem {
    fn from(item: OutputItem) -> Self {
        match item {
            OutputItem::Message(v) => Self::OutputMessage(v),
            OutputItem::Reasoning(v) => Self::OutputReasoning(v),
            OutputItem::FunctionCall(v) => Self::OutputFunctionCall(v),
            OutputItem::WebSearchCall(v) => Self::WebSearchCall(v),
            OutputItem::FileSearchCall(v) => Self::FileSearchCall(v),
            OutputItem::ImageGenerationCall(v) => Self::ImageGenerationCall(v),
        }
    }
}

impl Serialize for OutputItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Message(v) => v.serialize(serializer),
            Self::Reasoning(v) => v.serialize(serializer),
            Self::FunctionCall(v) => v.serialize(serializer),
            Self::WebSearchCall(v) => v.serialize(serializer),
            Self::FileSearchCall(v) => v.serialize(serializer),
            Self::ImageGenerationCall(v) => v.serialize(serializer),
        }
    }
}

impl WireDecode for OutputItem {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        match obj.discriminator()? {
            "message" => OutputMessage::decode_at(value, path).map(Self::Message),
            "reasoning" => OutputReasoning::decode_at(value, path).map(Self::Reasoning),
            "function_call" => OutputFunctionCall::decode_at(value, path).map(Self::FunctionCall),
            "web_search_call" => WebSearchCall::decode_at(value, path).map(Self::WebSearchCall),
            "file_search_call" => FileSearchCall::decode_at(value, path).map(Self::FileSearchCall),
            "image_generation_call" => {
                ImageGenerationCall::decode_at(value, path).map(Self::ImageGenerationCall)
            }
            other => Err(WireError::unknown_variant("OutputItem", other)),
        }
    }
}

/// A response from the `/responses` endpoint.
///
/// `output` keeps the provider's emission order (e.g. reasoning, then the
/// message, then a tool call).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    pub output: Option<Vec<OutputItem>>,
}

impl Response {
    /// Decodes a raw response body.
    ///
    /// A top-level `error` object is reported as [`OpenRouterError::Api`]
    /// before `output` is looked at. The typed decoders ([`WireDecode`] and
    /// `Deserialize`) report it as [`WireError::Api`].
    ///
    /// # Errors
    ///
    /// - [`OpenRouterError::Json`] if the body is not JSON
    /// - [`OpenRouterError::Api`] if the provider reported an error
    /// - [`OpenRouterError::Wire`] if the payload does not match the typed model
    pub fn from_body(body: &str) -> Result<Self, OpenRouterError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(&value)
    }

    /// Like [`Response::from_body`], for an already-parsed document.
    ///
    /// # Errors
    ///
    /// See [`Response::from_body`].
    pub fn from_value(value: &Value) -> Result<Self, OpenRouterError> {
        Self::from_json(value).map_err(|e| {
            match &e {
                WireError::Api { message, .. } => {
                    warn!("Provider returned an error envelope: {}", message);
                }
                _ => warn!("Failed to decode response: {}", e),
            }
            OpenRouterError::from(e)
        })
    }

    /// All output items, or an empty slice when `output` was absent.
    #[must_use]
    pub fn items(&self) -> &[OutputItem] {
        self.output.as_deref().unwrap_or_default()
    }

    /// Concatenated `output_text` of every assistant message, if any.
    #[must_use]
    pub fn output_text(&self) -> Option<String> {
        let texts: Vec<String> = self
            .messages()
            .map(OutputMessage::text)
            .filter(|t| !t.is_empty())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    /// Assistant messages in emission order.
    pub fn messages(&self) -> impl Iterator<Item = &OutputMessage> {
        self.items().iter().filter_map(|item| match item {
            OutputItem::Message(m) => Some(m),
            _ => None,
        })
    }

    /// Function calls requested by the model, in emission order.
    pub fn function_calls(&self) -> impl Iterator<Item = &OutputFunctionCall> {
        self.items().iter().filter_map(|item| match item {
            OutputItem::FunctionCall(c) => Some(c),
            _ => None,
        })
    }

    /// Reasoning items, in emission order.
    pub fn reasoning(&self) -> impl Iterator<Item = &OutputReasoning> {
        self.items().iter().filter_map(|item| match item {
            OutputItem::Reasoning(r) => Some(r),
            _ => None,
        })
    }

    /// Refusal texts from every assistant message.
    pub fn refusals(&self) -> impl Iterator<Item = &str> {
        self.messages()
            .flat_map(|m| m.content.iter())
            .filter_map(|c| match c {
                crate::content::OutputContent::Refusal(r) => Some(r.refusal.as_str()),
                crate::content::OutputContent::Text(_) => None,
            })
    }

    /// Converts the output into input items, ready to be sent back as
    /// history in the next request.
    #[must_use]
    pub fn into_input_items(self) -> Vec<InputItem> {
        self.output
            .unwrap_or_default()
            .into_iter()
            .map(InputItem::from)
            .collect()
    }
}

/// Reads the provider's `error` envelope, if `value` carries one.
///
/// The envelope is `{"error": {"message": ..., "code": ...}}`. A non-object
/// `error` is reported with its JSON text as the message.
fn error_envelope(value: &Value) -> Option<(String, Option<String>)> {
    let error = value.get("error").filter(|e| !e.is_null())?;
    let message = match error.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => error
            .as_str()
            .map_or_else(|| error.to_string(), str::to_string),
    };
    // OpenRouter sends numeric codes, OpenAI-style providers send strings.
    let code = error.get("code").and_then(|c| match c {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });
    Some((message, code))
}

/// The envelope in `value` as an [`OpenRouterError::Api`] with `status_code`.
pub(crate) fn api_error(value: &Value, status_code: Option<u16>) -> Option<OpenRouterError> {
    error_envelope(value).map(|(message, code)| OpenRouterError::Api {
        status_code,
        message,
        code,
    })
}

impl Serialize for Response {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if let Some(output) = &self.output {
            map.serialize_entry("output", output)?;
        }
        map.end()
    }
}

impl WireDecode for Response {
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        if let Some((message, code)) = error_envelope(value) {
            return Err(WireError::Api { message, code });
        }
        Ok(Self {
            output: obj.opt_list("output")?,
        })
    }
}

deserialize_via_wire!(OutputItem, Response);
