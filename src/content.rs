//! Leaf content types carried inside messages.
//!
//! Input-side content (`input_text`, `input_image`, `input_file`,
//! `input_audio`) appears in request messages. Output-side content
//! (`output_text`, `refusal`) appears in assistant messages, and
//! `output_text` may carry citation annotations.
//!
//! Every type serializes with its `type` discriminator first and omits absent
//! optional fields entirely; no `null` is ever emitted.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};

use crate::enums::{AudioFormat, ImageDetail};
use crate::errors::WireError;
use crate::wire::{ObjectReader, WireDecode, deserialize_via_wire};

// =============================================================================
// Input Content
// =============================================================================

/// Plain text supplied by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "input_text")]
pub struct InputText {
    pub text: String,
}

impl InputText {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// An image referenced by URL (or data URL).
///
/// The wire schema allows `url` to be absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "input_image")]
pub struct InputImage {
    pub detail: ImageDetail,
    #[serde(rename = "image_url", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InputImage {
    /// An image at `url` with `auto` detail.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            detail: ImageDetail::Auto,
            url: Some(url.into()),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: ImageDetail) -> Self {
        self.detail = detail;
        self
    }
}

/// A file, either previously uploaded (`id`), inline (`data`), or remote (`url`).
///
/// All fields are optional on the wire; none is required to be present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "input_file")]
pub struct InputFile {
    #[serde(rename = "file_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "file_data", skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(rename = "file_url", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InputFile {
    #[must_use]
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Inlines `bytes` as a base64 data URL.
    ///
    /// # Example
    ///
    /// ```
    /// # use openrouter_responses::InputFile;
    /// let file = InputFile::from_bytes("notes.txt", "text/plain", b"hi");
    /// assert_eq!(file.data.as_deref(), Some("data:text/plain;base64,aGk="));
    /// assert_eq!(file.filename.as_deref(), Some("notes.txt"));
    /// ```
    #[must_use]
    pub fn from_bytes(filename: impl Into<String>, mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            data: Some(format!("data:{mime_type};base64,{}", BASE64.encode(bytes))),
            filename: Some(filename.into()),
            ..Self::default()
        }
    }
}

/// Inline base64 audio.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputAudio {
    pub format: AudioFormat,
    pub data: String,
}

impl InputAudio {
    #[must_use]
    pub fn new(format: AudioFormat, data: impl Into<String>) -> Self {
        Self {
            format,
            data: data.into(),
        }
    }

    /// Base64-encodes raw audio bytes.
    #[must_use]
    pub fn from_bytes(format: AudioFormat, bytes: &[u8]) -> Self {
        Self::new(format, BASE64.encode(bytes))
    }
}

/// One content part of an input message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputContent {
    Text(InputText),
    Image(InputImage),
    File(InputFile),
    Audio(InputAudio),
}

impl From<InputText> for InputContent {
    fn from(v: InputText) -> Self {
        Self::Text(v)
    }
}

impl From<InputImage> for InputContent {
    fn from(v: InputImage) -> Self {
        Self::Image(v)
    }
}

impl From<InputFile> for InputContent {
    fn from(v: InputFile) -> Self {
        Self::File(v)
    }
}

impl From<InputAudio> for InputContent {
    fn from(v: InputAudio) -> Self {
        Self::Audio(v)
    }
}

/// A content element of an easy-form message: a typed part, or a bare
/// string that stands for text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EasyContent {
    Part(InputContent),
    Text(String),
}

impl From<InputContent> for EasyContent {
    fn from(v: InputContent) -> Self {
        Self::Part(v)
    }
}

impl From<&str> for EasyContent {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for EasyContent {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// The nested `input_audio` object.
struct AudioPayload<'a>(&'a InputAudio);

impl Serialize for AudioPayload<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("data", &self.0.data)?;
        map.serialize_entry("format", &self.0.format)?;
        map.end()
    }
}

impl Serialize for InputAudio {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "input_audio")?;
        map.serialize_entry("input_audio", &AudioPayload(self))?;
        map.end()
    }
}

impl Serialize for InputContent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Text(v) => v.serialize(serializer),
            Self::Image(v) => v.serialize(serializer),
            Self::File(v) => v.serialize(serializer),
            Self::Audio(v) => v.serialize(serializer),
        }
    }
}

impl Serialize for EasyContent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Part(part) => part.serialize(serializer),
            Self::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl WireDecode for InputText {
    fn decode_at(value: &serde_json::Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("input_text", "InputContent")?;
        Ok(Self {
            text: obj.string("text")?,
        })
    }
}

impl WireDecode for InputImage {
    fn decode_at(value: &serde_json::Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("input_image", "InputContent")?;
        Ok(Self {
            detail: obj.enumeration("InputImage", "detail")?,
            url: obj.opt_string("image_url")?,
        })
    }
}

impl WireDecode for InputFile {
    fn decode_at(value: &serde_json::Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("input_file", "InputContent")?;
        Ok(Self {
            id: obj.opt_string("file_id")?,
            data: obj.opt_string("file_data")?,
            filename: obj.opt_string("filename")?,
            url: obj.opt_string("file_url")?,
        })
    }
}

impl WireDecode for InputAudio {
    fn decode_at(value: &serde_json::Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("input_audio", "InputContent")?;
        let payload_path = format!("{path}.input_audio");
        let payload = obj
            .get("input_audio")
            .ok_or_else(|| WireError::missing(path, "input_audio"))?;
        let payload = ObjectReader::new(payload, &payload_path)?;
        Ok(Self {
            format: payload.enumeration("InputAudio", "format")?,
            data: payload.string("data")?,
        })
    }
}

impl WireDecode for InputContent {
    fn decode_at(value: &serde_json::Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        match obj.discriminator()? {
            "input_text" => InputText::decode_at(value, path).map(Self::Text),
            "input_image" => InputImage::decode_at(value, path).map(Self::Image),
            "input_file" => InputFile::decode_at(value, path).map(Self::File),
            "input_audio" => InputAudio::decode_at(value, path).map(Self::Audio),
            other => Err(WireError::unknown_variant("InputContent", other)),
        }
    }
}

impl WireDecode for EasyContent {
    fn decode_at(value: &serde_json::Value, path: &str) -> Result<Self, WireError> {
        match value {
            serde_json::Value::String(text) => Ok(Self::Text(text.clone())),
            _ => InputContent::decode_at(value, path).map(Self::Part),
        }
    }
}

// =============================================================================
// Output Content
// =============================================================================

/// Cites a span of an uploaded file.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename = "file_citation")]
pub struct FileCitation {
    pub file_id: String,
    pub filename: String,
    #[serde(serialize_with = "serialize_finite")]
    pub index: f64,
}

/// Cites a web page for a span of the text.
///
/// Indices stay floating point to match whatever the provider emits.
/// NaN and infinities fail to encode.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename = "url_citation")]
pub struct UrlCitation {
    pub url: String,
    pub title: String,
    #[serde(serialize_with = "serialize_finite")]
    pub start_index: f64,
    #[serde(serialize_with = "serialize_finite")]
    pub end_index: f64,
}

/// Points at a file produced by a tool.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename = "file_path")]
pub struct FilePath {
    pub file_id: String,
    #[serde(serialize_with = "serialize_finite")]
    pub index: f64,
}

/// JSON has no literal for NaN or infinity, and `serde_json` would write `null`.
fn serialize_finite<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        Err(S::Error::custom(format!(
            "annotation index must be finite, got {value}"
        )))
    }
}

/// A citation attached to generated text.
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    FileCitation(FileCitation),
    UrlCitation(UrlCitation),
    FilePath(FilePath),
}

/// Generated text with optional annotations.
///
/// `annotations: Some(vec![])` and `None` are distinct: the former is emitted
/// as an empty array, the latter omits the key.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename = "output_text")]
pub struct OutputText {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<Annotation>>,
}

impl OutputText {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotations: None,
        }
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = Some(annotations);
        self
    }

    /// Iterates URL citations, skipping other annotation kinds.
    pub fn url_citations(&self) -> impl Iterator<Item = &UrlCitation> {
        self.annotations.iter().flatten().filter_map(|a| match a {
            Annotation::UrlCitation(c) => Some(c),
            _ => None,
        })
    }
}

/// The model declined to answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "refusal")]
pub struct Refusal {
    pub refusal: String,
}

impl Refusal {
    #[must_use]
    pub fn new(refusal: impl Into<String>) -> Self {
        Self {
            refusal: refusal.into(),
        }
    }
}

/// One content part of an assistant output message.
#[derive(Clone, Debug, PartialEq)]
pub enum OutputContent {
    Text(OutputText),
    Refusal(Refusal),
}

impl OutputContent {
    /// Returns the generated text if this is an `output_text` part.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(&t.text),
            Self::Refusal(_) => None,
        }
    }
}

impl From<OutputText> for OutputContent {
    fn from(v: OutputText) -> Self {
        Self::Text(v)
    }
}

impl From<Refusal> for OutputContent {
    fn from(v: Refusal) -> Self {
        Self::Refusal(v)
    }
}

impl Serialize for Annotation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::FileCitation(v) => v.serialize(serializer),
            Self::UrlCitation(v) => v.serialize(serializer),
            Self::FilePath(v) => v.serialize(serializer),
        }
    }
}

impl Serialize for OutputContent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Text(v) => v.serialize(serializer),
            Self::Refusal(v) => v.serialize(serializer),
        }
    }
}

impl WireDecode for Annotation {
    fn decode_at(value: &serde_json::Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        match obj.discriminator()? {
            "file_citation" => Ok(Self::FileCitation(FileCitation {
                file_id: obj.string("file_id")?,
                filename: obj.string("filename")?,
                index: obj.f64("index")?,
            })),
            "url_citation" => Ok(Self::UrlCitation(UrlCitation {
                url: obj.string("url")?,
                title: obj.string("title")?,
                start_index: obj.f64("start_index")?,
                end_index: obj.f64("end_index")?,
            })),
            "file_path" => Ok(Self::FilePath(FilePath {
                file_id: obj.string("file_id")?,
                index: obj.f64("index")?,
            })),
            other => Err(WireError::unknown_variant("Annotation", other)),
        }
    }
}

impl WireDecode for OutputText {
    fn decode_at(value: &serde_json::Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("output_text", "OutputContent")?;
        Ok(Self {
            text: obj.string("text")?,
            annotations: obj.opt_list("annotations")?,
        })
    }
}

impl WireDecode for Refusal {
    fn decode_at(value: &serde_json::Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        obj.expect_type("refusal", "OutputContent")?;
        Ok(Self {
            refusal: obj.string("refusal")?,
        })
    }
}

impl WireDecode for OutputContent {
    fn decode_at(value: &serde_json::Value, path: &str) -> Result<Self, WireError> {
        let obj = ObjectReader::new(value, path)?;
        match obj.discriminator()? {
            "output_text" => OutputText::decode_at(value, path).map(Self::Text),
            "refusal" => Refusal::decode_at(value, path).map(Self::Refusal),
            other => Err(WireError::unknown_variant("OutputContent", other)),
        }
    }
}

deserialize_via_wire!(
    InputText,
    InputImage,
    InputFile,
    InputAudio,
    InputContent,
    EasyContent,
    Annotation,
    OutputText,
    Refusal,
    OutputContent,
);
