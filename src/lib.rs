//! Typed model and JSON codec for the OpenRouter Responses API.
//!
//! Requests are built from [`Request`] and [`InputItem`]s and encoded with
//! serde; responses decode into [`Response`] and [`OutputItem`]s. Decoding is
//! strict: an unknown `type` discriminator, an enumeration literal outside its
//! closed set, or a missing required field fails with a [`WireError`] that
//! names the offending location.
//!
//! ```
//! use openrouter_responses::{OutputItem, Response};
//!
//! let body = r#"{"output": [{
//!     "type": "message", "id": "m1", "role": "assistant",
//!     "content": [{"type": "output_text", "text": "Hello!"}]
//! }]}"#;
//! let response = Response::from_body(body).unwrap();
//! assert_eq!(response.output_text().as_deref(), Some("Hello!"));
//! assert!(matches!(response.items()[0], OutputItem::Message(_)));
//! ```
//!
//! [`Client`] sends requests over HTTP. Set `LOUD_WIRE=1` to pretty-print
//! every request and response body to stderr.

mod client;
mod content;
mod enums;
mod errors;
mod http;
mod items;
mod request;
mod response;
mod wire;

#[cfg(test)]
mod request_tests;
#[cfg(test)]
mod response_tests;

pub use client::{API_KEY_ENV, Client, ClientBuilder};
pub use content::{
    Annotation, EasyContent, FileCitation, FilePath, InputAudio, InputContent, InputFile,
    InputImage, InputText, OutputContent, OutputText, Refusal, UrlCitation,
};
pub use enums::{
    AudioFormat, EasyMessageRole, ImageDetail, ImageGenerationStatus, InputMessageRole,
    ItemStatus, ReasoningFormat, SearchCallStatus, WireEnum,
};
pub use errors::{OpenRouterError, WireError};
pub use http::common::{DEFAULT_BASE_URL, Endpoint};
pub use http::transport::{HttpTransport, Transport};
pub use items::{
    EasyInputMessage, FileSearchCall, FunctionCallOutput, FunctionToolCall, ImageGenerationCall,
    InputMessageItem, OutputFunctionCall, OutputMessage, OutputReasoning, Reasoning,
    WebSearchCall,
};
pub use request::{InputItem, Request, RequestInput};
pub use response::{OutputItem, Response};
pub use wire::WireDecode;
