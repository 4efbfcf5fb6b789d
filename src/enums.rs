//! Closed string enumerations used on the wire.
//!
//! Every enumeration maps one-to-one onto a fixed table of literals. Decoding
//! a literal outside the table fails with [`WireError::UnknownEnumValue`]
//! naming the field it came from; there is no catch-all variant.

use crate::errors::WireError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A closed enumeration with a fixed wire literal per variant.
pub trait WireEnum: Sized + Copy + 'static {
    /// Name used in error messages when no field context is available.
    const NAME: &'static str;

    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// The wire literal for this variant.
    fn as_str(self) -> &'static str;

    /// Looks up the variant for `raw`, reporting `enum_name` on failure.
    ///
    /// `enum_name` is usually the dotted field path (`WebSearchCall.status`)
    /// so that the error points at where the bad literal was found.
    fn from_wire(raw: &str, enum_name: &str) -> Result<Self, WireError> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == raw)
            .ok_or_else(|| WireError::UnknownEnumValue {
                enum_name: enum_name.to_string(),
                value: raw.to_string(),
            })
    }
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $lit:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl WireEnum for $name {
            const NAME: &'static str = stringify!($name);
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $lit,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = WireError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_wire(s, Self::NAME)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Detail level requested for an input image.
    ImageDetail {
        Auto => "auto",
        High => "high",
        Low => "low",
    }
}

wire_enum! {
    /// Encoding of inline input audio.
    AudioFormat {
        Mp3 => "mp3",
        Wav => "wav",
    }
}

wire_enum! {
    /// Provider family that produced an opaque reasoning trace.
    ReasoningFormat {
        Unknown => "unknown",
        OpenAiResponseV1 => "openai-response-v1",
        XaiResponseV1 => "xai-response-v1",
        AnthropicClaudeV1 => "anthropic-claude-v1",
        GoogleGeminiV1 => "google-gemini-v1",
    }
}

wire_enum! {
    /// Lifecycle of reasoning items, messages and function calls.
    ItemStatus {
        Completed => "completed",
        Incomplete => "incomplete",
        InProgress => "in_progress",
    }
}

wire_enum! {
    /// Author of an easy-form input message.
    EasyMessageRole {
        User => "user",
        System => "system",
        Assistant => "assistant",
        Developer => "developer",
    }
}

wire_enum! {
    /// Author of a response-shaped input message item. Assistant turns are
    /// echoed as output messages instead.
    InputMessageRole {
        User => "user",
        System => "system",
        Developer => "developer",
    }
}

wire_enum! {
    /// Lifecycle of a web or file search tool call.
    SearchCallStatus {
        Completed => "completed",
        Searching => "searching",
        InProgress => "in_progress",
        Failed => "failed",
    }
}

wire_enum! {
    /// Lifecycle of an image generation tool call.
    ImageGenerationStatus {
        InProgress => "in_progress",
        Completed => "completed",
        Generating => "generating",
        Failed => "failed",
    }
}
