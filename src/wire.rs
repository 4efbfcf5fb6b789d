//! Helpers shared by every typed decoder.
//!
//! Decoders never index into `serde_json::Value` directly. They go through
//! [`ObjectReader`], which knows the JSONPath of the object it wraps so that
//! every [`WireError`] points at the offending location.

use crate::enums::WireEnum;
use crate::errors::WireError;
use serde_json::{Map, Value};

/// A type that can be rebuilt from its wire JSON.
pub trait WireDecode: Sized {
    /// Decodes `value`, which lives at `path` in the enclosing document.
    fn decode_at(value: &Value, path: &str) -> Result<Self, WireError>;

    /// Decodes a standalone JSON value (path `$`).
    fn from_json(value: &Value) -> Result<Self, WireError> {
        Self::decode_at(value, "$")
    }
}

/// Read-only view over a JSON object that tracks its location.
pub(crate) struct ObjectReader<'a> {
    map: &'a Map<String, Value>,
    path: &'a str,
}

impl<'a> ObjectReader<'a> {
    pub(crate) fn new(value: &'a Value, path: &'a str) -> Result<Self, WireError> {
        match value {
            Value::Object(map) => Ok(Self { map, path }),
            _ => Err(WireError::mismatch(path, "object")),
        }
    }

    pub(crate) fn path(&self) -> &str {
        self.path
    }

    /// Returns the value under `field`, treating JSON `null` as absent.
    pub(crate) fn get(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    pub(crate) fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    fn required(&self, field: &str) -> Result<&'a Value, WireError> {
        self.get(field)
            .ok_or_else(|| WireError::missing(self.path, field))
    }

    fn field_path(&self, field: &str) -> String {
        format!("{}.{}", self.path, field)
    }

    /// Reads the `type` discriminator.
    pub(crate) fn discriminator(&self) -> Result<&'a str, WireError> {
        self.str("type")
    }

    /// Checks that the discriminator is exactly `expected`.
    ///
    /// Used by leaf decoders so that decoding a leaf on its own still rejects
    /// an object of a different kind.
    pub(crate) fn expect_type(&self, expected: &str, owner: &'static str) -> Result<(), WireError> {
        match self.discriminator()? {
            t if t == expected => Ok(()),
            other => Err(WireError::unknown_variant(owner, other)),
        }
    }

    pub(crate) fn str(&self, field: &str) -> Result<&'a str, WireError> {
        let value = self.required(field)?;
        value
            .as_str()
            .ok_or_else(|| WireError::mismatch(&self.field_path(field), "string"))
    }

    pub(crate) fn string(&self, field: &str) -> Result<String, WireError> {
        self.str(field).map(str::to_string)
    }

    pub(crate) fn opt_string(&self, field: &str) -> Result<Option<String>, WireError> {
        if self.contains(field) {
            self.string(field).map(Some)
        } else {
            Ok(None)
        }
    }

    pub(crate) fn f64(&self, field: &str) -> Result<f64, WireError> {
        let value = self.required(field)?;
        value
            .as_f64()
            .ok_or_else(|| WireError::mismatch(&self.field_path(field), "number"))
    }

    pub(crate) fn array(&self, field: &str) -> Result<&'a Vec<Value>, WireError> {
        let value = self.required(field)?;
        value
            .as_array()
            .ok_or_else(|| WireError::mismatch(&self.field_path(field), "array"))
    }

    pub(crate) fn opt_array(&self, field: &str) -> Result<Option<&'a Vec<Value>>, WireError> {
        if self.contains(field) {
            self.array(field).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Reads an array of strings, such as file search queries.
    pub(crate) fn string_list(&self, field: &str) -> Result<Vec<String>, WireError> {
        self.array(field)?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_str().map(str::to_string).ok_or_else(|| {
                    WireError::mismatch(&format!("{}[{}]", self.field_path(field), i), "string")
                })
            })
            .collect()
    }

    /// Decodes every element of a required array.
    pub(crate) fn list<T: WireDecode>(&self, field: &str) -> Result<Vec<T>, WireError> {
        let items = self.array(field)?;
        decode_elements(items, &self.field_path(field))
    }

    /// Decodes every element of an optional array.
    pub(crate) fn opt_list<T: WireDecode>(&self, field: &str) -> Result<Option<Vec<T>>, WireError> {
        match self.opt_array(field)? {
            Some(items) => decode_elements(items, &self.field_path(field)).map(Some),
            None => Ok(None),
        }
    }

    /// Reads a required enumeration; `owner` names the record for error messages.
    pub(crate) fn enumeration<E: WireEnum>(&self, owner: &str, field: &str) -> Result<E, WireError> {
        let raw = self.str(field)?;
        E::from_wire(raw, &format!("{owner}.{field}"))
    }

    pub(crate) fn opt_enumeration<E: WireEnum>(
        &self,
        owner: &str,
        field: &str,
    ) -> Result<Option<E>, WireError> {
        if self.contains(field) {
            self.enumeration(owner, field).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Decodes each element of `items`, located at `path`, in order.
pub(crate) fn decode_elements<T: WireDecode>(
    items: &[Value],
    path: &str,
) -> Result<Vec<T>, WireError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| T::decode_at(item, &format!("{path}[{i}]")))
        .collect()
}

/// Implements `serde::Deserialize` on top of [`WireDecode`].
///
/// The input is buffered into a `serde_json::Value` first, then handed to the
/// typed decoder; any [`WireError`] becomes a custom deserializer error.
macro_rules! deserialize_via_wire {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                    <$ty as $crate::wire::WireDecode>::from_json(&value)
                        .map_err(serde::de::Error::custom)
                }
            }
        )+
    };
}

pub(crate) use deserialize_via_wire;
