//! HTTP layer for OpenRouter communication.

pub(crate) mod common;
pub(crate) mod error_helpers;
pub(crate) mod loud_wire;
pub(crate) mod transport;
