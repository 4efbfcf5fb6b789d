//! Common test utilities shared across integration test files.
//!
//! Usage in test files:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

use async_trait::async_trait;
use openrouter_responses::{Client, OpenRouterError, Transport};
use std::sync::{Arc, Mutex};

/// A request the mock transport received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub url: String,
    pub body: Option<String>,
}

/// Canned reply for the mock transport.
#[derive(Debug, Clone)]
pub enum Reply {
    Body(String),
    Status(u16, String),
}

/// In-memory [`Transport`] that records calls and replays a fixed reply.
#[derive(Debug)]
pub struct MockTransport {
    reply: Reply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn replying(body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Body(body.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    #[allow(dead_code)]
    pub fn failing(status: u16, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Status(status, body.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, call: RecordedCall) -> Result<String, OpenRouterError> {
        self.calls.lock().unwrap().push(call);
        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Status(status, message) => Err(OpenRouterError::Api {
                status_code: Some(*status),
                message: message.clone(),
                code: None,
            }),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, url: &str, body: String) -> Result<String, OpenRouterError> {
        self.respond(RecordedCall {
            method: "POST",
            url: url.to_string(),
            body: Some(body),
        })
    }

    async fn get(&self, url: &str) -> Result<String, OpenRouterError> {
        self.respond(RecordedCall {
            method: "GET",
            url: url.to_string(),
            body: None,
        })
    }
}

/// Builds a client that talks to `transport` instead of the network.
pub fn mock_client(transport: Arc<MockTransport>) -> Client {
    Client::builder("test-key")
        .transport(transport)
        .build()
        .expect("client with custom transport always builds")
}
