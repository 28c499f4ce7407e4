//! HTTP handlers, one module per feature area.

pub mod auth;
pub mod explore;
pub mod practice;
pub mod progress;
pub mod quiz;
pub mod session;
pub mod solve;

use serde::Serialize;

/// Body for features that answer with one generated text.
#[derive(Debug, Serialize)]
pub struct TextReply {
    pub content: String,
}

impl From<String> for TextReply {
    fn from(content: String) -> Self {
        Self { content }
    }
}
