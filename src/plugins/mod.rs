//! External tag sources
//!
//! A tag source turns free text into vocabulary tags somewhere outside this
//! process, typically a hosted language model. Sources report failures as
//! [`TagSourceError`]; the extractor decides what to do with them.

pub mod chat_completion;

pub use chat_completion::ChatCompletionTagSource;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Payload a tag source is expected to produce
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExternalTags {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Error)]
pub enum TagSourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("tag source returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("tag source timed out after {0} seconds")]
    Timeout(u64),

    #[error("response had no message content")]
    EmptyContent,

    #[error("no JSON object found in response content")]
    NoJsonObject,

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tag source returned no tags")]
    EmptyTags,
}

/// Remote stage of tag extraction
#[async_trait]
pub trait TagSource: Send + Sync {
    /// Human readable provider name
    fn provider(&self) -> &str;

    /// Model or backend identifier
    fn model(&self) -> &str;

    async fn fetch_tags(&self, input: &str) -> Result<ExternalTags, TagSourceError>;
}
