//! # Generative Model Access
//!
//! The suggestion features talk to a text/vision completion service through
//! the [`CompletionModel`] trait. A request carries the rendered prompt, an
//! optional inline image and the JSON schema the answer must follow; the
//! model answers with a JSON value that the flows in [`flows`] check against
//! the shape they expect.
//!
//! Two implementations exist: [`gemini::GeminiModel`] for the hosted API and
//! [`simulated::SimulatedModel`], which returns fixed placeholder answers
//! when no API key is configured.

pub mod flows;
pub mod gemini;
pub mod media;
pub mod prompts;
pub mod simulated;
pub mod vss_prompts;

use async_trait::async_trait;
use media::InlineMedia;
use serde_json::Value;
use thiserror::Error;

/// Which flow issued a request. Lets the simulated model pick its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    DetectionTargets,
    AlertEvents,
    GroupAlertEvents,
    SceneDescription,
    CameraFeedAnalysis,
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub kind: PromptKind,
    pub prompt: String,
    pub media: Option<InlineMedia>,
    /// JSON schema of the expected answer.
    pub response_schema: Value,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0}")]
    Request(reqwest::Error),
    #[error("model API returned {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("model returned no content")]
    EmptyResponse,
    #[error("model output is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Unavailable(String),
}

// Request errors never carry the request URL.
impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        ModelError::Request(err.without_url())
    }
}

#[async_trait]
pub trait CompletionModel: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: CompletionRequest) -> Result<Value, ModelError>;
}
