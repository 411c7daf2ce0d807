use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// LLM Errors
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Failed to get API key: could not determine home directory. Set HOME or API_KEY.")]
    HomeDirUnavailable,
    #[error("Failed to get API key: cannot read key file {}: {source}", path.display())]
    KeyFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read stdin: {0}")]
    StdinRead(#[source] std::io::Error),
    #[error("Failed to generate response: {0}")]
    RequestFailed(#[from] RequestError),
    #[error("No response received")]
    EmptyResponse,
    #[error("Refusing to send a prompt with no parts.")]
    EmptyPrompt,
    #[error(transparent)]
    Output(#[from] std::io::Error),
}

impl LlmError {
    /// Everything except a missing answer ends the process with a failure.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, LlmError::EmptyResponse)
    }
}

/// Failures talking to the generative-text API
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("API returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}
