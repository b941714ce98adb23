// Error types for the resolution pipeline

use std::fmt;

#[derive(Debug, Clone)]
pub enum PipelineError {
    /// No API key configured; no network call was attempted
    MissingApiKey,

    /// Network or HTTP failure while talking to the catalog API
    Transport(String),

    /// Response did not match the expected endpoint schema
    Parse(String),

    /// Selection store I/O failure
    Storage(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(
                f,
                "No API key configured. Set the YT_API_KEY environment variable."
            ),
            Self::Transport(msg) => write!(f, "Transport error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<reqwest::Error> for PipelineError {
    fn from(e: reqwest::Error) -> Self {
        // A body that fails to decode is a schema problem, not an outage
        if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
