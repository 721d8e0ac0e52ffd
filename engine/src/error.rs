//! Engine-specific error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Upstream fetch failed: {message}")]
    UpstreamFetch { message: String },

    #[error("Datastore write failed in '{collection}': {message}")]
    Persistence { collection: String, message: String },

    #[error("Stored document could not be decoded: {message}")]
    Decode { message: String },

    #[error("Configuration error: {field}")]
    Configuration { field: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::UpstreamFetch { message: message.into() }
    }

    pub fn persistence(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Persistence {
            collection: collection.into(),
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode { message: message.into() }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
