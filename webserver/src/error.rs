//! WebServer-specific error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Authentication lookup failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Invalid request format: {details}")]
    InvalidRequest { details: String },

    #[error("Engine error: {0}")]
    Engine(#[from] engine::EngineError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WebServerResult<T> = Result<T, WebServerError>;
