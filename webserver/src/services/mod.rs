//! Real service implementations

pub mod auth;

pub use auth::GatewayAuthenticator;
