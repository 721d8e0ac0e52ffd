//! HTTP surface for the roster sync service
//!
//! Exposes the sync endpoint consumed by the teacher dashboard. All
//! real work happens in the engine crate; this layer authenticates
//! the caller, validates the request shape, and maps the sync report
//! onto HTTP status codes.

pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod webserver_impl;

pub use error::{WebServerError, WebServerResult};
pub use state::ServerState;
pub use traits::{AuthenticatedUser, Authenticator};
pub use webserver_impl::RosterServer;
