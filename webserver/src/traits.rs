//! Service trait definitions for dependency injection
//!
//! Authentication itself lives outside this service; the HTTP layer
//! only needs to resolve request headers into a caller identity with
//! a role.

use axum::http::HeaderMap;
use shared::Role;

use crate::error::WebServerResult;

/// The resolved identity of an authenticated caller
#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

/// Caller identity resolution
#[mockall::automock]
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve the request headers into a caller identity
    ///
    /// # Returns
    /// `None` when the request carries no usable credentials; an
    /// error only when the lookup itself failed.
    async fn authenticate(&self, headers: &HeaderMap) -> WebServerResult<Option<AuthenticatedUser>>;
}
