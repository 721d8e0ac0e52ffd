//! Gateway-trusting authenticator
//!
//! This service runs behind an API gateway that performs the actual
//! session validation and forwards the caller's email in the
//! `x-user-email` header. The authenticator only resolves that email
//! to a stored account to learn its id and role.

use axum::http::HeaderMap;
use engine::core::model::{self, User, USERS};
use engine::{Datastore, Document};
use serde_json::json;
use tracing::debug;

use crate::error::{WebServerError, WebServerResult};
use crate::traits::{AuthenticatedUser, Authenticator};

/// Header set by the gateway after session validation
pub const USER_EMAIL_HEADER: &str = "x-user-email";

#[derive(Clone)]
pub struct GatewayAuthenticator<D: Datastore> {
    store: D,
}

impl<D: Datastore> GatewayAuthenticator<D> {
    pub fn new(store: D) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<D: Datastore> Authenticator for GatewayAuthenticator<D> {
    async fn authenticate(&self, headers: &HeaderMap) -> WebServerResult<Option<AuthenticatedUser>> {
        let Some(email) = headers.get(USER_EMAIL_HEADER).and_then(|v| v.to_str().ok()) else {
            return Ok(None);
        };

        let mut filter = Document::new();
        filter.insert("email".to_string(), json!(email));
        let found = self
            .store
            .find_one(USERS, filter)
            .await
            .map_err(|e| WebServerError::AuthenticationFailed { message: e.to_string() })?;

        let Some((user_id, fields)) = found else {
            debug!(email, "no account for authenticated email");
            return Ok(None);
        };

        let user: User = model::from_document(fields)
            .map_err(|e| WebServerError::AuthenticationFailed { message: e.to_string() })?;

        Ok(Some(AuthenticatedUser {
            user_id,
            email: user.email,
            role: user.role,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::services::MemoryDatastore;
    use shared::Role;

    fn teacher_doc(email: &str) -> Document {
        let mut doc = Document::new();
        doc.insert("email".to_string(), json!(email));
        doc.insert("displayName".to_string(), json!("Ms. Rivera"));
        doc.insert("role".to_string(), json!("teacher"));
        doc.insert("isActive".to_string(), json!(true));
        doc
    }

    #[tokio::test]
    async fn test_missing_header_is_anonymous() {
        let authenticator = GatewayAuthenticator::new(MemoryDatastore::new());
        let result = authenticator.authenticate(&HeaderMap::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_known_email_resolves_role() {
        let store = MemoryDatastore::new();
        let id = store.insert(USERS, teacher_doc("rivera@school.edu")).await.unwrap();

        let authenticator = GatewayAuthenticator::new(store);
        let mut headers = HeaderMap::new();
        headers.insert(USER_EMAIL_HEADER, "rivera@school.edu".parse().unwrap());

        let user = authenticator.authenticate(&headers).await.unwrap().unwrap();
        assert_eq!(user.user_id, id);
        assert_eq!(user.role, Role::Teacher);
    }

    #[tokio::test]
    async fn test_unknown_email_is_anonymous() {
        let authenticator = GatewayAuthenticator::new(MemoryDatastore::new());
        let mut headers = HeaderMap::new();
        headers.insert(USER_EMAIL_HEADER, "ghost@school.edu".parse().unwrap());

        let result = authenticator.authenticate(&headers).await.unwrap();
        assert!(result.is_none());
    }
}
