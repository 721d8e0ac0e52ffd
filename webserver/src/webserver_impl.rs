//! Main webserver implementation
//!
//! The RosterServer wires the authenticator and the sync engine into
//! an axum router. The sync handler never surfaces an exception: the
//! engine's report is mapped onto 200/207/500, and the boundary
//! checks (role, request shape) short-circuit with 403/400.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use shared::{Role, SyncReport};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use engine::{Datastore, SubmissionSource, SyncEngine};

use crate::error::{WebServerError, WebServerResult};
use crate::state::ServerState;
use crate::traits::Authenticator;

/// Main server struct with dependency injection
pub struct RosterServer<A, S, D>
where
    A: Authenticator,
    S: SubmissionSource,
    D: Datastore,
{
    state: Arc<ServerState>,
    authenticator: Arc<A>,
    engine: Arc<SyncEngine<S, D>>,
}

// Manual Clone: the derived impl would demand Clone on A, S, D.
impl<A, S, D> Clone for RosterServer<A, S, D>
where
    A: Authenticator,
    S: SubmissionSource,
    D: Datastore,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            authenticator: self.authenticator.clone(),
            engine: self.engine.clone(),
        }
    }
}

impl<A, S, D> RosterServer<A, S, D>
where
    A: Authenticator + Send + Sync + 'static,
    S: SubmissionSource + Send + Sync + 'static,
    D: Datastore + Send + Sync + 'static,
{
    /// Create a new server with injected dependencies
    pub fn new(bind_address: SocketAddr, authenticator: A, engine: SyncEngine<S, D>) -> Self {
        Self {
            state: Arc::new(ServerState::new(bind_address)),
            authenticator: Arc::new(authenticator),
            engine: Arc::new(engine),
        }
    }

    /// Build the axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/classrooms/sync-from-sheets", post(sync_from_sheets_handler))
            .route("/health", get(health_handler))
            .layer(ServiceBuilder::new().layer(CorsLayer::permissive()).into_inner())
            .with_state(self.clone())
    }

    /// Bind and serve until shutdown
    pub async fn run(&self) -> WebServerResult<()> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(self.state.bind_address)
            .await
            .map_err(|e| {
                WebServerError::ServerStartup(format!("failed to bind to {}: {e}", self.state.bind_address))
            })?;

        info!(address = %self.state.bind_address, "roster sync server listening");

        tokio::select! {
            result = async { axum::serve(listener, router).await } => {
                result.map_err(|e| WebServerError::ServerStartup(e.to_string()))?;
            }
            _ = tokio::signal::ctrl_c() => {
                shared::logging::log_shutdown("received Ctrl+C signal");
            }
        }

        Ok(())
    }

    /// Get server state for external access
    pub fn state(&self) -> &Arc<ServerState> {
        &self.state
    }
}

fn counts_json(report: &SyncReport) -> Value {
    json!({
        "classroomsCreated": report.classrooms_created,
        "classroomsUpdated": report.classrooms_updated,
        "studentsCreated": report.students_created,
        "studentsUpdated": report.students_updated,
    })
}

/// Sync a teacher's roster from their spreadsheet source
async fn sync_from_sheets_handler<A, S, D>(
    State(server): State<RosterServer<A, S, D>>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> (StatusCode, Json<Value>)
where
    A: Authenticator + Send + Sync + 'static,
    S: SubmissionSource + Send + Sync + 'static,
    D: Datastore + Send + Sync + 'static,
{
    let caller = match server.authenticator.authenticate(&headers).await {
        Ok(caller) => caller,
        Err(e) => {
            error!(error = %e, "authentication lookup failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Failed to sync classrooms from sheets",
                    "details": e.to_string(),
                })),
            );
        }
    };

    let teacher = match caller {
        Some(user) if user.role == Role::Teacher => user,
        _ => {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "success": false,
                    "error": "Only teachers can sync classrooms from sheets",
                })),
            );
        }
    };

    let source_id = body
        .as_ref()
        .and_then(|json| json.0.get("sourceId"))
        .and_then(|v| v.as_str());
    let Some(source_id) = source_id else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "sourceId is required and must be a string",
            })),
        );
    };

    let report = server.engine.sync_from_sheets(&teacher.user_id, source_id).await;

    if report.success {
        let mut data = counts_json(&report);
        data["totalErrors"] = json!(0);
        let classrooms = report.classrooms_created + report.classrooms_updated;
        let students = report.students_created + report.students_updated;
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": data,
                "message": format!("Successfully synced {classrooms} classrooms and {students} students"),
            })),
        )
    } else if report.total_synced() > 0 {
        let mut data = counts_json(&report);
        data["errors"] = json!(report.errors);
        (
            StatusCode::MULTI_STATUS,
            Json(json!({
                "success": false,
                "data": data,
                "error": "Sync completed with some errors. Check the errors array for details.",
            })),
        )
    } else {
        // Nothing synced at all: the fetch aborted or every entity
        // failed, either way the caller gets the generic failure.
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "error": "Failed to sync classrooms from sheets",
                "details": report.errors.join("; "),
            })),
        )
    }
}

/// Health check endpoint
async fn health_handler<A, S, D>(State(server): State<RosterServer<A, S, D>>) -> Json<Value>
where
    A: Authenticator + Send + Sync + 'static,
    S: SubmissionSource + Send + Sync + 'static,
    D: Datastore + Send + Sync + 'static,
{
    Json(json!({
        "status": "healthy",
        "uptime_seconds": server.state.get_uptime_seconds(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
