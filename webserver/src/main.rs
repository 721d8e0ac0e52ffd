//! Main entry point for the roster sync server
//!
//! Wires the real services together: the Google Sheets submission
//! source, the document datastore adapter, and the gateway-trusting
//! authenticator.

use clap::Parser;
use std::net::SocketAddr;

use engine::core::model::{self, User, USERS};
use engine::services::{MemoryDatastore, SheetsSubmissionSource};
use engine::{Datastore, SyncEngine};
use shared::{logging, Role};
use webserver::services::GatewayAuthenticator;
use webserver::{RosterServer, WebServerError, WebServerResult};

/// Roster sync backend for the education platform
#[derive(Parser)]
#[command(name = "webserver")]
#[command(about = "Syncs classrooms and students from spreadsheet submissions")]
pub struct Args {
    /// Server bind address
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind_addr: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Google Sheets API key
    #[arg(long, env = "SHEETS_API_KEY")]
    pub sheets_api_key: Option<String>,

    /// Sheet range to read (defaults to the form responses tab)
    #[arg(long)]
    pub sheets_range: Option<String>,

    /// Seed a teacher account for local runs (email address)
    #[arg(long)]
    pub seed_teacher_email: Option<String>,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup("roster sync server");

    let bind_addr: SocketAddr = args
        .bind_addr
        .parse()
        .map_err(|e| WebServerError::ServerStartup(format!("invalid bind address: {e}")))?;

    let api_key = args.sheets_api_key.ok_or_else(|| {
        WebServerError::ServerStartup("SHEETS_API_KEY is required (flag --sheets-api-key or env)".to_string())
    })?;
    let mut source = SheetsSubmissionSource::new(api_key);
    if let Some(range) = args.sheets_range {
        source = source.with_range(range);
    }

    // The datastore adapter is deployment-specific; the in-memory
    // store backs local runs and tests.
    let store = MemoryDatastore::new();
    if let Some(email) = args.seed_teacher_email {
        seed_teacher(&store, &email).await?;
        logging::log_success(&format!("seeded teacher account for {email}"));
    }

    let engine = SyncEngine::new(source, store.clone());
    let authenticator = GatewayAuthenticator::new(store);

    let server = RosterServer::new(bind_addr, authenticator, engine);
    server.run().await?;

    logging::log_success("roster sync server stopped gracefully");
    Ok(())
}

async fn seed_teacher(store: &MemoryDatastore, email: &str) -> WebServerResult<()> {
    let teacher = User {
        email: email.to_string(),
        display_name: email.split('@').next().unwrap_or(email).to_string(),
        role: Role::Teacher,
        classroom_ids: Vec::new(),
        is_active: true,
    };
    store.insert(USERS, model::to_document(&teacher)?).await?;
    Ok(())
}
