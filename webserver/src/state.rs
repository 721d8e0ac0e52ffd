//! Server runtime state

use std::net::SocketAddr;
use std::time::Instant;

/// State shared across request handlers
#[derive(Debug)]
pub struct ServerState {
    pub bind_address: SocketAddr,
    server_start_time: Instant,
}

impl ServerState {
    pub fn new(bind_address: SocketAddr) -> Self {
        Self {
            bind_address,
            server_start_time: Instant::now(),
        }
    }

    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }
}
