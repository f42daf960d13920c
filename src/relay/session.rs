//! Relay Session

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::Direction;

/// Byte counters and timing for one proxied session.
///
/// Shared by the two relay tasks through an `Arc`; when the last one lets go
/// the completion line is logged.
#[derive(Debug)]
pub struct RelaySession {
    pub session_id: String,
    pub client_addr: SocketAddr,
    pub destination: String,
    pub start_time: Instant,
    pub bytes_up: AtomicU64,
    pub bytes_down: AtomicU64,
}

/// Snapshot of a session's counters
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionStats {
    pub session_id: String,
    pub client_addr: SocketAddr,
    pub destination: String,
    pub duration_ms: u64,
    pub bytes_up: u64,
    pub bytes_down: u64,
    pub total_bytes: u64,
}

impl RelaySession {
    /// Create a new relay session
    pub fn new(session_id: String, client_addr: SocketAddr, destination: String) -> Self {
        debug!(
            "Creating new relay session: {} ({} -> {})",
            session_id, client_addr, destination
        );

        Self {
            session_id,
            client_addr,
            destination,
            start_time: Instant::now(),
            bytes_up: AtomicU64::new(0),
            bytes_down: AtomicU64::new(0),
        }
    }

    /// Get bytes transferred upstream (client to destination)
    pub fn bytes_up(&self) -> u64 {
        self.bytes_up.load(Ordering::Relaxed)
    }

    /// Get bytes transferred downstream (destination to client)
    pub fn bytes_down(&self) -> u64 {
        self.bytes_down.load(Ordering::Relaxed)
    }

    pub fn total_bytes(&self) -> u64 {
        self.bytes_up() + self.bytes_down()
    }

    pub fn duration(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    /// Add relayed bytes to the counter for `direction`
    pub fn add_bytes(&self, direction: Direction, bytes: u64) {
        match direction {
            Direction::Upstream => self.bytes_up.fetch_add(bytes, Ordering::Relaxed),
            Direction::Downstream => self.bytes_down.fetch_add(bytes, Ordering::Relaxed),
        };
    }

    pub fn to_stats(&self) -> ConnectionStats {
        ConnectionStats {
            session_id: self.session_id.clone(),
            client_addr: self.client_addr,
            destination: self.destination.clone(),
            duration_ms: self.duration().as_millis() as u64,
            bytes_up: self.bytes_up(),
            bytes_down: self.bytes_down(),
            total_bytes: self.total_bytes(),
        }
    }

    /// Log session statistics
    pub fn log_stats(&self) {
        let stats = self.to_stats();
        info!(
            session_id = %stats.session_id,
            client_addr = %stats.client_addr,
            destination = %stats.destination,
            duration_ms = stats.duration_ms,
            bytes_up = stats.bytes_up,
            bytes_down = stats.bytes_down,
            total_bytes = stats.total_bytes,
            "Relay session completed"
        );

        match serde_json::to_string(&stats) {
            Ok(json) => debug!(stats = %json, "Relay session stats"),
            Err(e) => warn!("Failed to serialize stats for {}: {}", stats.session_id, e),
        }
    }
}

impl Drop for RelaySession {
    fn drop(&mut self) {
        self.log_stats();
    }
}
