//! Data Relay Module
//!
//! Dials the destination and relays data bidirectionally between client and
//! destination.

pub mod close;
pub mod connector;
pub mod engine;
pub mod session;

pub use close::CloseHandle;
pub use connector::{connect_to_target, establish};
pub use engine::{relay, spawn_relays, RelayEnd};
pub use session::{ConnectionStats, RelaySession};

/// Which way a relay task copies bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Client to destination
    Upstream,
    /// Destination to client
    Downstream,
}
