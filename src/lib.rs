//! tinysocks Library
//!
//! Minimal SOCKS5 proxy: no-auth handshake, CONNECT requests over IPv4 or
//! domain names, and a full-duplex relay between client and destination.

pub mod config;
pub mod connection;
pub mod protocol;
pub mod relay;
pub mod shutdown;

pub use config::Config;
pub use connection::ConnectionManager;
pub use protocol::ProxyError;

/// Common error type for process-level code
pub type Result<T> = anyhow::Result<T>;
