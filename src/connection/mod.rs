//! Connection Management
//!
//! Accept loop and the per-connection setup pipeline.

pub mod manager;

pub use manager::ConnectionManager;
