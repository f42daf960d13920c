//! Configuration Module
//!
//! The listen address is an explicit value handed to the connection manager.

pub mod manager;
pub mod types;

pub use manager::ConfigManager;
pub use types::*;
