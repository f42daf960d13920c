//! SOCKS5 Protocol Implementation
//!
//! This module contains the greeting, request and reply handling for the
//! no-auth CONNECT subset of SOCKS5.

pub mod constants;
pub mod error;
pub mod frame;
pub mod handler;
pub mod types;

pub use constants::*;
pub use error::{ProxyError, ProxyResult};
pub use handler::Socks5Handler;
pub use types::*;
