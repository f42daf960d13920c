//! Session error taxonomy
//!
//! Every variant is local to one proxied session. The handler logs it and
//! closes the session's sockets; nothing here is fatal to the process.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// The stream ended before a complete frame arrived.
    #[error("short read: expected {expected} bytes, got {received}")]
    ShortRead { expected: usize, received: usize },

    #[error("handshake failed: {0}")]
    Handshake(#[source] Box<ProxyError>),

    #[error("unsupported request: version {version}, command {command:#04x}")]
    UnsupportedRequest { version: u8, command: u8 },

    #[error("unsupported address type: {0:#04x}")]
    UnsupportedAddressFamily(u8),

    #[error("hostname is not valid UTF-8")]
    InvalidHostname,

    #[error("failed to dial {destination}: {source}")]
    Dial {
        destination: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write reply: {0}")]
    Write(#[source] io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias for session-level operations
pub type ProxyResult<T> = std::result::Result<T, ProxyError>;

impl ProxyError {
    /// Wrap a negotiation failure, leaving already-wrapped errors alone.
    pub(crate) fn handshake(err: ProxyError) -> Self {
        match err {
            ProxyError::Handshake(_) => err,
            other => ProxyError::Handshake(Box::new(other)),
        }
    }
}
