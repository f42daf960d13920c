//! SOCKS5 Protocol Handler

use std::net::Ipv4Addr;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::error::{ProxyError, ProxyResult};
use super::frame::{read_array, read_u8, read_vec};
use super::{ConnectRequest, HandshakeRequest, TargetAddr};
use crate::protocol::constants::*;

/// SOCKS5 protocol handler for one client connection
pub struct Socks5Handler<S> {
    stream: S,
}

impl<S> Socks5Handler<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Create a new SOCKS5 handler for the given stream
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Consume the greeting and select "no authentication".
    ///
    /// The offered methods are read but never inspected, and the version byte
    /// is only logged: any greeting that arrives in full is answered with
    /// `05 00`.
    pub async fn negotiate(&mut self) -> ProxyResult<HandshakeRequest> {
        let greeting = self.read_greeting().await.map_err(ProxyError::handshake)?;

        debug!(
            version = greeting.version,
            methods = greeting.method_count(),
            "Received SOCKS greeting"
        );

        self.stream
            .write_all(&SOCKS5_METHOD_REPLY)
            .await
            .map_err(|e| ProxyError::handshake(ProxyError::Write(e)))?;

        Ok(greeting)
    }

    async fn read_greeting(&mut self) -> ProxyResult<HandshakeRequest> {
        let [version, n_methods]: [u8; 2] = read_array(&mut self.stream).await?;
        let methods = read_vec(&mut self.stream, n_methods as usize).await?;

        Ok(HandshakeRequest { version, methods })
    }

    /// Read the CONNECT request that follows a successful negotiation
    pub async fn read_request(&mut self) -> ProxyResult<ConnectRequest> {
        // VER CMD RSV ATYP
        let [version, command, _reserved, address_type]: [u8; 4] =
            read_array(&mut self.stream).await?;

        if version != SOCKS5_VERSION || command != SOCKS5_CMD_CONNECT {
            debug!(version, command = command_name(command), "Rejecting request");
            return Err(ProxyError::UnsupportedRequest { version, command });
        }

        let address = match address_type {
            SOCKS5_ADDR_IPV4 => {
                let octets: [u8; 4] = read_array(&mut self.stream).await?;
                TargetAddr::Ipv4(Ipv4Addr::from(octets))
            }
            SOCKS5_ADDR_DOMAIN => {
                // One length byte, then exactly that many name bytes
                let len = read_u8(&mut self.stream).await?;
                let name = read_vec(&mut self.stream, len as usize).await?;
                let domain = String::from_utf8(name).map_err(|_| ProxyError::InvalidHostname)?;
                TargetAddr::Domain(domain)
            }
            SOCKS5_ADDR_IPV6 => return Err(ProxyError::UnsupportedAddressFamily(address_type)),
            other => return Err(ProxyError::UnsupportedAddressFamily(other)),
        };

        let port = u16::from_be_bytes(read_array(&mut self.stream).await?);

        Ok(ConnectRequest {
            version,
            command,
            address_type,
            address,
            port,
        })
    }

    /// Tell the client the destination is connected
    pub async fn send_success_reply(&mut self) -> ProxyResult<()> {
        self.stream
            .write_all(&SOCKS5_CONNECT_SUCCESS_REPLY)
            .await
            .map_err(ProxyError::Write)
    }

    /// Get the underlying stream back once setup is done
    pub fn into_stream(self) -> S {
        self.stream
    }
}

fn command_name(command: u8) -> &'static str {
    match command {
        SOCKS5_CMD_CONNECT => "CONNECT",
        SOCKS5_CMD_BIND => "BIND",
        SOCKS5_CMD_UDP_ASSOCIATE => "UDP ASSOCIATE",
        _ => "unknown",
    }
}
