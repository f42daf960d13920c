//! Connection Manager Implementation

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, instrument, warn};

use crate::config::Config;
use crate::protocol::{ProxyResult, Socks5Handler};
use crate::relay::{establish, spawn_relays, RelaySession};
use crate::Result;

/// Accepts client connections and runs one independent task per connection
pub struct ConnectionManager {
    listener: Option<TcpListener>,
    config: Arc<Config>,
    next_connection_id: u64,
}

impl ConnectionManager {
    /// Create a new ConnectionManager
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            listener: None,
            config,
            next_connection_id: 1,
        }
    }

    /// Create a ConnectionManager with its listener already bound
    pub async fn bind(config: Arc<Config>) -> Result<Self> {
        let mut manager = Self::new(config);
        manager.bind_listener().await?;
        Ok(manager)
    }

    async fn bind_listener(&mut self) -> Result<()> {
        let bind_addr = self.config.server.bind_addr;

        info!("Binding TCP listener to {}", bind_addr);
        let listener = TcpListener::bind(bind_addr)
            .await
            .with_context(|| format!("Failed to bind {}", bind_addr))?;

        info!("SOCKS5 server listening on {}", listener.local_addr()?);
        self.listener = Some(listener);
        Ok(())
    }

    /// Address the listener is bound to, once bound
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Bind (if needed) and accept connections forever
    pub async fn start(&mut self) -> Result<()> {
        if self.listener.is_none() {
            self.bind_listener().await?;
        }
        self.accept_connections().await
    }

    /// Accept connections forever on an already bound listener
    pub async fn serve(mut self) -> Result<()> {
        self.start().await
    }

    /// Main connection acceptance loop
    async fn accept_connections(&mut self) -> Result<()> {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Listener not initialized"))?;

        info!("Starting connection acceptance loop");

        loop {
            match listener.accept().await {
                Ok((stream, addr)) => {
                    let connection_id = format!("conn_{}", self.next_connection_id);
                    self.next_connection_id += 1;

                    debug!("Accepted connection {} from {}", connection_id, addr);

                    tokio::spawn(async move {
                        if let Err(e) =
                            Self::handle_connection(stream, addr, connection_id.clone()).await
                        {
                            warn!("Connection {} from {} aborted: {}", connection_id, addr, e);
                        }
                    });
                }
                Err(e) => {
                    // Transient; keep accepting
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }

    /// Run the SOCKS5 setup pipeline for one client.
    ///
    /// Returns as soon as the relay tasks are launched. On error the client
    /// stream is dropped here, which closes it without any SOCKS reply.
    #[instrument(skip(stream), fields(connection_id = %connection_id, addr = %addr))]
    pub async fn handle_connection(
        stream: TcpStream,
        addr: SocketAddr,
        connection_id: String,
    ) -> ProxyResult<()> {
        let mut handler = Socks5Handler::new(stream);

        // Step 1: greeting and method selection
        handler.negotiate().await?;

        // Step 2: CONNECT request
        let request = handler.read_request().await?;
        let destination = request.destination();
        debug!("CONNECT request from {} to {}", addr, destination);

        // Step 3: dial and reply
        let target = establish(&mut handler, &destination).await?;
        info!("Connected {} to {}", addr, destination);

        // Step 4: hand both sockets to the relay tasks and return
        let session = RelaySession::new(connection_id, addr, destination);
        spawn_relays(handler.into_stream(), target, session);

        Ok(())
    }
}
