//! Upstream Connector

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::protocol::{ProxyError, ProxyResult, Socks5Handler};

/// Dial `destination` (`"host:port"`). Hostnames are resolved as part of the
/// dial and every resolved address is tried in turn.
pub async fn connect_to_target(destination: &str) -> ProxyResult<TcpStream> {
    debug!("Attempting to connect to target: {}", destination);

    TcpStream::connect(destination)
        .await
        .map_err(|source| ProxyError::Dial {
            destination: destination.to_string(),
            source,
        })
}

/// Dial the destination and, once connected, send the client the fixed
/// success reply.
///
/// A failed dial sends nothing to the client. If the reply cannot be written
/// the fresh destination stream is closed before the error is returned.
pub async fn establish<S>(
    handler: &mut Socks5Handler<S>,
    destination: &str,
) -> ProxyResult<TcpStream>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut target = connect_to_target(destination).await?;

    if let Err(e) = handler.send_success_reply().await {
        warn!("Closing connection to {} after failed reply", destination);
        let _ = target.shutdown().await;
        return Err(e);
    }

    Ok(target)
}
