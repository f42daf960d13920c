//! Relay Engine
//!
//! Two independent tasks per session, one per direction. Neither waits for
//! the other: each copies until its source ends, errors, or either
//! connection is closed, then closes both connections itself.

use std::io;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info_span, Instrument};

use super::{CloseHandle, Direction, RelaySession};

const RELAY_BUFFER_SIZE: usize = 16 * 1024;

/// How a relay direction came to an end
#[derive(Debug)]
pub enum RelayEnd {
    /// The source reached end-of-stream.
    Eof,
    /// One of the two connections was closed by the other direction.
    Closed,
    Failed(io::Error),
}

/// Copy `source` into `sink` until the source ends, an I/O error occurs, or
/// either connection's handle is closed. Both handles are closed on every
/// exit path and the sink is shut down before the halves are dropped.
pub async fn relay<R, W>(
    direction: Direction,
    mut source: R,
    mut sink: W,
    source_close: CloseHandle,
    sink_close: CloseHandle,
    session: Arc<RelaySession>,
) -> RelayEnd
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let end = tokio::select! {
        result = copy_counted(direction, &mut source, &mut sink, &session) => match result {
            Ok(()) => RelayEnd::Eof,
            Err(e) => RelayEnd::Failed(e),
        },
        _ = source_close.closed() => RelayEnd::Closed,
        _ = sink_close.closed() => RelayEnd::Closed,
    };

    let _ = sink.shutdown().await;
    source_close.close();
    sink_close.close();

    debug!(?direction, ?end, "Relay direction finished");
    end
}

async fn copy_counted<R, W>(
    direction: Direction,
    source: &mut R,
    sink: &mut W,
    session: &RelaySession,
) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; RELAY_BUFFER_SIZE];
    loop {
        let n = source.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        sink.write_all(&buf[..n]).await?;
        session.add_bytes(direction, n as u64);
    }
}

/// Launch both relay directions for an established session and return
/// without waiting on them.
pub fn spawn_relays(client: TcpStream, target: TcpStream, session: RelaySession) {
    let session = Arc::new(session);
    let span = info_span!("relay", session_id = %session.session_id);

    let client_close = CloseHandle::new();
    let target_close = CloseHandle::new();

    let (client_read, client_write) = client.into_split();
    let (target_read, target_write) = target.into_split();

    tokio::spawn(
        relay(
            Direction::Upstream,
            client_read,
            target_write,
            client_close.clone(),
            target_close.clone(),
            Arc::clone(&session),
        )
        .instrument(span.clone()),
    );

    tokio::spawn(
        relay(
            Direction::Downstream,
            target_read,
            client_write,
            target_close,
            client_close,
            session,
        )
        .instrument(span),
    );
}
