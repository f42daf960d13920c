//! Frame Reader
//!
//! Read-until-full primitives over any async byte stream. A single raw read
//! may return fewer bytes than a protocol field needs, so every field read
//! here loops until the buffer is full or the peer hangs up.

use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::{ProxyError, ProxyResult};

/// Fill `buf` completely, or report how many bytes arrived before EOF.
pub async fn read_exact<R>(stream: &mut R, buf: &mut [u8]) -> ProxyResult<()>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let expected = buf.len();
    let mut received = 0;

    while received < expected {
        let n = stream.read(&mut buf[received..]).await?;
        if n == 0 {
            return Err(ProxyError::ShortRead { expected, received });
        }
        received += n;
    }

    Ok(())
}

/// Read a fixed-size field.
pub async fn read_array<R, const N: usize>(stream: &mut R) -> ProxyResult<[u8; N]>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut buf = [0u8; N];
    read_exact(stream, &mut buf).await?;
    Ok(buf)
}

/// Read a variable-length field whose size is known from an earlier byte.
pub async fn read_vec<R>(stream: &mut R, len: usize) -> ProxyResult<Vec<u8>>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut buf = vec![0u8; len];
    read_exact(stream, &mut buf).await?;
    Ok(buf)
}

/// Read a single byte, e.g. a length prefix.
pub async fn read_u8<R>(stream: &mut R) -> ProxyResult<u8>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let [byte] = read_array::<R, 1>(stream).await?;
    Ok(byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn test_fragmented_frame_is_reassembled() {
        let mut stream = Builder::new()
            .read(&[0x05])
            .read(&[0x01, 0x00])
            .read(&[0x01])
            .build();

        let header: [u8; 4] = read_array(&mut stream).await.unwrap();
        assert_eq!(header, [0x05, 0x01, 0x00, 0x01]);
    }

    #[tokio::test]
    async fn test_early_eof_reports_received_count() {
        let mut stream = Builder::new().read(&[0x7f, 0x00]).build();

        let err = read_vec(&mut stream, 4).await.unwrap_err();
        match err {
            ProxyError::ShortRead { expected, received } => {
                assert_eq!(expected, 4);
                assert_eq!(received, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_zero_length_read_does_not_touch_stream() {
        let mut stream = Builder::new().build();

        let bytes = read_vec(&mut stream, 0).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_single_byte_read() {
        let mut stream = Builder::new().read(&[0x0b, 0xff]).build();

        assert_eq!(read_u8(&mut stream).await.unwrap(), 0x0b);
        assert_eq!(read_u8(&mut stream).await.unwrap(), 0xff);
    }

    #[tokio::test]
    async fn test_io_error_is_propagated() {
        let mut stream = Builder::new()
            .read_error(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset"))
            .build();

        let err = read_vec(&mut stream, 2).await.unwrap_err();
        assert!(matches!(err, ProxyError::Io(_)));
    }
}
