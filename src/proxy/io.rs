//! Bounded socket reads.

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Performs a single read of at most `limit` bytes.
///
/// Anything the peer sends past `limit` in that read is left unread and is
/// never seen by the proxy. An empty result means the peer closed the
/// connection.
pub async fn read_bounded<R>(reader: &mut R, limit: usize) -> std::io::Result<Bytes>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; limit];
    let n = reader.read(&mut buf).await?;
    buf.truncate(n);
    Ok(Bytes::from(buf))
}
