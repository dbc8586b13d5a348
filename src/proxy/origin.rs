//! Origin server connections.

use std::future::Future;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{lookup_host, TcpStream};
use tracing::debug;

use crate::error::{ProxyError, Result};

/// Opens connections to origin servers.
///
/// The handler only depends on this trait, so tests can stand in an
/// in-memory or loopback origin.
pub trait OriginConnector: Send + Sync {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    /// Connects to `host`.
    fn connect(&self, host: &str) -> impl Future<Output = Result<Self::Stream>> + Send;
}

/// Resolves the host name and connects over TCP on a fixed port.
#[derive(Debug, Clone, Copy)]
pub struct TcpConnector {
    port: u16,
}

impl TcpConnector {
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    /// Returns the port every origin is contacted on.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl OriginConnector for TcpConnector {
    type Stream = TcpStream;

    /// Uses the first resolved address only; there is no fallback.
    async fn connect(&self, host: &str) -> Result<TcpStream> {
        let addr = lookup_host((host, self.port))
            .await
            .map_err(|source| ProxyError::Resolve {
                host: host.to_string(),
                source,
            })?
            .next()
            .ok_or_else(|| ProxyError::NoAddress {
                host: host.to_string(),
            })?;

        debug!(host, %addr, "connecting to origin");
        TcpStream::connect(addr)
            .await
            .map_err(|source| ProxyError::Connect {
                host: host.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_connect_to_loopback() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            stream.write_all(b"pong").await.unwrap();
        });

        let connector = TcpConnector::new(port);
        assert_eq!(connector.port(), port);
        let mut stream = connector.connect("127.0.0.1").await.unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();

        assert_eq!(buf, b"pong");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unresolvable_host() {
        let connector = TcpConnector::new(80);
        let result = connector.connect("no-such-host.invalid").await;
        assert!(matches!(
            result,
            Err(ProxyError::Resolve { .. }) | Err(ProxyError::NoAddress { .. })
        ));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to get a port nobody listens on.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };

        let connector = TcpConnector::new(port);
        let result = connector.connect("127.0.0.1").await;
        assert!(matches!(result, Err(ProxyError::Connect { .. })));
    }
}
