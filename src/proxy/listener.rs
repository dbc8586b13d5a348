//! TCP accept loop.
//!
//! Accepts connections and spawns one task per connection, with no cap on
//! how many run at once.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpSocket};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::proxy::handler::handle_connection;
use crate::proxy::origin::OriginConnector;
use crate::proxy::state::ProxyState;

/// The proxy's listening socket.
pub struct Listener {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl Listener {
    /// Binds the configured address with the configured accept backlog.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Bind`] if the socket cannot be created, bound or
    /// put into listening state.
    pub async fn bind(config: &Config) -> Result<Self> {
        let addr = config.listen_addr();
        let bind_err = |source| ProxyError::Bind {
            addr: addr.to_string(),
            source,
        };

        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4(),
            SocketAddr::V6(_) => TcpSocket::new_v6(),
        };
        let socket = socket.map_err(bind_err)?;
        socket.set_reuseaddr(true).map_err(bind_err)?;
        socket.bind(addr).map_err(bind_err)?;
        let listener = socket.listen(config.backlog).map_err(bind_err)?;

        let local_addr = listener.local_addr().map_err(bind_err)?;
        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// Returns the local address the proxy is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accepts connections forever, handling each on its own task.
    ///
    /// Accept failures are logged and skipped. Connection errors are logged
    /// by the task that hit them and never reach this loop.
    pub async fn run<C>(self, state: ProxyState, connector: C)
    where
        C: OriginConnector + 'static,
    {
        let connector = Arc::new(connector);
        info!(address = %self.local_addr, "proxy listening");

        loop {
            let (stream, peer_addr) = match self.listener.accept().await {
                Ok(pair) => pair,
                Err(e) => {
                    error!(error = %e, "failed to accept connection");
                    continue;
                }
            };

            debug!(peer = %peer_addr, "connection accepted");
            let state = state.clone();
            let connector = Arc::clone(&connector);

            tokio::spawn(async move {
                match handle_connection(stream, &state, connector.as_ref()).await {
                    Ok(outcome) => debug!(peer = %peer_addr, ?outcome, "connection done"),
                    Err(e) => warn!(peer = %peer_addr, error = %e, "connection aborted"),
                }
            });
        }
    }
}
