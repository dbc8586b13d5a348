//! Per-connection request handling.
//!
//! One call serves one request and then closes the client connection:
//! 1. read the request (single bounded read)
//! 2. parse method, URL and host from the first line
//! 3. answer from the cache on a hit
//! 4. otherwise connect to the origin, forward the raw request and read the reply
//! 5. check the cache again; if another connection filled it meanwhile, serve that copy
//! 6. otherwise relay the fetched reply and insert it into the cache

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;
use tracing::{debug, info, warn, Level};

use crate::error::{ProxyError, Result};
use crate::proxy::io::read_bounded;
use crate::proxy::origin::OriginConnector;
use crate::proxy::request::parse_request;
use crate::proxy::state::ProxyState;

/// How a successfully handled connection was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Served from the cache without contacting the origin
    CacheHit,
    /// Fetched from the origin, but served the copy another connection cached first
    RaceHit,
    /// Fetched from the origin, relayed and cached
    Fetched,
}

/// Handles a single client connection from request to close.
///
/// Any error aborts only this connection: the client is closed without a
/// response and nothing is retried. The cache lock is only taken inside
/// `ProxyState` calls, never across socket I/O.
pub async fn handle_connection<S, C>(
    mut client: S,
    state: &ProxyState,
    connector: &C,
) -> Result<Outcome>
where
    S: AsyncRead + AsyncWrite + Unpin,
    C: OriginConnector,
{
    let request = read_bounded(&mut client, state.buffer_size()).await?;
    if request.is_empty() {
        return Err(ProxyError::EmptyRequest);
    }

    let parsed = parse_request(&request)?;
    debug!(method = %parsed.method, url = %parsed.url, host = %parsed.host, "handling request");

    if let Some(entry) = state.lookup(&parsed.url).await {
        info!(url = %parsed.url, bytes = entry.size, score = entry.score, "serving from cache");
        client.write_all(&entry.payload).await?;
        client.shutdown().await?;
        log_cache(state).await;
        return Ok(Outcome::CacheHit);
    }

    let mut origin = connector.connect(&parsed.host).await?;

    let started = Instant::now();
    origin.write_all(&request).await?;
    let response = read_bounded(&mut origin, state.buffer_size()).await?;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if response.is_empty() {
        return Err(ProxyError::EmptyResponse { host: parsed.host });
    }
    debug!(host = %parsed.host, bytes = response.len(), elapsed_ms, "received origin response");

    if let Some(entry) = state.lookup(&parsed.url).await {
        info!(url = %parsed.url, bytes = entry.size, "cache filled by another connection, serving cached copy");
        client.write_all(&entry.payload).await?;
        client.shutdown().await?;
        log_cache(state).await;
        return Ok(Outcome::RaceHit);
    }

    // The origin's bytes are cached even if the client has gone away. The
    // client only sees EOF once the entry is in place.
    let sent = client.write_all(&response).await;
    info!(url = %parsed.url, bytes = response.len(), elapsed_ms, "caching origin response");
    state.insert(&parsed.url, response).await;
    log_cache(state).await;

    sent?;
    client.shutdown().await?;
    Ok(Outcome::Fetched)
}

/// Dumps the cache table as JSON at debug level.
async fn log_cache(state: &ProxyState) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let snapshot = state.snapshot().await;
    match serde_json::to_string(&snapshot) {
        Ok(json) => debug!(cache = %json, "cache contents"),
        Err(e) => warn!(error = %e, "failed to serialize cache snapshot"),
    }
}
