//! Error types for the proxy
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Proxy Error Enum ==
/// Unified error type for the proxy.
///
/// Only `Bind` is fatal to the process; every other variant aborts the
/// single connection it was raised on.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Listening socket could not be set up
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Socket error on an established connection
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Client closed the connection before sending anything
    #[error("client sent no data")]
    EmptyRequest,

    /// Origin closed the connection before sending anything
    #[error("origin {host} sent no data")]
    EmptyResponse { host: String },

    /// First line did not carry a method and a target URL
    #[error("malformed request line")]
    MalformedRequestLine,

    /// Target URL has no host component
    #[error("no host in target url: {url}")]
    MissingHost { url: String },

    /// Target URL is longer than a cache key may be
    #[error("target url is {len} bytes, limit is {max}")]
    UrlTooLong { len: usize, max: usize },

    /// Origin host name did not resolve
    #[error("failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// Origin host name resolved to no addresses
    #[error("no addresses found for {host}")]
    NoAddress { host: String },

    /// TCP connect to the origin failed
    #[error("failed to connect to {host}: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
