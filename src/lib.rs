//! Arc Proxy - A forwarding HTTP proxy with an in-memory response cache
//!
//! Caches origin responses by request URL and evicts by a blended
//! frequency/recency score once the cache is full.

pub mod cache;
pub mod config;
pub mod error;
pub mod proxy;

pub use config::Config;
pub use error::{ProxyError, Result};
pub use proxy::{Listener, ProxyState, TcpConnector};
