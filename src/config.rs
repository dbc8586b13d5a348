//! Configuration Module
//!
//! Compile-time settings for the proxy, gathered into one struct so the
//! listener, cache and handlers read them from a single place.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::cache::ScoreWeights;

/// Port the proxy listens on
pub const LISTEN_PORT: u16 = 8080;

/// Pending-connection queue length for the listening socket
pub const ACCEPT_BACKLOG: u32 = 10;

/// Port used to reach every origin server
pub const ORIGIN_PORT: u16 = 80;

/// Capacity of the request and the response buffer, in bytes
pub const BUFFER_SIZE: usize = 1_000_000;

/// Maximum number of cached responses
pub const CACHE_CAPACITY: usize = 3;

/// Weight of the access count in an entry's score
pub const FREQUENCY_WEIGHT: f64 = 0.5;

/// Weight of the recency term in an entry's score
pub const RECENCY_WEIGHT: f64 = 0.5;

/// Proxy configuration parameters.
///
/// There is no runtime configuration surface; `Config::default()` is what the
/// binary runs with. Tests build their own values.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface the listener binds to
    pub listen_ip: IpAddr,
    /// Port the listener binds to
    pub listen_port: u16,
    /// Accept backlog for the listening socket
    pub backlog: u32,
    /// Origin server port
    pub origin_port: u16,
    /// Byte limit for a single request or response read
    pub buffer_size: usize,
    /// Maximum number of cache entries
    pub cache_capacity: usize,
    /// Score coefficients used by the eviction policy
    pub weights: ScoreWeights,
}

impl Config {
    /// Returns the socket address the listener binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_ip, self.listen_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_ip: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            listen_port: LISTEN_PORT,
            backlog: ACCEPT_BACKLOG,
            origin_port: ORIGIN_PORT,
            buffer_size: BUFFER_SIZE,
            cache_capacity: CACHE_CAPACITY,
            weights: ScoreWeights {
                frequency: FREQUENCY_WEIGHT,
                recency: RECENCY_WEIGHT,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.listen_port, 8080);
        assert_eq!(config.backlog, 10);
        assert_eq!(config.origin_port, 80);
        assert_eq!(config.buffer_size, 1_000_000);
        assert_eq!(config.cache_capacity, 3);
        assert_eq!(config.weights.frequency, 0.5);
        assert_eq!(config.weights.recency, 0.5);
    }

    #[test]
    fn test_listen_addr_all_interfaces() {
        let config = Config::default();
        assert_eq!(config.listen_addr(), "0.0.0.0:8080".parse().unwrap());
    }

    #[test]
    fn test_listen_addr_override() {
        let config = Config {
            listen_ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            listen_port: 0,
            ..Config::default()
        };
        assert_eq!(config.listen_addr(), "127.0.0.1:0".parse().unwrap());
    }
}
