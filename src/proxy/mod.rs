//! Proxy Module
//!
//! Connection handling: parse the client's request, answer from the cache or
//! fetch from the origin, and keep the cache in step.
//!
//! # Flow
//! - `Listener` accepts and spawns one task per connection
//! - `handle_connection` runs the lookup / fetch / recheck / insert sequence
//! - `ProxyState` is the shared cache handle every task holds

pub mod handler;
pub mod io;
pub mod listener;
pub mod origin;
pub mod request;
pub mod state;

pub use handler::{handle_connection, Outcome};
pub use listener::Listener;
pub use origin::{OriginConnector, TcpConnector};
pub use request::{parse_request, ParsedRequest};
pub use state::ProxyState;
