//! High-level client API
//!
//! Connects from a connection string or settings and exposes structured
//! resource calls on top of the connection wrapper.

mod connection_string;
mod rest_client;

pub use connection_string::ConnectionInfo;
pub use rest_client::RestClient;
