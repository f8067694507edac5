//! Connection management
//!
//! This module handles:
//! * Validated settings and TLS configuration
//! * The HTTP transport session
//! * Connection lifecycle (parameters, session, initial probe, liveness)
//! * State machine enforcement

mod conn;
mod settings;
mod state;
mod tls;
mod transport;

pub use conn::{Connection, ConnectionParams};
pub use settings::{Settings, SettingsBuilder, DEFAULT_ALIAS, DEFAULT_PROBE_TIMEOUT};
pub use state::ConnectionState;
pub use tls::{TlsConfig, TlsConfigBuilder};
pub use transport::Session;
