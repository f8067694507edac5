//! rest-wire: a relational-style connection adapter over HTTP resource APIs
//!
//! Exposes the connection surface generic database callers expect (connect,
//! cursor, autocommit, liveness, capability table) while every operation is
//! carried out as authenticated HTTP requests against a base URL.
//!
//! * Always autocommit; transaction-control calls are accepted and ignored
//! * Cursors exist but refuse ad-hoc statements with a typed error
//! * Authentication strategies are resolved by dotted identifier from a registry
//! * A connect-time `HEAD` probe rejects bad credentials (HTTP 403)
//!
//! ```no_run
//! # async fn example() -> rest_wire::Result<()> {
//! use rest_wire::connection::{Connection, Settings};
//!
//! let settings = Settings::builder("default", "https://api.example.com/db/")
//!     .user("admin")
//!     .password("secret")
//!     .build()?;
//!
//! let mut conn = Connection::new(settings);
//! conn.connect().await?;
//! assert!(conn.autocommit());
//! assert!(conn.is_usable().await);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod connection;
pub mod cursor;
pub mod error;
pub mod features;
pub mod metrics;

pub use client::RestClient;
pub use connection::{Connection, Settings};
pub use cursor::{Cursor, UnsupportedCursor};
pub use error::{Error, Result};
pub use features::FEATURES;
