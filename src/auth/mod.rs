//! Authentication strategies
//!
//! A strategy attaches credentials to every outgoing request. Strategies are
//! looked up by a dotted identifier (`<namespace>.<Member>`) in an
//! [`AuthRegistry`], populated with the built-ins on first use.

mod registry;
mod strategies;

pub use registry::{global_registry, AuthFactory, AuthRegistry, BUILTIN_NAMESPACE, DEFAULT_AUTH};
pub use strategies::{BasicAuth, BearerAuth, NoAuth};

use reqwest::RequestBuilder;

/// Credential attachment for outgoing requests
pub trait AuthStrategy: Send + Sync + std::fmt::Debug {
    /// Short strategy name for logs and metrics
    fn name(&self) -> &'static str;

    /// Attach credentials to a request
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder;
}
