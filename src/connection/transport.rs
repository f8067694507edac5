//! Transport session (authenticated HTTP client bound to a base URL)

use super::tls::TlsConfig;
use crate::auth::AuthStrategy;
use crate::{Error, Result};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use std::sync::Arc;
use std::time::Duration;

/// Long-lived HTTP session
///
/// Every request built here goes through the resolved authentication
/// strategy. Connection pooling and keep-alive belong to the underlying
/// `reqwest::Client`.
#[derive(Clone)]
pub struct Session {
    client: reqwest::Client,
    base_url: Url,
    join_base: Url,
    auth: Arc<dyn AuthStrategy>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url.as_str())
            .field("auth", &self.auth.name())
            .finish()
    }
}

impl Session {
    /// Build a session. Performs no network I/O.
    pub fn new(
        base_url: Url,
        auth: Arc<dyn AuthStrategy>,
        tls: Option<&TlsConfig>,
        request_timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("rest-wire/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(tls) = tls {
            builder = tls.apply(builder);
        }

        let client = builder.build()?;
        Ok(Self::with_client(client, base_url, auth))
    }

    /// Build a session around an existing client
    pub fn with_client(client: reqwest::Client, base_url: Url, auth: Arc<dyn AuthStrategy>) -> Self {
        // Relative paths resolve under the base path, so it must end with '/'
        let mut join_base = base_url.clone();
        if !join_base.path().ends_with('/') {
            let path = format!("{}/", join_base.path());
            join_base.set_path(&path);
        }

        Self {
            client,
            base_url,
            join_base,
            auth,
        }
    }

    /// Base URL as configured
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Name of the authentication strategy in use
    pub fn auth_name(&self) -> &'static str {
        self.auth.name()
    }

    /// Resolve a resource path against the base URL
    ///
    /// An empty path addresses the base URL itself.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return Ok(self.base_url.clone());
        }
        self.join_base
            .join(path)
            .map_err(|e| Error::Config(format!("invalid resource path '{}': {}", path, e)))
    }

    /// Build an authenticated request
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url_for(path)?;
        Ok(self.auth.authorize(self.client.request(method, url)))
    }

    /// GET a resource path
    pub fn get(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::GET, path)
    }

    /// HEAD a resource path
    pub fn head(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::HEAD, path)
    }

    /// POST to a resource path
    pub fn post(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::POST, path)
    }

    /// PUT a resource path
    pub fn put(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::PUT, path)
    }

    /// PATCH a resource path
    pub fn patch(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::PATCH, path)
    }

    /// DELETE a resource path
    pub fn delete(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::DELETE, path)
    }

    /// `HEAD <base>` bounded by `timeout`
    ///
    /// Any HTTP status is returned as is; only transport failures are errors.
    pub async fn probe(&self, timeout: Duration) -> Result<StatusCode> {
        let response = self.head("")?.timeout(timeout).send().await?;
        Ok(response.status())
    }
}
