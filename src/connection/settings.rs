//! Connection settings
//!
//! Validated configuration handed to every constructor. Accepts either the
//! fluent builder or a settings mapping with upper-case keys
//! (`NAME`, `AUTH`, `USER`, `PASSWORD`, `OPTIONS`, `PROBE_TIMEOUT`).

use super::tls::TlsConfig;
use crate::{Error, Result};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Alias used when none is given
pub const DEFAULT_ALIAS: &str = "default";

/// Bound on the HEAD probes issued at connect time and by liveness checks
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(4);

/// Validated connection settings
#[derive(Debug, Clone)]
pub struct Settings {
    alias: String,
    name: String,
    url: Url,
    auth: Option<String>,
    user: Option<String>,
    password: Option<String>,
    options: HashMap<String, Value>,
    probe_timeout: Duration,
    request_timeout: Option<Duration>,
    tls: Option<TlsConfig>,
}

/// Settings mapping as it appears in configuration files
#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(rename = "NAME")]
    name: Option<String>,
    #[serde(rename = "AUTH", default)]
    auth: Option<String>,
    #[serde(rename = "USER", default)]
    user: Option<String>,
    #[serde(rename = "PASSWORD", default)]
    password: Option<String>,
    #[serde(rename = "OPTIONS", default)]
    options: HashMap<String, Value>,
    #[serde(rename = "PROBE_TIMEOUT", default)]
    probe_timeout: Option<f64>,
}

impl Settings {
    /// Create a builder for the endpoint `url` under connection `alias`
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let settings = Settings::builder("default", "https://api.example.com/db/")
    ///     .user("admin")
    ///     .password("secret")
    ///     .probe_timeout(Duration::from_secs(2))
    ///     .build()?;
    /// ```
    pub fn builder(alias: impl Into<String>, url: impl Into<String>) -> SettingsBuilder {
        SettingsBuilder {
            alias: alias.into(),
            name: url.into(),
            auth: None,
            user: None,
            password: None,
            options: HashMap::new(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            request_timeout: None,
            tls: None,
        }
    }

    /// Build settings from a mapping with upper-case keys
    ///
    /// Unknown keys are ignored so a full database entry can be passed as is.
    pub fn from_value(alias: impl Into<String>, value: Value) -> Result<Self> {
        let raw: RawSettings = serde_json::from_value(value)
            .map_err(|e| Error::Config(format!("invalid settings mapping: {}", e)))?;

        let name = raw
            .name
            .ok_or_else(|| Error::Config("settings mapping is missing NAME".into()))?;

        let mut builder = Settings::builder(alias, name);
        builder.auth = raw.auth;
        builder.user = raw.user;
        builder.password = raw.password;
        builder.options = raw.options;

        if let Some(secs) = raw.probe_timeout {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(Error::Config(format!(
                    "PROBE_TIMEOUT must be a positive number of seconds, got {}",
                    secs
                )));
            }
            builder.probe_timeout = Duration::try_from_secs_f64(secs)
                .map_err(|e| Error::Config(format!("PROBE_TIMEOUT out of range: {}", e)))?;
        }

        builder.build()
    }

    /// Connection alias
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Endpoint URL exactly as configured
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parsed endpoint URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Configured authentication identifier, if any
    pub fn auth(&self) -> Option<&str> {
        self.auth.as_deref()
    }

    /// Username
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Password
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Strategy-specific options
    pub fn options(&self) -> &HashMap<String, Value> {
        &self.options
    }

    /// String option lookup
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(Value::as_str)
    }

    /// Probe timeout
    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Overall request timeout for the HTTP client
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// TLS configuration
    pub fn tls(&self) -> Option<&TlsConfig> {
        self.tls.as_ref()
    }
}

/// Builder for [`Settings`]
#[derive(Debug, Clone)]
pub struct SettingsBuilder {
    alias: String,
    name: String,
    auth: Option<String>,
    user: Option<String>,
    password: Option<String>,
    options: HashMap<String, Value>,
    probe_timeout: Duration,
    request_timeout: Option<Duration>,
    tls: Option<TlsConfig>,
}

impl SettingsBuilder {
    /// Set the authentication strategy identifier
    pub fn auth(mut self, identifier: impl Into<String>) -> Self {
        self.auth = Some(identifier.into());
        self
    }

    /// Set the username
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the password
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Add a strategy option
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Set the probe timeout
    ///
    /// Default: 4 seconds
    pub fn probe_timeout(mut self, duration: Duration) -> Self {
        self.probe_timeout = duration;
        self
    }

    /// Set an overall timeout for every request issued through the session
    ///
    /// Default: None (probes still use the probe timeout)
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set TLS configuration
    pub fn tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Validate and build the settings
    pub fn build(self) -> Result<Settings> {
        if self.alias.trim().is_empty() {
            return Err(Error::Config("connection alias must not be empty".into()));
        }

        let url = parse_endpoint(&self.name)?;

        if self.probe_timeout.is_zero() {
            return Err(Error::Config("probe timeout must be non-zero".into()));
        }

        // Null and empty identifiers fall back to the basic strategy
        let auth = self.auth.filter(|id| !id.trim().is_empty());

        Ok(Settings {
            alias: self.alias,
            name: self.name,
            url,
            auth,
            user: self.user,
            password: self.password,
            options: self.options,
            probe_timeout: self.probe_timeout,
            request_timeout: self.request_timeout,
            tls: self.tls,
        })
    }
}

/// Parse and check the endpoint URL
fn parse_endpoint(name: &str) -> Result<Url> {
    if name.trim().is_empty() {
        return Err(Error::Config("NAME (endpoint URL) must not be empty".into()));
    }

    let url = Url::parse(name)
        .map_err(|e| Error::Config(format!("invalid endpoint URL '{}': {}", name, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::Config(format!(
                "unsupported URL scheme '{}': expected http or https",
                other
            )))
        }
    }

    if url.host_str().is_none() {
        return Err(Error::Config(format!("endpoint URL '{}' has no host", name)));
    }

    Ok(url)
}
