//! Connection string parsing
//!
//! Supports:
//! * http(s)://[user[:password]@]host[:port][/path][?params]
//!
//! Recognized query parameters: `alias`, `auth`, `probe_timeout` (seconds).
//! Any other parameter becomes a string entry in `OPTIONS`.

use crate::connection::{Settings, DEFAULT_ALIAS};
use crate::{Error, Result};
use reqwest::Url;
use std::collections::BTreeMap;
use std::time::Duration;

/// Parsed connection info
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionInfo {
    /// Endpoint URL without userinfo or query
    pub url: String,
    /// Connection alias
    pub alias: String,
    /// Username
    pub user: Option<String>,
    /// Password
    pub password: Option<String>,
    /// Authentication strategy identifier
    pub auth: Option<String>,
    /// Probe timeout override
    pub probe_timeout: Option<Duration>,
    /// Remaining query parameters
    pub options: BTreeMap<String, String>,
}

/// Percent-decode one userinfo component
fn decode_component(value: &str, what: &str) -> Result<Option<String>> {
    if value.is_empty() {
        return Ok(None);
    }
    let decoded = urlencoding::decode(value)
        .map_err(|e| Error::Config(format!("failed to decode {}: {}", what, e)))?;
    Ok(Some(decoded.into_owned()))
}

impl ConnectionInfo {
    /// Parse connection string
    pub fn parse(s: &str) -> Result<Self> {
        if !s.starts_with("http://") && !s.starts_with("https://") {
            return Err(Error::Config(
                "connection string must start with http:// or https://".into(),
            ));
        }

        let mut url = Url::parse(s)
            .map_err(|e| Error::Config(format!("invalid connection string: {}", e)))?;

        let user = decode_component(url.username(), "username")?;
        let password = match url.password() {
            Some(p) => decode_component(p, "password")?,
            None => None,
        };

        let mut alias = DEFAULT_ALIAS.to_string();
        let mut auth = None;
        let mut probe_timeout = None;
        let mut options = BTreeMap::new();

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "alias" => alias = value.into_owned(),
                "auth" => auth = Some(value.into_owned()),
                "probe_timeout" => {
                    let secs: f64 = value.parse().map_err(|_| {
                        Error::Config(format!("invalid probe_timeout '{}'", value))
                    })?;
                    if !secs.is_finite() || secs <= 0.0 {
                        return Err(Error::Config(format!(
                            "probe_timeout must be positive, got {}",
                            secs
                        )));
                    }
                    let timeout = Duration::try_from_secs_f64(secs).map_err(|e| {
                        Error::Config(format!("probe_timeout out of range: {}", e))
                    })?;
                    probe_timeout = Some(timeout);
                }
                _ => {
                    options.insert(key.into_owned(), value.into_owned());
                }
            }
        }

        url.set_query(None);
        url.set_fragment(None);
        url.set_username("")
            .and_then(|_| url.set_password(None))
            .map_err(|_| Error::Config("connection string cannot carry credentials".into()))?;

        Ok(Self {
            url: url.into(),
            alias,
            user,
            password,
            auth,
            probe_timeout,
            options,
        })
    }

    /// Convert to Settings
    pub fn to_settings(&self) -> Result<Settings> {
        let mut builder = Settings::builder(&self.alias, &self.url);
        if let Some(ref user) = self.user {
            builder = builder.user(user);
        }
        if let Some(ref password) = self.password {
            builder = builder.password(password);
        }
        if let Some(ref auth) = self.auth {
            builder = builder.auth(auth);
        }
        if let Some(timeout) = self.probe_timeout {
            builder = builder.probe_timeout(timeout);
        }
        for (key, value) in &self.options {
            builder = builder.option(key, value.as_str());
        }
        builder.build()
    }
}
