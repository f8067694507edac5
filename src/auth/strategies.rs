//! Built-in authentication strategies

use super::AuthStrategy;
use crate::connection::Settings;
use crate::{Error, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;
use std::fmt;

/// Mark a header value as sensitive so it is redacted in debug output
fn sensitive_header(value: String) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(&value)
        .map_err(|_| Error::Config("credentials contain characters not allowed in a header".into()))?;
    header.set_sensitive(true);
    Ok(header)
}

/// HTTP Basic authentication from `USER` and `PASSWORD`
///
/// The header is computed once. Without a `USER` nothing is attached.
#[derive(Clone)]
pub struct BasicAuth {
    user: Option<String>,
    header: Option<HeaderValue>,
}

impl BasicAuth {
    /// Seed from settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        match settings.user() {
            Some(user) => Self::new(user, settings.password().unwrap_or_default()),
            None => Ok(Self {
                user: None,
                header: None,
            }),
        }
    }

    /// Create from explicit credentials
    pub fn new(user: &str, password: &str) -> Result<Self> {
        let encoded = BASE64.encode(format!("{}:{}", user, password));
        Ok(Self {
            user: Some(user.to_string()),
            header: Some(sensitive_header(format!("Basic {}", encoded))?),
        })
    }

    /// Username in use
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AuthStrategy for BasicAuth {
    fn name(&self) -> &'static str {
        "BasicAuth"
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.header {
            Some(header) => request.header(AUTHORIZATION, header.clone()),
            None => request,
        }
    }
}

/// Bearer token authentication from `OPTIONS.TOKEN`
#[derive(Clone)]
pub struct BearerAuth {
    header: HeaderValue,
}

impl BearerAuth {
    /// Option key holding the token
    pub const TOKEN_OPTION: &'static str = "TOKEN";

    /// Seed from settings
    ///
    /// A missing token is a configuration error.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let token = settings
            .option_str(Self::TOKEN_OPTION)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::Config(format!(
                    "BearerAuth requires OPTIONS.{} for database {}",
                    Self::TOKEN_OPTION,
                    settings.alias()
                ))
            })?;
        Self::new(token)
    }

    /// Create from an explicit token
    pub fn new(token: &str) -> Result<Self> {
        Ok(Self {
            header: sensitive_header(format!("Bearer {}", token))?,
        })
    }
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl AuthStrategy for BearerAuth {
    fn name(&self) -> &'static str {
        "BearerAuth"
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.header.clone())
    }
}

/// Anonymous access
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl NoAuth {
    /// Seed from settings (nothing to read)
    pub fn from_settings(_settings: &Settings) -> Result<Self> {
        Ok(Self)
    }
}

impl AuthStrategy for NoAuth {
    fn name(&self) -> &'static str {
        "NoAuth"
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
    }
}
