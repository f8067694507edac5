//! Error types

use thiserror::Error;

/// Crate error type
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Authentication identifier names a namespace the registry does not know
    #[error("unknown authentication namespace '{namespace}' in '{identifier}' (known: {known})")]
    UnknownAuthNamespace {
        /// Full identifier as configured
        identifier: String,
        /// Namespace part of the identifier
        namespace: String,
        /// Comma separated list of registered identifiers
        known: String,
    },

    /// Authentication namespace exists but has no such member
    #[error("authentication namespace '{namespace}' has no member '{member}' (known: {known})")]
    UnknownAuthMember {
        /// Namespace part of the identifier
        namespace: String,
        /// Member part of the identifier
        member: String,
        /// Comma separated list of registered identifiers
        known: String,
    },

    /// The endpoint rejected the configured credentials during the connect probe
    #[error("bad credentials for database {alias} on {url}")]
    BadCredentials {
        /// Connection alias
        alias: String,
        /// Endpoint URL as configured
        url: String,
    },

    /// HTTP transport failure (connect, timeout, TLS, decoding)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Permanently unsupported operation
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Operation attempted in the wrong connection state
    #[error("invalid state: expected {expected}, got {actual}")]
    InvalidState {
        /// Expected state
        expected: String,
        /// Actual state
        actual: String,
    },
}

impl Error {
    /// Stable category label, used for metrics and logs
    pub fn category(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::UnknownAuthNamespace { .. } | Error::UnknownAuthMember { .. } => "resolution",
            Error::BadCredentials { .. } => "operational",
            Error::Transport(_) => "transport",
            Error::NotSupported(_) => "not_supported",
            Error::InvalidState { .. } => "state",
        }
    }

    /// Configuration or strategy resolution failure
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::UnknownAuthNamespace { .. } | Error::UnknownAuthMember { .. }
        )
    }

    /// Fatal operational failure detected against the remote endpoint
    pub fn is_operational(&self) -> bool {
        matches!(self, Error::BadCredentials { .. })
    }

    /// Lower-level connectivity failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Deliberate capability gap
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Error::NotSupported(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_credentials_message() {
        let err = Error::BadCredentials {
            alias: "default".into(),
            url: "https://api.example.com/db/".into(),
        };
        assert_eq!(
            err.to_string(),
            "bad credentials for database default on https://api.example.com/db/"
        );
        assert!(err.is_operational());
        assert_eq!(err.category(), "operational");
    }

    #[test]
    fn test_resolution_errors_are_configuration() {
        let err = Error::UnknownAuthMember {
            namespace: "rest_wire.auth".into(),
            member: "Nope".into(),
            known: "rest_wire.auth.BasicAuth".into(),
        };
        assert!(err.is_configuration());
        assert!(!err.is_operational());
        assert_eq!(err.category(), "resolution");
        assert!(err.to_string().contains("rest_wire.auth.BasicAuth"));
    }

    #[test]
    fn test_not_supported_category() {
        let err = Error::NotSupported("no cursor".into());
        assert!(err.is_not_supported());
        assert!(!err.is_transport());
        assert_eq!(err.category(), "not_supported");
    }
}
