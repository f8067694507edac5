//! TLS for HTTPS endpoints
//!
//! The session normally relies on the HTTP client's own rustls setup. A
//! [`TlsConfig`] replaces it when the endpoint is signed by a private CA, or
//! when certificate checks have to be switched off on a development box.

use crate::{Error, Result};
use rustls::{ClientConfig, RootCertStore};
use rustls_pki_types::CertificateDer;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Trust settings for the HTTP session
///
/// ```ignore
/// use rest_wire::connection::{Settings, TlsConfig};
///
/// let tls = TlsConfig::builder()
///     .ca_bundle("/etc/ssl/internal-ca.pem")
///     .build()?;
///
/// let settings = Settings::builder("default", "https://api.internal/db/")
///     .tls(tls)
///     .build()?;
/// ```
#[derive(Clone)]
pub struct TlsConfig {
    ca_bundle: Option<PathBuf>,
    accept_invalid_certs: bool,
    roots: usize,
    rustls: Arc<ClientConfig>,
}

impl TlsConfig {
    /// Start a new builder
    pub fn builder() -> TlsConfigBuilder {
        TlsConfigBuilder::default()
    }

    /// Compiled rustls configuration handed to the HTTP client
    pub fn client_config(&self) -> Arc<ClientConfig> {
        Arc::clone(&self.rustls)
    }

    /// PEM bundle the roots were read from, if not the platform store
    pub fn ca_bundle(&self) -> Option<&Path> {
        self.ca_bundle.as_deref()
    }

    /// Number of trust anchors loaded
    pub fn root_count(&self) -> usize {
        self.roots
    }

    /// True when server certificates are not verified
    pub fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    pub(crate) fn apply(&self, builder: reqwest::ClientBuilder) -> reqwest::ClientBuilder {
        if self.accept_invalid_certs {
            tracing::warn!("server certificate verification is disabled");
            return builder.danger_accept_invalid_certs(true);
        }
        builder.use_preconfigured_tls(ClientConfig::clone(&self.rustls))
    }
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("ca_bundle", &self.ca_bundle)
            .field("roots", &self.roots)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish_non_exhaustive()
    }
}

/// Builder for [`TlsConfig`]
#[derive(Debug, Default)]
pub struct TlsConfigBuilder {
    ca_bundle: Option<PathBuf>,
    accept_invalid_certs: bool,
}

impl TlsConfigBuilder {
    /// Trust only the certificates in this PEM file
    pub fn ca_bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_bundle = Some(path.into());
        self
    }

    /// Skip server certificate verification. Development only.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Load the trust anchors and compile the rustls configuration
    ///
    /// # Errors
    ///
    /// `Error::Config` when the CA bundle cannot be read or holds no
    /// usable certificate.
    pub fn build(self) -> Result<TlsConfig> {
        let roots = match &self.ca_bundle {
            Some(path) => roots_from_bundle(path)?,
            None => platform_roots(),
        };
        let count = roots.len();

        let rustls = ClientConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()
        .map_err(|e| Error::Config(format!("TLS protocol setup failed: {}", e)))?
        .with_root_certificates(roots)
        .with_no_client_auth();

        tracing::debug!(roots = count, custom = self.ca_bundle.is_some(), "TLS configured");

        Ok(TlsConfig {
            ca_bundle: self.ca_bundle,
            accept_invalid_certs: self.accept_invalid_certs,
            roots: count,
            rustls: Arc::new(rustls),
        })
    }
}

fn platform_roots() -> RootCertStore {
    let mut store = RootCertStore::empty();
    let native = rustls_native_certs::load_native_certs();
    if !native.errors.is_empty() {
        tracing::debug!(errors = native.errors.len(), "skipped unreadable platform certificates");
    }
    store.add_parsable_certificates(native.certs);

    if store.is_empty() {
        tracing::debug!("platform store empty, using webpki roots");
        store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }
    store
}

fn roots_from_bundle(path: &Path) -> Result<RootCertStore> {
    let file = std::fs::File::open(path).map_err(|e| {
        Error::Config(format!("cannot open CA bundle {}: {}", path.display(), e))
    })?;

    let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut BufReader::new(file))
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| Error::Config(format!("malformed CA bundle {}: {}", path.display(), e)))?;

    let mut store = RootCertStore::empty();
    store.add_parsable_certificates(certs);
    if store.is_empty() {
        return Err(Error::Config(format!(
            "CA bundle {} contains no usable certificate",
            path.display()
        )));
    }
    Ok(store)
}
