//! Core connection type

use super::settings::Settings;
use super::state::ConnectionState;
use super::transport::Session;
use crate::auth::{global_registry, AuthRegistry, AuthStrategy};
use crate::cursor::UnsupportedCursor;
use crate::features::{Features, FEATURES};
use crate::metrics::{counters, histograms, labels};
use crate::{Error, Result};
use reqwest::{StatusCode, Url};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Parameters for opening a session
///
/// Built once per connection attempt and never modified afterwards.
#[derive(Clone)]
pub struct ConnectionParams {
    url: Url,
    auth: Arc<dyn AuthStrategy>,
}

impl ConnectionParams {
    /// Endpoint URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Resolved authentication strategy
    pub fn auth(&self) -> &Arc<dyn AuthStrategy> {
        &self.auth
    }
}

impl std::fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("url", &self.url.as_str())
            .field("auth", &self.auth.name())
            .finish()
    }
}

/// Relational-style connection backed by an HTTP resource API
///
/// Always in autocommit: every operation is atomic at the granularity of one
/// HTTP request and no transaction object ever exists. Transaction-control
/// calls are accepted and ignored so callers that issue them unconditionally
/// keep working.
///
/// One connection per logical execution context; nothing here coordinates
/// concurrent use of a single connection.
#[derive(Debug)]
pub struct Connection {
    settings: Settings,
    registry: Arc<AuthRegistry>,
    state: ConnectionState,
    params: Option<ConnectionParams>,
    session: Option<Session>,
}

impl Connection {
    /// Create a connection using the process-wide strategy registry
    pub fn new(settings: Settings) -> Self {
        Self::with_registry(settings, global_registry())
    }

    /// Create a connection resolving strategies from `registry`
    pub fn with_registry(settings: Settings, registry: Arc<AuthRegistry>) -> Self {
        Self {
            settings,
            registry,
            state: ConnectionState::Uninitialized,
            params: None,
            session: None,
        }
    }

    /// Connection alias
    pub fn alias(&self) -> &str {
        self.settings.alias()
    }

    /// Settings this connection was created with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get current connection state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Parameters of the last connection attempt
    pub fn params(&self) -> Option<&ConnectionParams> {
        self.params.as_ref()
    }

    /// Open session, if any
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Always true
    pub const fn autocommit(&self) -> bool {
        true
    }

    /// Capability descriptor shared by all connections
    pub fn features(&self) -> &'static Features {
        &FEATURES
    }

    /// Resolve the authentication strategy and package connection parameters
    ///
    /// Pure function of the settings: no network I/O and no state change, so
    /// a broken `AUTH` value fails here before anything is sent.
    pub fn build_connection_params(&self) -> Result<ConnectionParams> {
        let auth = self.registry.resolve_for(&self.settings)?;
        Ok(ConnectionParams {
            url: self.settings.url().clone(),
            auth,
        })
    }

    /// Construct a session for `params`. No network I/O.
    pub fn open_connection(&self, params: &ConnectionParams) -> Result<Session> {
        Session::new(
            params.url.clone(),
            params.auth.clone(),
            self.settings.tls(),
            self.settings.request_timeout(),
        )
    }

    /// Probe the endpoint with the open session
    ///
    /// A 403 answer is fatal and reported as bad credentials. Other statuses
    /// are accepted here; transport errors propagate unchanged.
    pub async fn init_connection_state(&mut self) -> Result<()> {
        let session = self.session.as_ref().ok_or_else(|| Error::InvalidState {
            expected: "open session".into(),
            actual: self.state.to_string(),
        })?;
        self.verify_session(session).await
    }

    async fn verify_session(&self, session: &Session) -> Result<()> {
        counters::probe_attempted(labels::PROBE_CONNECT);
        let started = Instant::now();

        let status = match session.probe(self.settings.probe_timeout()).await {
            Ok(status) => status,
            Err(e) => {
                counters::probe_failed(labels::PROBE_CONNECT, failure_reason(&e));
                return Err(e);
            }
        };
        histograms::probe_duration(labels::PROBE_CONNECT, started.elapsed().as_millis() as u64);

        if status == StatusCode::FORBIDDEN {
            tracing::warn!("endpoint rejected credentials");
            counters::probe_failed(labels::PROBE_CONNECT, labels::REASON_FORBIDDEN);
            counters::auth_rejected();
            return Err(Error::BadCredentials {
                alias: self.settings.alias().to_string(),
                url: self.settings.name().to_string(),
            });
        }

        if !status.is_success() {
            tracing::debug!(%status, "initial probe returned non-success status");
        }

        Ok(())
    }

    /// Build parameters, open the session and run the initial probe
    ///
    /// The session is kept only once the probe passes. A failed or cancelled
    /// attempt leaves no session behind and may be retried.
    pub async fn connect(&mut self) -> Result<()> {
        let alias = self.settings.alias().to_string();
        let url = self.settings.name().to_string();

        async {
            let params = self.build_connection_params()?;
            if self.state != ConnectionState::ParamsBuilt {
                self.state.transition(ConnectionState::ParamsBuilt)?;
            }

            let session = self.open_connection(&params)?;
            self.state.transition(ConnectionState::Connecting)?;

            if let Err(e) = self.verify_session(&session).await {
                self.state.transition(ConnectionState::ParamsBuilt)?;
                return Err(e);
            }

            self.params = Some(params);
            self.session = Some(session);
            self.state.transition(ConnectionState::Connected)?;
            counters::connection_opened();
            tracing::info!("connected");
            Ok(())
        }
        .instrument(tracing::info_span!("connect", alias = %alias, url = %url))
        .await
    }

    /// Connect unless already connected
    pub async fn ensure_connection(&mut self) -> Result<()> {
        if self.state == ConnectionState::Connected {
            return Ok(());
        }
        self.connect().await
    }

    /// New cursor. No I/O.
    pub fn create_cursor(&self) -> UnsupportedCursor {
        UnsupportedCursor::new()
    }

    /// No-op. The session stays open so keep-alive connections are reused;
    /// use [`Connection::disconnect`] to drop it.
    pub fn close(&mut self) {
        tracing::trace!("close requested, session kept");
    }

    /// Drop the session
    pub fn disconnect(&mut self) -> Result<()> {
        self.session = None;
        self.state.transition(ConnectionState::Closed)
    }

    /// Liveness check: true iff a fresh probe gets any HTTP answer
    ///
    /// Never fails; transport errors and timeouts yield false.
    pub async fn is_usable(&self) -> bool {
        let Some(session) = &self.session else {
            return false;
        };

        counters::probe_attempted(labels::PROBE_LIVENESS);
        let started = Instant::now();

        match session.probe(self.settings.probe_timeout()).await {
            Ok(status) => {
                histograms::probe_duration(
                    labels::PROBE_LIVENESS,
                    started.elapsed().as_millis() as u64,
                );
                tracing::trace!(%status, "liveness probe answered");
                true
            }
            Err(e) => {
                counters::probe_failed(labels::PROBE_LIVENESS, failure_reason(&e));
                tracing::warn!(alias = %self.settings.alias(), error = %e, "liveness probe failed");
                false
            }
        }
    }

    /// No-op: autocommit cannot be disabled
    pub fn set_autocommit(&mut self, autocommit: bool) {
        if !autocommit {
            tracing::debug!("ignoring request to disable autocommit");
        }
    }

    /// No-op, kept for interface compatibility
    pub fn start_transaction_under_autocommit(&mut self) {}
}

fn failure_reason(err: &Error) -> &'static str {
    match err {
        Error::Transport(e) if e.is_timeout() => labels::REASON_TIMEOUT,
        _ => labels::REASON_TRANSPORT,
    }
}
