//! Strategy registry
//!
//! Identifiers have the form `<namespace>.<Member>`: everything before the
//! last dot names the namespace, the last segment names a member registered
//! directly in it. Members are never nested further.

use super::strategies::{BasicAuth, BearerAuth, NoAuth};
use super::AuthStrategy;
use crate::connection::Settings;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// Namespace holding the built-in strategies
pub const BUILTIN_NAMESPACE: &str = "rest_wire.auth";

/// Strategy used when no identifier is configured
pub const DEFAULT_AUTH: &str = "rest_wire.auth.BasicAuth";

/// Constructor for a strategy, seeded from settings
pub type AuthFactory = fn(&Settings) -> Result<Arc<dyn AuthStrategy>>;

/// Mapping from dotted identifier to strategy constructor
#[derive(Clone, Default)]
pub struct AuthRegistry {
    namespaces: BTreeMap<String, BTreeMap<String, AuthFactory>>,
}

impl std::fmt::Debug for AuthRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRegistry")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}

/// Split `identifier` at its last dot
fn split_identifier(identifier: &str) -> Option<(&str, &str)> {
    let (namespace, member) = identifier.rsplit_once('.')?;
    if namespace.is_empty() || member.is_empty() {
        return None;
    }
    Some((namespace, member))
}

impl AuthRegistry {
    /// Registry with no strategies
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the built-in strategies
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.insert(BUILTIN_NAMESPACE, "BasicAuth", |s| {
            Ok(Arc::new(BasicAuth::from_settings(s)?))
        });
        registry.insert(BUILTIN_NAMESPACE, "BearerAuth", |s| {
            Ok(Arc::new(BearerAuth::from_settings(s)?))
        });
        registry.insert(BUILTIN_NAMESPACE, "NoAuth", |s| {
            Ok(Arc::new(NoAuth::from_settings(s)?))
        });
        registry
    }

    fn insert(&mut self, namespace: &str, member: &str, factory: AuthFactory) {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(member.to_string(), factory);
    }

    /// Register a strategy under a dotted identifier
    ///
    /// Replaces any strategy already registered under the same identifier.
    pub fn register(&mut self, identifier: &str, factory: AuthFactory) -> Result<()> {
        let (namespace, member) = split_identifier(identifier).ok_or_else(|| {
            Error::Config(format!(
                "authentication identifier '{}' must have the form <namespace>.<Member>",
                identifier
            ))
        })?;
        self.insert(namespace, member, factory);
        Ok(())
    }

    /// All registered identifiers, sorted
    pub fn identifiers(&self) -> Vec<String> {
        self.namespaces
            .iter()
            .flat_map(|(ns, members)| members.keys().map(move |m| format!("{}.{}", ns, m)))
            .collect()
    }

    /// Check whether `identifier` resolves
    pub fn contains(&self, identifier: &str) -> bool {
        split_identifier(identifier)
            .and_then(|(ns, member)| self.namespaces.get(ns)?.get(member))
            .is_some()
    }

    /// Resolve and instantiate the strategy for `identifier`
    ///
    /// # Errors
    ///
    /// `UnknownAuthNamespace` when the namespace is not registered,
    /// `UnknownAuthMember` when the member is absent from it, and whatever
    /// the strategy returns when its settings are unusable.
    pub fn resolve(&self, identifier: &str, settings: &Settings) -> Result<Arc<dyn AuthStrategy>> {
        let (namespace, member) = match split_identifier(identifier) {
            Some(parts) => parts,
            None => ("", identifier),
        };

        let members = self
            .namespaces
            .get(namespace)
            .ok_or_else(|| Error::UnknownAuthNamespace {
                identifier: identifier.to_string(),
                namespace: namespace.to_string(),
                known: self.identifiers().join(", "),
            })?;

        let factory = members.get(member).ok_or_else(|| Error::UnknownAuthMember {
            namespace: namespace.to_string(),
            member: member.to_string(),
            known: self.identifiers().join(", "),
        })?;

        let strategy = factory(settings)?;
        tracing::debug!(identifier, strategy = strategy.name(), "resolved authentication strategy");
        crate::metrics::counters::auth_resolved(strategy.name());
        Ok(strategy)
    }

    /// Resolve the identifier configured in `settings`, or the default
    pub fn resolve_for(&self, settings: &Settings) -> Result<Arc<dyn AuthStrategy>> {
        self.resolve(settings.auth().unwrap_or(DEFAULT_AUTH), settings)
    }
}

static GLOBAL_REGISTRY: OnceLock<Arc<AuthRegistry>> = OnceLock::new();

/// Process-wide registry holding the built-in strategies
pub fn global_registry() -> Arc<AuthRegistry> {
    GLOBAL_REGISTRY
        .get_or_init(|| Arc::new(AuthRegistry::with_builtins()))
        .clone()
}
