//! Capability descriptor
//!
//! Static table of the relational capabilities this adapter supports.
//! Anything that relies on SQL-only semantics is reported as unsupported;
//! names missing from the table are treated as unsupported too.

/// How far a single operation is atomic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atomicity {
    /// Each HTTP request succeeds or fails on its own
    PerRequest,
}

/// Capability value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Supported or not
    Flag(bool),
    /// Atomicity granularity
    Atomicity(Atomicity),
    /// Free-form descriptor
    Text(&'static str),
}

impl Capability {
    /// Truthiness: `Flag(b)` is `b`, other values count as present
    pub fn is_enabled(&self) -> bool {
        match self {
            Capability::Flag(flag) => *flag,
            Capability::Atomicity(_) | Capability::Text(_) => true,
        }
    }
}

/// Read-only capability table
#[derive(Debug)]
pub struct Features {
    entries: &'static [(&'static str, Capability)],
}

/// Capabilities shared by every connection
pub static FEATURES: Features = Features {
    entries: &[
        ("vendor", Capability::Text("rest_api")),
        ("atomicity", Capability::Atomicity(Atomicity::PerRequest)),
        ("autocommit", Capability::Flag(true)),
        ("supports_transactions", Capability::Flag(false)),
        ("uses_savepoints", Capability::Flag(false)),
        ("can_release_savepoints", Capability::Flag(false)),
        ("supports_sequences", Capability::Flag(false)),
        ("supports_returning", Capability::Flag(false)),
        ("can_return_rows_from_bulk_insert", Capability::Flag(false)),
        ("supports_ad_hoc_statements", Capability::Flag(false)),
        ("supports_select_for_update", Capability::Flag(false)),
        ("supports_foreign_keys", Capability::Flag(false)),
        ("supports_check_constraints", Capability::Flag(false)),
        ("supports_partial_indexes", Capability::Flag(false)),
        ("supports_timezones", Capability::Flag(false)),
        ("supports_json_field", Capability::Flag(false)),
        ("can_introspect_foreign_keys", Capability::Flag(false)),
        ("can_rollback_ddl", Capability::Flag(false)),
        ("atomic_transactions", Capability::Flag(false)),
    ],
};

impl Features {
    /// Look up a capability
    pub fn get(&self, name: &str) -> Option<Capability> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    /// Whether a capability is available; unknown names are not
    pub fn is_supported(&self, name: &str) -> bool {
        self.get(name).is_some_and(|c| c.is_enabled())
    }

    /// All entries, in table order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Capability)> + '_ {
        self.entries.iter().copied()
    }

    /// Vendor string
    pub fn vendor(&self) -> &'static str {
        match self.get("vendor") {
            Some(Capability::Text(vendor)) => vendor,
            _ => "unknown",
        }
    }

    /// Always false: no transaction object ever exists
    pub fn supports_transactions(&self) -> bool {
        self.is_supported("supports_transactions")
    }

    /// Always false
    pub fn uses_savepoints(&self) -> bool {
        self.is_supported("uses_savepoints")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_relational_features_unsupported() {
        for name in [
            "supports_transactions",
            "uses_savepoints",
            "supports_sequences",
            "supports_returning",
            "supports_ad_hoc_statements",
        ] {
            assert_eq!(FEATURES.get(name), Some(Capability::Flag(false)), "{}", name);
            assert!(!FEATURES.is_supported(name));
        }
        assert!(!FEATURES.supports_transactions());
        assert!(!FEATURES.uses_savepoints());
    }

    #[test]
    fn test_unknown_capability_is_unsupported() {
        assert_eq!(FEATURES.get("supports_window_functions"), None);
        assert!(!FEATURES.is_supported("supports_window_functions"));
    }

    #[test]
    fn test_autocommit_and_atomicity() {
        assert!(FEATURES.is_supported("autocommit"));
        assert_eq!(
            FEATURES.get("atomicity"),
            Some(Capability::Atomicity(Atomicity::PerRequest))
        );
        assert_eq!(FEATURES.vendor(), "rest_api");
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = FEATURES.iter().map(|(name, _)| name).collect();
        assert_eq!(names.len(), FEATURES.iter().count());
    }

    #[test]
    fn test_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| FEATURES.supports_transactions()))
            .collect();
        for handle in handles {
            assert!(!handle.join().unwrap());
        }
    }
}
