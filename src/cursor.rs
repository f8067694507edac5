//! Cursor surface
//!
//! Generic callers expect a cursor they can hand statements to. This adapter
//! is not a relational engine, so the only implementation refuses every
//! statement with a typed error instead of a missing method.

use crate::{Error, Result};

/// Statement execution surface
pub trait Cursor {
    /// Execute a statement
    fn execute(&mut self, statement: &str) -> Result<()>;

    /// Release the cursor
    fn close(&mut self);

    /// Whether `close` has been called
    fn is_closed(&self) -> bool;
}

/// Cursor that rejects all ad-hoc statements
///
/// Never touches the network. Data access goes through structured resource
/// calls on the session instead.
#[derive(Debug, Default)]
pub struct UnsupportedCursor {
    closed: bool,
}

impl UnsupportedCursor {
    /// Create a cursor
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cursor for UnsupportedCursor {
    fn execute(&mut self, statement: &str) -> Result<()> {
        tracing::debug!(len = statement.len(), "rejected ad-hoc statement");
        Err(Error::NotSupported(
            "not a relational engine; no ad-hoc statement execution".into(),
        ))
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_always_fails() {
        let mut cursor = UnsupportedCursor::new();
        for sql in ["SELECT 1", "", "BEGIN", "INSERT INTO t VALUES (1)"] {
            let err = cursor.execute(sql).unwrap_err();
            assert!(err.is_not_supported());
            assert!(err.to_string().contains("not a relational engine"));
        }
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut cursor = UnsupportedCursor::new();
        assert!(!cursor.is_closed());
        cursor.close();
        cursor.close();
        assert!(cursor.is_closed());
    }

    #[test]
    fn test_execute_after_close_still_not_supported() {
        let mut cursor = UnsupportedCursor::new();
        cursor.close();
        assert!(matches!(cursor.execute("SELECT 1"), Err(Error::NotSupported(_))));
    }

    #[test]
    fn test_usable_as_trait_object() {
        let mut cursor: Box<dyn Cursor> = Box::new(UnsupportedCursor::new());
        assert!(cursor.execute("SELECT 1").is_err());
    }
}
