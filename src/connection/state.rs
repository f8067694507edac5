//! Connection state machine

use crate::{Error, Result};

/// Connection state
///
/// There are no transaction sub-states: `Connected` is the single steady
/// state and every operation runs in autocommit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Created, nothing resolved yet
    Uninitialized,

    /// Authentication resolved, parameters packaged
    ParamsBuilt,

    /// Session opened, initial probe pending
    Connecting,

    /// Initial probe passed
    Connected,

    /// Session torn down
    Closed,
}

impl ConnectionState {
    /// Check if transition is valid
    pub fn can_transition_to(&self, next: ConnectionState) -> bool {
        use ConnectionState::*;

        matches!(
            (self, next),
            (Uninitialized, ParamsBuilt)
                | (Closed, ParamsBuilt)
                | (ParamsBuilt, Connecting)
                | (Connecting, Connected)
                | (Connecting, ParamsBuilt)
                | (_, Closed)
        )
    }

    /// Transition to new state
    pub fn transition(&mut self, next: ConnectionState) -> Result<()> {
        if !self.can_transition_to(next) {
            return Err(Error::InvalidState {
                expected: format!("valid transition from {:?}", self),
                actual: format!("{:?}", next),
            });
        }
        tracing::trace!(from = %self, to = %next, "connection state transition");
        *self = next;
        Ok(())
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::ParamsBuilt => write!(f, "params_built"),
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
            Self::Closed => write!(f, "closed"),
        }
    }
}
