//! Counter metrics

use metrics::counter;

/// A probe was sent
pub fn probe_attempted(kind: &'static str) {
    counter!("rest_wire_probes_total", "kind" => kind).increment(1);
}

/// A probe failed
pub fn probe_failed(kind: &'static str, reason: &'static str) {
    counter!("rest_wire_probe_failures_total", "kind" => kind, "reason" => reason).increment(1);
}

/// An authentication strategy was resolved
pub fn auth_resolved(strategy: &'static str) {
    counter!("rest_wire_auth_resolved_total", "strategy" => strategy).increment(1);
}

/// The endpoint rejected credentials at connect time
pub fn auth_rejected() {
    counter!("rest_wire_auth_rejected_total").increment(1);
}

/// A connection reached the connected state
pub fn connection_opened() {
    counter!("rest_wire_connections_total").increment(1);
}
