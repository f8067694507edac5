//! Histogram metrics

use metrics::histogram;

/// Probe round-trip time in milliseconds
pub fn probe_duration(kind: &'static str, duration_ms: u64) {
    histogram!("rest_wire_probe_duration_ms", "kind" => kind).record(duration_ms as f64);
}
