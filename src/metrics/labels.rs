//! Metric label values

/// Probe issued by `init_connection_state`
pub const PROBE_CONNECT: &str = "connect";
/// Probe issued by `is_usable`
pub const PROBE_LIVENESS: &str = "liveness";

/// Probe failed below HTTP (refused, reset, DNS)
pub const REASON_TRANSPORT: &str = "transport";
/// Probe exceeded its deadline
pub const REASON_TIMEOUT: &str = "timeout";
/// Endpoint answered 403
pub const REASON_FORBIDDEN: &str = "forbidden";
