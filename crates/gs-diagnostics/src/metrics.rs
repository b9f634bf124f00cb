//! Prometheus metrics for the game session crates.
//!
//! All metrics follow the naming convention: `gs_<crate>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., requests_denied_total)
//! - **Gauge**: Value that can go up or down (e.g., players_connected)

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Gauge, Opts, Registry, TextEncoder};

use crate::DiagnosticsError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // SYNC METRICS
    // =========================================================================

    /// Messages sent to clients, by message type
    pub static ref MESSAGES_SENT: CounterVec = CounterVec::new(
        Opts::new("gs_sync_messages_sent_total", "Messages sent to clients"),
        &["message"]
    ).expect("metric creation failed");

    /// Messages received from clients, by message type
    pub static ref MESSAGES_RECEIVED: CounterVec = CounterVec::new(
        Opts::new("gs_sync_messages_received_total", "Messages received from clients"),
        &["message"]
    ).expect("metric creation failed");

    /// Requests dropped for lack of permission
    pub static ref REQUESTS_DENIED: CounterVec = CounterVec::new(
        Opts::new("gs_sync_requests_denied_total", "Requests silently dropped for lack of permission"),
        &["message"]
    ).expect("metric creation failed");

    /// Frames rejected before dispatch
    pub static ref FRAMES_REJECTED: CounterVec = CounterVec::new(
        Opts::new("gs_sync_frames_rejected_total", "Frames rejected before dispatch"),
        &["reason"]  // reason: version/malformed
    ).expect("metric creation failed");

    // =========================================================================
    // PLAYER METRICS
    // =========================================================================

    /// Players currently connected to the server
    pub static ref PLAYERS_CONNECTED: Gauge = Gauge::new(
        "gs_players_connected",
        "Number of players currently connected"
    ).expect("metric creation failed");

    /// Vitals snapshots taken from live entities
    pub static ref VITALS_REFRESHES: Counter = Counter::new(
        "gs_players_vitals_refreshes_total",
        "Total vitals snapshots taken from live entities"
    ).expect("metric creation failed");

    /// Permission record loads, by the source that satisfied them
    pub static ref PERMISSION_LOADS: CounterVec = CounterVec::new(
        Opts::new("gs_players_permission_loads_total", "Permission record loads by source"),
        &["source"]  // source: guid/guid_legacy/steam/steam_legacy/none
    ).expect("metric creation failed");

    /// Store operations that failed
    pub static ref STORE_ERRORS: CounterVec = CounterVec::new(
        Opts::new("gs_players_store_errors_total", "Failed player store operations"),
        &["operation"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Calling this more than once is harmless.
pub fn register_metrics() -> Result<(), DiagnosticsError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Sync
        Box::new(MESSAGES_SENT.clone()),
        Box::new(MESSAGES_RECEIVED.clone()),
        Box::new(REQUESTS_DENIED.clone()),
        Box::new(FRAMES_REJECTED.clone()),
        // Players
        Box::new(PLAYERS_CONNECTED.clone()),
        Box::new(VITALS_REFRESHES.clone()),
        Box::new(PERMISSION_LOADS.clone()),
        Box::new(STORE_ERRORS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(DiagnosticsError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, DiagnosticsError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| DiagnosticsError::Encode(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| DiagnosticsError::Encode(e.to_string()))
}
