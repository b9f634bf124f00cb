//! # GS Diagnostics
//!
//! Logging and metrics shared by every game session crate.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` registry with an `EnvFilter` and a
//!   pretty or JSON formatter
//! - **Metrics**: Prometheus counters and gauges in a process-wide registry
//! - **Audit**: denied requests are logged under the `audit` target
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gs_diagnostics::{init_logging, register_metrics, DiagnosticsConfig};
//!
//! fn main() {
//!     let config = DiagnosticsConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//!     register_metrics().expect("Failed to register metrics");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GS_SERVICE_NAME` | `game-session` | Service name attached to the startup log |
//! | `GS_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `GS_JSON_LOGS` | `false` | Emit JSON lines instead of pretty output |
//! | `GS_CONSOLE_OUTPUT` | `true` | Write logs to stdout at all |

mod config;
mod logging;
pub mod metrics;

pub use config::DiagnosticsConfig;
pub use logging::{init_logging, AUDIT_TARGET};
pub use metrics::{
    encode_metrics, register_metrics, FRAMES_REJECTED, MESSAGES_RECEIVED, MESSAGES_SENT,
    PERMISSION_LOADS, PLAYERS_CONNECTED, REQUESTS_DENIED, STORE_ERRORS, VITALS_REFRESHES,
};

use thiserror::Error;

/// Diagnostics initialization errors
#[derive(Error, Debug)]
pub enum DiagnosticsError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Failed to encode metrics: {0}")]
    Encode(String),
}

/// Increment a counter, optionally selecting label values.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}

/// Record a denied request: audit log plus the denial counter.
///
/// ```rust,ignore
/// audit_denied!("UpdatePlayer", guid = %sender, permission = PERM_PLAYER_READ);
/// ```
#[macro_export]
macro_rules! audit_denied {
    ($message:expr $(, $($field:tt)*)?) => {{
        tracing::info!(
            target: $crate::AUDIT_TARGET,
            message_type = $message,
            $($($field)*,)?
            "Request denied"
        );
        $crate::metrics::REQUESTS_DENIED
            .with_label_values(&[$message])
            .inc();
    }};
}
