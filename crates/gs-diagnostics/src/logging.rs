//! Log subscriber installation.
//!
//! Every crate logs through `tracing` macros; this module decides where the
//! events go. Denied requests are emitted under [`AUDIT_TARGET`] so they can
//! be filtered separately (`GS_LOG_LEVEL=warn,audit=info`).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{DiagnosticsConfig, DiagnosticsError};

/// Target used for access-control audit events.
pub const AUDIT_TARGET: &str = "audit";

/// Install the global log subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(config: &DiagnosticsConfig) -> Result<(), DiagnosticsError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| DiagnosticsError::LoggingInit(e.to_string()))?;

    if !config.console_output {
        tracing_subscriber::registry()
            .with(env_filter)
            .try_init()
            .map_err(|e| DiagnosticsError::LoggingInit(e.to_string()))?;
        return Ok(());
    }

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| DiagnosticsError::LoggingInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| DiagnosticsError::LoggingInit(e.to_string()))?;
    }

    tracing::info!(
        service = %config.service_name,
        level = %config.log_level,
        json = config.json_logs,
        "Logging initialized"
    );

    Ok(())
}
