use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Initialize structured logging for the stamp workflow.
///
/// JSON output with span context, so one correlation id links a
/// transition event to every registry, relay, and update call made on
/// its behalf.
pub fn init_telemetry() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true),
        )
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Hanko Relay telemetry initialized with structured logging");
    Ok(())
}

/// Generate a correlation ID for linking related operations
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create a span carrying common stamp-workflow attributes
pub fn create_workflow_span(
    operation: &str,
    correlation_id: &str,
    record_id: Option<u64>,
) -> tracing::Span {
    tracing::info_span!(
        "stamp_workflow",
        operation = operation,
        record.id = record_id,
        correlation.id = correlation_id,
        otel.kind = "internal"
    )
}
