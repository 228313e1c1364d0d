/// URL for accessing the PostgreSQL database which holds the `todo_item` table
pub const DB_URL: &str = "DATABASE_URL";
/// Socket address the HTTP server listens on, such as `0.0.0.0:8080`
pub const LISTEN_ADDR: &str = "LISTEN_ADDR";
/// Log level configuration for the application. For formatting info, see [EnvFilter's documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// OpenTelemetry span export URL. Should be http://localhost:4317 when the service runs next to
/// an OpenTelemetry collector sidecar. Spans are only exported if this and [OTEL_METRIC_EXPORT_URL]
/// are both set.
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL, see [OTEL_SPAN_EXPORT_URL]
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";

/// Address used when [LISTEN_ADDR] is not set
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
