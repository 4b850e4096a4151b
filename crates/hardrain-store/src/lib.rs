//! Hard Rain — line persistence sinks.

pub mod pg_line_sink;
pub mod schema;
pub mod tracing_line_sink;

pub use pg_line_sink::PgLineSink;
pub use tracing_line_sink::TracingLineSink;
