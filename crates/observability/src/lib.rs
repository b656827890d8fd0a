//! Tracing and logging (shared setup).

/// Initialize process-wide tracing/logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format, tracing::DEFAULT_FILTER);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use tracing::LogFormat;
