//! Tracing and logging (shared setup).

/// Initialize process-wide logging.
///
/// `default_filter` applies when `RUST_LOG` is not set. Safe to call multiple
/// times; subsequent calls become no-ops.
pub fn init(default_filter: &str) {
    tracing::init(default_filter);
}

/// Subscriber configuration (filters, layers).
pub mod tracing;
