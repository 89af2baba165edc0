//! Tracing and logging setup shared by both tiers.

/// Initialize process-wide tracing for `service`.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init(service: &'static str) {
    tracing::init(service);
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogFormat;
