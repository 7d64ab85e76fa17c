//! Tracing/logging setup shared by the storefront binaries.

/// Initialize process-wide tracing with the default JSON output.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;
