//! Logging setup for the generator binary
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=info` - report loaded definitions and written files
//! - `RUST_LOG=sublime_keymap::keymap=debug` - preprocessing details

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the tracing subscriber
///
/// Logs go to stderr so that `--stdout` output stays a clean keymap file.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
