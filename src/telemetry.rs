//! Tracing and diagnostics bootstrap helpers.
//!
//! The crate itself only emits `tracing` events; embedding applications
//! decide how to subscribe. These helpers wire the common setup: an
//! env-filtered fmt layer plus span-trace capture for error reports.

use tracing_error::ErrorLayer;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the default tracing subscriber.
///
/// Respects `RUST_LOG`; falls back to errors only. Safe to call more than
/// once (later calls are no-ops), which keeps it usable from tests.
pub fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("error,roadweave=error"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .try_init();
}

/// Install miette's pretty panic reports.
pub fn init_panic_reporting() {
    miette::set_panic_hook();
}
