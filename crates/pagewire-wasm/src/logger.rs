//! Logging to the browser's developer tools console.
//!
//! Installs a `tracing-wasm` layer behind an `EnvFilter`, so `tracing` events
//! from the core show up as `console.*` calls with their fields attached.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tracing_wasm::{WASMLayer, WASMLayerConfigBuilder};

/// Initialize the global subscriber.
///
/// `verbose` enables debug-level events for the pagewire crates; otherwise
/// only info and above are shown. Safe to call more than once: later calls
/// leave the first subscriber in place.
pub fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("pagewire=debug,pagewire_wasm=debug")
    } else {
        EnvFilter::new("pagewire=info,pagewire_wasm=info")
    };

    let console_layer = WASMLayer::new(
        WASMLayerConfigBuilder::new()
            .set_report_logs_in_timings(false)
            .build(),
    );

    // Another subscriber may already be installed (tests, a host page that
    // set one up); keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
