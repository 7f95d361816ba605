use tracing_subscriber::EnvFilter;

/// Initialise logging for a host embedding the capture surface. Pass the
/// `debug_logging` flag from [`crate::settings::CaptureSettings`].
///
/// Seed discards, decode failures and settings adjustments are reported
/// through `tracing`; without a subscriber installed those events are lost.
pub fn init(debug: bool) {
    // Only honor `RUST_LOG` when debug logging was requested. A stray
    // variable in the host's environment must not turn on verbose output.
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    // Another subscriber may already be installed by the host; that one wins.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
