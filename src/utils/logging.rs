use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map the CLI verbosity flags onto a `tracing` level name.
pub fn log_level(verbose: bool, quiet: bool) -> &'static str {
    match (verbose, quiet) {
        (_, true) => "error",
        (true, false) => "debug",
        (false, false) => "info",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the CLI flags.
///
/// Calling this twice is harmless; the second subscriber is ignored.
pub fn init_logging(verbose: bool, quiet: bool) {
    let level = log_level(verbose, quiet);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chirps_extractor={}", level)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .is_ok();

    if installed {
        debug!("Logging initialized at level: {}", level);
    }
}
