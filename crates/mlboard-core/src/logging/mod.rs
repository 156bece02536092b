use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive for the mlboard crates.
///
/// The `mlboard` target prefix covers both the CLI and `mlboard_core`.
pub fn log_directive(quiet: bool) -> &'static str {
    if quiet { "mlboard=error" } else { "mlboard=info" }
}

/// Initialize JSON logging on stderr.
///
/// When `quiet` is true, only error-level events are emitted; otherwise
/// info-level and above. `RUST_LOG` can add further directives (e.g.
/// `mlboard_core::time_diff=debug` to trace cadence changes).
pub fn init_logging(quiet: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive(log_directive(quiet).parse().expect("Invalid log directive")),
        )
        .init();
}
