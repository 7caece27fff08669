use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr so `--format json`
/// output on stdout stays machine readable.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks between `warn` and
/// `debug` for this crate.
pub fn enable_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={default_level}",
            env!("CARGO_PKG_NAME").replace('-', "_")
        ))
    });

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
