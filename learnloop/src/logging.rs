use tracing_subscriber::EnvFilter;

/// The filter for the given number of `-v` flags. `RUST_LOG` takes precedence when it is set.
pub fn filter(verbose: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    }
}

/// Initialize logging based on verbosity level. Logs go to stderr so that answers printed to
/// stdout stay clean.
pub fn init(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
