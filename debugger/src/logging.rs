use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,airswap_lib=debug,decode_order=debug"
    } else {
        "warn"
    }
}

/// Logs go to stderr so the report on stdout stays machine-readable.
/// `RUST_LOG` overrides the defaults.
pub fn setup_tracing(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
