//! Runtime setup for the binary: thread pool and logging.

use tracing_subscriber::EnvFilter;

/// Configure rayon's global thread pool once at startup. `0` uses every core.
pub fn configure_thread_pool(jobs: usize) {
    let mut builder = rayon::ThreadPoolBuilder::new();

    if jobs > 0 {
        builder = builder.num_threads(jobs);
    }

    if let Err(e) = builder.build_global() {
        tracing::debug!(error = %e, "thread pool already configured");
    }
}

/// Default filter for a `-v` count when no environment filter is set.
pub fn verbosity_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber. `IMPLENS_LOG` wins over `RUST_LOG`,
/// which wins over the `-v` count.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_env("IMPLENS_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
