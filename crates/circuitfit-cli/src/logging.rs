//! Logging initialization.
//!
//! Logs go to stderr so that JSON on stdout stays machine-readable.
//! `RUST_LOG` wins over everything; otherwise `-v` flags raise the level
//! above the configured `log_level`.

use circuitfit_core::Config;
use tracing_subscriber::EnvFilter;

fn level_for(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

pub fn init_logging(verbose: u8) {
    let configured = Config::load_or_default().log_level;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level_for(verbose, &configured)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .init();

    tracing::debug!(verbose, "circuitfit started");
}
