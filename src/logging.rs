use std::env;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging for the CLI.
///
/// The filter comes from `WIZARD_LOG`, then `RUST_LOG`. Without either, only
/// warnings are shown, or info and above when `verbose` is set. Module
/// filters work as usual, e.g. `WIZARD_LOG=sui_coin_query=debug`.
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = env::var("WIZARD_LOG")
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| default_level.to_string());

    let env_filter = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_level(true)
        .compact();

    // a second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();

    tracing::debug!(log_filter = %filter, "logging initialized");
}
