//! Retry policy for fullnode calls.

use anyhow::Result;
use std::time::Duration;
use sui_wizard_types::RetryConfig;
use tracing::warn;

/// True for failures worth retrying: rate limiting, timeouts and
/// connection or transport errors.
pub fn should_retry_error(error: &anyhow::Error) -> bool {
    let s = format!("{:#}", error).to_ascii_lowercase();
    s.contains("429")
        || s.contains("too many")
        || s.contains("timed out")
        || s.contains("timeout")
        || s.contains("connection")
        || s.contains("transport")
}

/// Run `f`, retrying transient failures with exponential backoff.
pub fn with_retries<T, F>(cfg: RetryConfig, f: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    with_retries_and_sleep(cfg, f, std::thread::sleep)
}

pub(crate) fn with_retries_and_sleep<T, F, S>(cfg: RetryConfig, mut f: F, mut sleep: S) -> Result<T>
where
    F: FnMut() -> Result<T>,
    S: FnMut(Duration),
{
    let mut attempt = 0usize;

    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => {
                if attempt >= cfg.retries || !should_retry_error(&e) {
                    return Err(e);
                }
                attempt += 1;
                let backoff = cfg.backoff_for(attempt);
                warn!(attempt, ?backoff, error = %e, "retrying fullnode call");
                sleep(backoff);
            }
        }
    }
}
