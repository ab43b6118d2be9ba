//! Tracing initialization
//!
//! The SDK logs exclusively through `tracing`; callers opt in by
//! invoking [`init_tracing`] once at startup. Verbosity is controlled
//! with the `CAMPUSHUB_LOG` environment variable using the usual
//! env-filter syntax (e.g. `campushub_client=debug`).

use tracing_subscriber::filter::EnvFilter;

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "CAMPUSHUB_LOG";

/// Install the global tracing subscriber.
///
/// Defaults to `info` when `CAMPUSHUB_LOG` is unset. Safe to call more
/// than once; subsequent calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    //! Unit tests for observability.
    use super::*;

    /// Validates repeated initialization does not panic.
    #[test]
    fn init_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
