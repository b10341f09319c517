//! Logging setup for the Lume CLI.
//!
//! Structured events go through `tracing`; the subscriber installed here
//! decides what reaches the terminal.
//!
//! ```rust,no_run
//! use lume_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("Starting build");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "lume_cli=debug,lume_bundler=debug,lume_runtime=debug";
const QUIET_FILTER: &str = "lume_cli=error,lume_bundler=error";
const DEFAULT_FILTER: &str = "lume_cli=info,lume_bundler=info";

/// Initialize the tracing subscriber.
///
/// Call once at startup, before any logging occurs.
///
/// The filter is picked in this order:
/// 1. `--verbose`: debug for lume crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info for lume crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize logger with a custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_quiet() {
        let filter = filter_for(true, true);
        assert!(filter.to_string().contains("lume_cli=debug"));
    }

    #[test]
    fn test_quiet_filter() {
        let filter = filter_for(false, true);
        assert!(filter.to_string().contains("lume_cli=error"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}
