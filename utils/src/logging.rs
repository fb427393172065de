//! `tracing` subscriber setup.

use std::env;
use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter from `RUST_LOG`, else `default`, else `warn`.
#[must_use]
pub fn env_filter(default: &str) -> EnvFilter {
    filter_from(env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), default)
}

fn filter_from(directives: Option<&str>, default: &str) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(default).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Install a global stderr subscriber. Returns `false` if one was already set.
pub fn init_tracing(default: &str) -> bool {
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(io::stderr))
        .with(env_filter(default))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::{filter_from, init_tracing};

    #[test]
    fn explicit_directives_win() {
        let filter = filter_from(Some("error"), "debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn default_used_without_directives() {
        let filter = filter_from(None, "debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn second_init_is_rejected() {
        let _ = init_tracing("warn");
        assert!(!init_tracing("warn"));
    }
}
