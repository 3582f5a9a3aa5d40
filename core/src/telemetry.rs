use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Picks the filter to install: a non-empty, parseable `RUST_LOG` wins over
/// `fallback`.
pub fn resolve_filter(rust_log: Option<&str>, fallback: &str) -> EnvFilter {
    rust_log
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

/// Installs the global tracing subscriber with `filter`.
///
/// Returns `false` when a subscriber was already installed.
pub fn init_tracing(filter: EnvFilter) -> bool {
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn rust_log_overrides_fallback_unless_blank() {
        let filter = resolve_filter(Some("portal_core=warn"), "portal_core=debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));

        let filter = resolve_filter(Some("  "), "portal_core=debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = resolve_filter(None, "portal_core=debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn second_install_is_refused() {
        init_tracing(resolve_filter(None, "portal_core=debug"));
        assert!(!init_tracing(resolve_filter(None, "portal_core=debug")));
    }
}
