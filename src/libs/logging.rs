use crate::libs::config::DEFAULT_LOG_FILTER;
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static ACTIVE_FILTER: OnceCell<String> = OnceCell::new();

/// Directives to install: `RUST_LOG` when set and valid, then `configured`, then the default.
pub fn select_directives(rust_log: Option<&str>, configured: &str) -> String {
    rust_log
        .into_iter()
        .chain([configured])
        .map(str::trim)
        .find(|directives| !directives.is_empty() && EnvFilter::try_new(directives).is_ok())
        .unwrap_or(DEFAULT_LOG_FILTER)
        .to_string()
}

/// Installs the global fmt subscriber. Only the first call has an effect; a
/// subscriber already installed by the host is left in place.
pub fn init_logging(configured: &str) {
    ACTIVE_FILTER.get_or_init(|| {
        let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let directives = select_directives(rust_log.as_deref(), configured);
        let _ = fmt()
            .with_env_filter(EnvFilter::new(&directives))
            .with_target(true)
            .try_init();
        directives
    });
}

/// Directives chosen by the first `init_logging` call.
pub fn active_filter() -> Option<&'static str> {
    ACTIVE_FILTER.get().map(String::as_str)
}
