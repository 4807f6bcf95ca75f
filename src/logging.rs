//! Logger setup for the `log` facade, backed by env_logger.

use std::sync::Once;

use crate::config::Config;

/// Filter used when neither the config file nor `RUST_LOG` names one
pub const DEFAULT_FILTER: &str = "info";

static INIT: Once = Once::new();

/// Pick the env_logger filter: the config's `log_filter` wins, then
/// `RUST_LOG`, then [`DEFAULT_FILTER`]. Blank values count as unset.
pub fn resolve_filter(config_filter: Option<&str>, env_filter: Option<&str>) -> String {
    [config_filter, env_filter]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|f| !f.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Install the global logger for `config`. Only the first call has any effect.
pub fn init_logging(config: &Config) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let filter = resolve_filter(config.log_filter.as_deref(), env.as_deref());

        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(env_logger::WriteStyle::Auto)
            .init();

        log::debug!("logging initialized with filter '{}'", filter);
    });
}
