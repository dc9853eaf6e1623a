use tracing_subscriber::EnvFilter;

use crate::config;

const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber. The filter comes from `TASKFLOW_LOG`
/// (e.g. `taskflow=debug`); invalid directives fall back to `warn`.
pub fn init() {
    let filter = config::log_filter()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
