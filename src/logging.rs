//! Logger setup for the headless runner

use env_logger::{Builder, Env};

/// Install `env_logger` as the global logger
///
/// A filter in `RUST_LOG` takes precedence; otherwise `verbose` picks
/// `debug` and the default is `info`. Timestamps are in milliseconds to line
/// up with simulation time.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let result = Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
    if result.is_err() {
        log::debug!("Logger already installed");
    }
}
