//! Logging initialization utilities.

use env_logger::Env;

/// Initialize logging with a default filter level.
///
/// Safe to call more than once; later calls are no-ops so tests can
/// initialize logging without coordinating.
pub fn init() {
    let env = Env::default().default_filter_or("warn");
    let _ = env_logger::Builder::from_env(env).try_init();
}
