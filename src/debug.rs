use std::sync::OnceLock;

use log::LevelFilter;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// True when `BLIFF_DEBUG` is set
pub fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var("BLIFF_DEBUG").is_ok())
}

fn log_level() -> LevelFilter {
    if debug_enabled() {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the stderr logger; `Debug` level when `BLIFF_DEBUG` is set.
///
/// Safe to call more than once; later calls keep the first logger.
pub fn init_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log_level())
        .target(env_logger::Target::Stderr)
        .try_init();
}
