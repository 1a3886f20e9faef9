// srm/src/logger.rs
//! Logger initialisation for the `srm` binary.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialises `env_logger`. An explicit level wins over `RUST_LOG`;
/// without one, `RUST_LOG` is honoured and the default is `warn`.
/// Calling this twice is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::new();
    match level {
        Some(level) => {
            builder.filter_level(level);
        }
        None => {
            builder.parse_env(Env::default().default_filter_or("warn"));
        }
    }
    builder.format_timestamp(None).format_target(false);
    let _ = builder.try_init();
}
