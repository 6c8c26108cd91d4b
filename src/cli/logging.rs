//! Tracing subscriber setup
//!
//! Filter precedence: `DYNAFORM_LOG`, then `--verbose`/`--quiet`, then the
//! configured `log_level`, then `warn`. Logs go to stderr so stdout stays
//! pipeable.

use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::GlobalOpts;
use crate::core::Config;

pub const LOG_ENV: &str = "DYNAFORM_LOG";

pub fn init(global: &GlobalOpts, config: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = if global.verbose {
            "debug"
        } else if global.quiet {
            "error"
        } else {
            config.log_level.as_deref().unwrap_or("warn")
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    // A second init (e.g. in tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .try_init();
}
