//! Environment and logging set-up for the `subnet` binary.
//!
//! `.env` is loaded first so it can point `SUBNET_LOG_CONFIG` at a log4rs
//! YAML file. Without `-v` that file is used when present; `-v` always logs
//! to stderr at the requested level.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::PathBuf;

/// Environment variable naming the log4rs configuration file.
pub const LOG_CONFIG_ENV: &str = "SUBNET_LOG_CONFIG";
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

const CONSOLE_PATTERN: &str = "{d(%H:%M:%S)} {h({l})} {t} - {m}{n}";

/// Load `.env` from the working directory, if there is one.
pub fn load_env() {
    if let Err(e) = dotenv::dotenv() {
        // Logging is not up yet.
        if !e.not_found() {
            eprintln!("ignoring .env: {e}");
        }
    }
}

pub fn log_config_path() -> PathBuf {
    std::env::var(LOG_CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_CONFIG))
}

/// Level for a `-v` count.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Stderr-only configuration at `level`.
pub fn console_config(level: LevelFilter) -> Result<Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}

/// Install the global logger. Call once, before the first log line.
pub fn init_logging(verbosity: u8) -> Result<(), Box<dyn Error>> {
    let log_file = log_config_path();
    if verbosity == 0 && log_file.exists() {
        log4rs::init_file(&log_file, Default::default())
            .map_err(|e| format!("{}: {e}", log_file.display()))?;
    } else {
        log4rs::init_config(console_config(level_for(verbosity))?)?;
    }
    log::debug!("logging initialised, verbosity {verbosity}");
    Ok(())
}
