use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::Config;


pub struct Logger {
    level: LevelFilter,
}

impl Logger {
    pub fn new(level: LevelFilter) -> Self {
        Logger { level }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("[{}] {} - {}", record.target(), record.level(), record.args());
        }
    }

    fn flush(&self) {}
}


/// Installs the console logger, forwarding to Sentry when a DSN is configured.
///
/// Keep the returned guard alive until shutdown or pending events are dropped.
pub fn init_logger(config: &Config) -> Result<Option<sentry::ClientInitGuard>, SetLoggerError> {
    let console = Logger::new(config.log_level);

    let guard = match config.sentry_dsn {
        Some(ref dsn) => {
            let guard = sentry::init((dsn.as_str(), sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            }));
            log::set_boxed_logger(Box::new(sentry_log::SentryLogger::with_dest(console)))?;
            Some(guard)
        },
        None => {
            log::set_boxed_logger(Box::new(console))?;
            None
        },
    };

    log::set_max_level(config.log_level);

    Ok(guard)
}
