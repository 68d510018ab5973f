use std::{env, str::FromStr, time::Duration};

use log::LevelFilter;

use crate::error::{Error, Result};


pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/isafe_db";
const DEFAULT_POOL_SIZE: u32 = 4;
const DEFAULT_CONNECT_TIMEOUT: u64 = 10; // seconds


/// Startup configuration, passed explicitly to [`crate::db::Database::connect`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub pool_size: u32,
    pub connect_timeout: Duration,
    pub log_level: LevelFilter,
    pub sentry_dsn: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: DEFAULT_DATABASE_URL.into(),
            pool_size: DEFAULT_POOL_SIZE,
            connect_timeout: Duration::new(DEFAULT_CONNECT_TIMEOUT, 0),
            log_level: LevelFilter::Info,
            sentry_dsn: None,
        }
    }
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self> where
        F: Fn(&str) -> Option<String> {

        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let database_url = get("DATABASE_URL")
            .unwrap_or(defaults.database_url);

        let pool_size = match get("DATABASE_POOL_SIZE") {
            Some(v) => parse_var::<u32>("DATABASE_POOL_SIZE", &v)?,
            None => defaults.pool_size,
        };
        if pool_size == 0 {
            return Err(Error::Config("DATABASE_POOL_SIZE must be at least 1".into()));
        }

        let connect_timeout = match get("DATABASE_CONNECT_TIMEOUT") {
            Some(v) => Duration::new(parse_var::<u64>("DATABASE_CONNECT_TIMEOUT", &v)?, 0),
            None => defaults.connect_timeout,
        };
        if connect_timeout == Duration::new(0, 0) {
            return Err(Error::Config("DATABASE_CONNECT_TIMEOUT must be at least 1 second".into()));
        }

        let log_level = match get("LOG_LEVEL") {
            Some(v) => parse_var::<LevelFilter>("LOG_LEVEL", &v)?,
            None => defaults.log_level,
        };

        Ok(Config {
            database_url,
            pool_size,
            connect_timeout,
            log_level,
            sentry_dsn: get("SENTRY_DSN"),
        })
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>()
        .map_err(|_| Error::Config(format!("{} has an invalid value: {:?}", key, value)))
}
