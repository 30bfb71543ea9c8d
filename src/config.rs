use crate::error::Error;
use chrono::Duration;
use std::env::VarError;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub pending_edit_ttl: Duration,
    pub seed_demo_polls: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            workers: None,
            pending_edit_ttl: Duration::seconds(900),
            seed_demo_polls: false,
        }
    }
}

impl Config {
    /// Reads the process environment, after `.env` has been loaded. Unset keys fall back to defaults.
    pub fn from_env() -> Result<Self, Error> {
        let default = Self::default();
        Ok(Self {
            host: parse_var("BIND_HOST", var("BIND_HOST")?, default.host)?,
            port: parse_var("PORT", var("PORT")?, default.port)?,
            workers: var("WORKERS")?.map(|w| parse_var("WORKERS", Some(w), 0).and_then(|n| positive("WORKERS", n))).transpose()?,
            pending_edit_ttl: pending_edit_ttl(parse_var("PENDING_EDIT_TTL_SECS", var("PENDING_EDIT_TTL_SECS")?, default.pending_edit_ttl.num_seconds())?)?,
            seed_demo_polls: parse_var("SEED_DEMO_POLLS", var("SEED_DEMO_POLLS")?, default.seed_demo_polls)?,
        })
    }
}

fn var(key: &str) -> Result<Option<String>, Error> {
    match dotenv::var(key) {
        Ok(v) => Ok(Some(v)),
        Err(dotenv::Error::EnvVar(VarError::NotPresent)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_var<T>(key: &str, raw: Option<String>, default: T) -> Result<T, Error>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match raw {
        Some(raw) => raw.trim().parse().map_err(|e| Error::Config(format!("invalid {}: {}", key, e))),
        None => {
            log::debug!("{} not set, using default: {}", key, default);
            Ok(default)
        }
    }
}

fn positive(key: &str, n: usize) -> Result<usize, Error> {
    if n == 0 {
        return Err(Error::Config(format!("{} must be greater than 0", key)));
    }
    Ok(n)
}

fn pending_edit_ttl(secs: i64) -> Result<Duration, Error> {
    if secs <= 0 {
        return Err(Error::Config("PENDING_EDIT_TTL_SECS must be greater than 0".into()));
    }
    Duration::try_seconds(secs).ok_or_else(|| Error::Config(format!("PENDING_EDIT_TTL_SECS out of range: {}", secs)))
}
