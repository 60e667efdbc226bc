use std::net::SocketAddr;

use thiserror::Error;

use crate::features::srs::SchedulingPolicy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read from the environment (and `.env` via dotenv)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub pool_size: u32,
    pub policy: SchedulingPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| "reviews.db".into());

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:5000".into());
        let bind_addr: SocketAddr = bind_addr.parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
            name: "BIND_ADDR",
            value: bind_addr.clone(),
            reason: e.to_string(),
        })?;

        let pool_size = match lookup("DB_POOL_SIZE") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "DB_POOL_SIZE",
                        value: raw,
                        reason: "expected a positive integer".into(),
                    })
                }
            },
            None => 8,
        };

        let mut policy = match lookup("SRS_POLICY") {
            Some(raw) => raw.parse::<SchedulingPolicy>().map_err(|e| ConfigError::InvalidValue {
                name: "SRS_POLICY",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => SchedulingPolicy::default(),
        };

        if let Some(raw) = lookup("SRS_MAX_INTERVAL_DAYS") {
            let cap = if raw.eq_ignore_ascii_case("none") {
                None
            } else {
                match raw.parse::<u32>() {
                    Ok(n) if n > 0 => Some(n),
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            name: "SRS_MAX_INTERVAL_DAYS",
                            value: raw,
                            reason: "expected a positive number of days or \"none\"".into(),
                        })
                    }
                }
            };
            policy = policy.with_max_interval_days(cap);
        }

        Ok(Config {
            database_url,
            bind_addr,
            pool_size,
            policy,
        })
    }
}
