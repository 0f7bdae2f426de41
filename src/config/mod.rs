//! Process configuration from environment variables (optionally seeded from `.env`).

mod database;

pub use database::DatabaseConfig;

use crate::error::ConfigError;
use crate::mapper::EnumPolicy;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    pub env: String,
    pub name: String,
    pub port: u16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub log: LogConfig,
    pub database: DatabaseConfig,
    pub enum_policy: EnumPolicy,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(&lookup);
        Ok(AppConfig {
            service: ServiceConfig {
                env: env.or("SERVICE_ENV", "dev"),
                name: env.or("SERVICE_NAME", "smart-hub"),
                port: env.parse_or("SERVICE_PORT", 50051)?,
            },
            log: LogConfig {
                level: env.or("LOG_LEVEL", "debug"),
            },
            database: DatabaseConfig {
                host: env.required("DATABASE_HOST")?,
                port: env.required_parse("DATABASE_PORT")?,
                user: env.required("DATABASE_USER")?,
                password: env.required("DATABASE_PASSWORD")?,
                database: env.required("DATABASE_DATABASE")?,
                max_connections: env.parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            },
            enum_policy: match env.get("ENUM_POLICY") {
                Some(raw) => raw.parse()?,
                None => EnumPolicy::default(),
            },
        })
    }
}

/// Blank values count as unset.
struct Env<'a, F>(&'a F);

impl<F> Env<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    fn required_parse<T>(&self, key: &'static str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        parse(key, &self.required(key)?)
    }

    fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => parse(key, &raw),
            None => Ok(default),
        }
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        var: key,
        reason: format!("'{}': {}", raw, e),
    })
}
