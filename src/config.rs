// src/config.rs

use std::env;

use dotenvy::dotenv;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub airtable_api_url: String,
    pub airtable_api_key: String,
    pub airtable_base: String,
    /// 0 keeps cached content until it is flushed.
    pub cache_ttl_seconds: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub const DEFAULT_AIRTABLE_API_URL: &'static str = "https://api.airtable.com/v0";

    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiration: parsed("JWT_EXPIRATION", 86_400)?,
            airtable_api_url: env::var("AIRTABLE_API_URL")
                .unwrap_or_else(|_| Self::DEFAULT_AIRTABLE_API_URL.to_string()),
            airtable_api_key: required("AIRTABLE_API_KEY")?,
            airtable_base: required("AIRTABLE_BASE")?,
            cache_ttl_seconds: parsed("CACHE_TTL_SECONDS", 0)?,
            port: parsed("PORT", 3000)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn required(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Config(format!("{} must be set", name)))
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("{} is not a valid value: '{}'", name, raw))),
        Err(_) => Ok(default),
    }
}
