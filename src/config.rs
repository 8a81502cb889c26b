use std::env;
use std::fmt::Formatter;
use std::time::Duration;

use dotenv::dotenv;
use reqwest::Url;

use crate::geocode::{GeocoderConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub geocoder: GeocoderConfig,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidVar { name: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ConfigError::MissingVar(name) => write!(f, "{} must be set", name),
            ConfigError::InvalidVar { name, value } => {
                write!(f, "{} has an invalid value: '{}'", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv().ok();
        Config::from_vars(|name| env::var(name).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Config, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |name: &'static str| {
            var(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let database_url = required("DATABASE_URL")?;
        let api_key = required("GEOCODING_API_KEY")?;

        let base_url = match var("GEOCODING_BASE_URL") {
            Some(value) => Url::parse(&value)
                .ok()
                .filter(|url| !url.cannot_be_a_base())
                .ok_or(ConfigError::InvalidVar { name: "GEOCODING_BASE_URL", value })?,
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|_| ConfigError::InvalidVar {
                    name: "GEOCODING_BASE_URL",
                    value: DEFAULT_BASE_URL.to_owned(),
                })?,
        };

        let timeout = match var("GEOCODING_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidVar { name: "GEOCODING_TIMEOUT_SECS", value })?,
            None => DEFAULT_TIMEOUT,
        };

        let min_relevance = match var("GEOCODING_MIN_RELEVANCE") {
            Some(value) => Some(
                value
                    .parse::<f64>()
                    .ok()
                    .filter(|relevance| (0.0..=1.0).contains(relevance))
                    .ok_or(ConfigError::InvalidVar { name: "GEOCODING_MIN_RELEVANCE", value })?,
            ),
            None => None,
        };

        Ok(Config {
            database_url,
            geocoder: GeocoderConfig {
                api_key,
                base_url,
                timeout,
                min_relevance,
            },
        })
    }
}
