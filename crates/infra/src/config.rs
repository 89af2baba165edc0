//! Process configuration read from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DATA_SERVICE_ADDR` | `0.0.0.0:8081` |
//! | `BUSINESS_SERVICE_ADDR` | `0.0.0.0:8080` |
//! | `DATA_SERVICE_URL` | `http://localhost:8081` |
//! | `USE_PERSISTENT_STORES` | `false` |
//! | `DATABASE_URL` | required when `USE_PERSISTENT_STORES=true` |

use std::net::SocketAddr;

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_DATA_SERVICE_ADDR: &str = "0.0.0.0:8081";
pub const DEFAULT_BUSINESS_SERVICE_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DATA_SERVICE_URL: &str = "http://localhost:8081";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} is not a valid URL: {value}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} must be true or false, got: {value}")]
    InvalidBool { var: &'static str, value: String },

    #[error("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")]
    MissingDatabaseUrl,
}

/// Backing store of the data tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Postgres { database_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataServiceConfig {
    pub addr: SocketAddr,
    pub store: StoreBackend,
}

impl DataServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = parse_addr(&lookup, "DATA_SERVICE_ADDR", DEFAULT_DATA_SERVICE_ADDR)?;

        let store = if parse_bool(&lookup, "USE_PERSISTENT_STORES")? {
            let database_url = lookup("DATABASE_URL")
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingDatabaseUrl)?;
            StoreBackend::Postgres { database_url }
        } else {
            StoreBackend::InMemory
        };

        Ok(Self { addr, store })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessServiceConfig {
    pub addr: SocketAddr,
    pub data_service_url: Url,
}

impl BusinessServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = parse_addr(&lookup, "BUSINESS_SERVICE_ADDR", DEFAULT_BUSINESS_SERVICE_ADDR)?;

        let raw = lookup("DATA_SERVICE_URL").unwrap_or_else(|| {
            tracing::warn!("DATA_SERVICE_URL not set; using {DEFAULT_DATA_SERVICE_URL}");
            DEFAULT_DATA_SERVICE_URL.to_string()
        });
        let data_service_url = Url::parse(&raw)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or(ConfigError::InvalidUrl {
                var: "DATA_SERVICE_URL",
                value: raw,
            })?;

        Ok(Self {
            addr,
            data_service_url,
        })
    }
}

fn parse_addr(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: &str,
) -> Result<SocketAddr, ConfigError> {
    let value = lookup(var).unwrap_or_else(|| default.to_string());
    value
        .parse()
        .map_err(|_| ConfigError::InvalidAddr { var, value })
}

fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<bool, ConfigError> {
    match lookup(var) {
        None => Ok(false),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            _ => Err(ConfigError::InvalidBool { var, value }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn data_defaults_to_in_memory_on_8081() {
        let config = DataServiceConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(config.addr, "0.0.0.0:8081".parse().unwrap());
        assert_eq!(config.store, StoreBackend::InMemory);
    }

    #[test]
    fn persistent_store_requires_database_url() {
        let err = DataServiceConfig::from_lookup(env(&[("USE_PERSISTENT_STORES", "true")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingDatabaseUrl);

        let config = DataServiceConfig::from_lookup(env(&[
            ("USE_PERSISTENT_STORES", "TRUE"),
            ("DATABASE_URL", "postgres://localhost/stockroom"),
        ]))
        .unwrap();
        assert_eq!(
            config.store,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/stockroom".to_string()
            }
        );
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(matches!(
            DataServiceConfig::from_lookup(env(&[("DATA_SERVICE_ADDR", "localhost")])),
            Err(ConfigError::InvalidAddr { var: "DATA_SERVICE_ADDR", .. })
        ));
        assert!(matches!(
            DataServiceConfig::from_lookup(env(&[("USE_PERSISTENT_STORES", "yes please")])),
            Err(ConfigError::InvalidBool { .. })
        ));
        assert!(matches!(
            BusinessServiceConfig::from_lookup(env(&[("DATA_SERVICE_URL", "not a url")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn business_defaults_point_at_local_data_tier() {
        let config = BusinessServiceConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(config.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.data_service_url.as_str(), "http://localhost:8081/");
    }
}
