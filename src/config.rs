//! Application configuration loaded from the environment (and `.env`)

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::booking::{FormRules, PricingPolicy};

const DEFAULT_CATALOG_API: &str = "https://671fe0b3e7a5792f052fd920.mockapi.io";
const DEFAULT_BOOKINGS_API: &str = "https://671fe287e7a5792f052fdf93.mockapi.io";

/// Configuration error
#[derive(Debug, Error)]
#[error("Invalid value for {key}: {value}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

/// Remote booking API endpoints
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub venues_url: String,
    pub services_url: String,
    pub availability_url: String,
    pub bookings_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl ApiConfig {
    /// Point every endpoint at one base URL (`{base}/venues`, `{base}/services`, ...)
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            venues_url: format!("{base}/venues"),
            services_url: format!("{base}/services"),
            availability_url: format!("{base}/availability"),
            bookings_url: format!("{base}/bookings"),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            venues_url: format!("{DEFAULT_CATALOG_API}/venues"),
            services_url: format!("{DEFAULT_CATALOG_API}/services"),
            availability_url: format!("{DEFAULT_BOOKINGS_API}/availability"),
            bookings_url: format!("{DEFAULT_BOOKINGS_API}/bookings"),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub api: ApiConfig,
    /// Reference data TTL
    pub cache_ttl: Duration,
    /// Interval of the background reference-data refresh
    pub cache_refresh: Duration,
    pub rules: FormRules,
}

impl Config {
    /// Build configuration from environment variables, falling back to defaults.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();
        let policy_defaults = PricingPolicy::default();
        let rule_defaults = FormRules::default();

        let api = ApiConfig {
            venues_url: env_or("API_VENUES_URL", defaults.venues_url),
            services_url: env_or("API_SERVICES_URL", defaults.services_url),
            availability_url: env_or("API_AVAILABILITY_URL", defaults.availability_url),
            bookings_url: env_or("API_BOOKINGS_URL", defaults.bookings_url),
            timeout: Duration::from_secs(parse_env("API_TIMEOUT_SECS", 30u64)?),
        };

        let rules = FormRules {
            pricing: PricingPolicy {
                discount_threshold: parse_env(
                    "DISCOUNT_THRESHOLD",
                    policy_defaults.discount_threshold,
                )?,
                discount_rate: parse_env::<Decimal>("DISCOUNT_RATE", policy_defaults.discount_rate)?,
            },
            company_name_min_len: parse_env(
                "COMPANY_NAME_MIN_LEN",
                rule_defaults.company_name_min_len,
            )?,
            min_service_quantity: parse_env(
                "MIN_SERVICE_QUANTITY",
                rule_defaults.min_service_quantity,
            )?,
        };

        Ok(Self {
            bind_addr: parse_env("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?,
            api,
            cache_ttl: Duration::from_secs(parse_env("CACHE_TTL_SECS", 30 * 60u64)?),
            cache_refresh: Duration::from_secs(parse_env("CACHE_REFRESH_SECS", 10 * 60u64)?),
            rules,
        })
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

fn parse_env<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|_| ConfigError {
            key,
            value: raw,
        }),
        _ => Ok(default),
    }
}
