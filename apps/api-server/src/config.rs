//! Application configuration loaded from environment variables.

use std::env;

use chrono::{DateTime, Utc};

use mindfeed_core::ValidationPolicy;
use mindfeed_infra::{DatabaseConfig, ProbeConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub validation: ValidationPolicy,
    pub probe: ProbeConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            if let Some(max) = env::var("DB_MAX_CONNECTIONS").ok().and_then(|s| s.parse().ok()) {
                config.max_connections = max;
            }
            if let Some(min) = env::var("DB_MIN_CONNECTIONS").ok().and_then(|s| s.parse().ok()) {
                config.min_connections = min;
            }
            config
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            validation: Self::validation_policy(env::var("EVENT_CUTOFF").ok().as_deref()),
            probe: ProbeConfig::from_env(),
        }
    }

    /// `EVENT_CUTOFF` is an RFC 3339 instant; an unparsable value falls back
    /// to the default cutoff with a warning.
    fn validation_policy(event_cutoff: Option<&str>) -> ValidationPolicy {
        let Some(raw) = event_cutoff else {
            return ValidationPolicy::default();
        };

        match DateTime::parse_from_rfc3339(raw) {
            Ok(cutoff) => ValidationPolicy {
                event_cutoff: cutoff.with_timezone(&Utc),
            },
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "Invalid EVENT_CUTOFF, using default");
                ValidationPolicy::default()
            }
        }
    }
}
