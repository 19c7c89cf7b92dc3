use std::path::Path;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use url::Url;

use crate::errors::AppError;

pub const DEFAULT_DISCOVERY_URL: &str = "http://www.espn.com/mma/fighters";
pub const DEFAULT_PROFILE_URL: &str = "https://www.ufc.com/athlete";
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// Settings for the harvest pipeline itself.
#[derive(Debug, Clone)]
pub struct HarvestSettings {
    /// Discovery page base; `?search=<letter>` is appended per partition.
    pub discovery_url: Url,
    /// Profile page base; `/<slug>` is appended per candidate.
    pub profile_url: Url,
    /// Upper bound on concurrent requests within a stage.
    pub max_in_flight: usize,
    /// Per-request timeout. `None` leaves the transport defaults in place.
    pub request_timeout: Option<Duration>,
}

/// Connection settings for the persistence collaborator.
#[derive(Debug, Clone)]
pub enum DatabaseSettings {
    Url(String),
    Parts {
        username: String,
        password: String,
        host: String,
        port: u16,
        /// Database the credentials belong to.
        auth_source: String,
        ssl_mode: Option<String>,
    },
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> Result<PgConnectOptions, AppError> {
        match self {
            DatabaseSettings::Url(url) => url
                .parse::<PgConnectOptions>()
                .map_err(|e| AppError::ConfigError(format!("Invalid database URL: {}", e))),
            DatabaseSettings::Parts {
                username,
                password,
                host,
                port,
                auth_source,
                ssl_mode,
            } => {
                let mut options = PgConnectOptions::new()
                    .host(host)
                    .port(*port)
                    .username(username)
                    .password(password)
                    .database(auth_source);
                if let Some(mode) = ssl_mode {
                    let mode = mode.parse::<PgSslMode>().map_err(|e| {
                        AppError::ConfigError(format!("Invalid DB_SSL_MODE '{}': {}", mode, e))
                    })?;
                    options = options.ssl_mode(mode);
                }
                Ok(options)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub harvest: HarvestSettings,
    /// `None` means records are printed instead of stored.
    pub database: Option<DatabaseSettings>,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// A local key=value file is read first: the path in `HARVEST_ENV_FILE` if set,
    /// otherwise `.env` in the working directory when present. Variables already
    /// set in the environment win over the file.
    pub fn from_env() -> Result<Self, AppError> {
        match std::env::var("HARVEST_ENV_FILE") {
            Ok(path) if !path.trim().is_empty() => {
                dotenvy::from_path(Path::new(&path)).map_err(|e| {
                    AppError::ConfigError(format!("Cannot load env file '{}': {}", path, e))
                })?;
            }
            _ => {
                dotenvy::dotenv().ok();
            }
        }

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Discovery URL: {}", config.harvest.discovery_url);
        tracing::debug!("Profile URL: {}", config.harvest.profile_url);
        tracing::debug!("Max in-flight requests: {}", config.harvest.max_in_flight);
        if config.database.is_none() {
            tracing::info!("No database configured, results will be written to stdout");
        }

        Ok(config)
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let discovery_url = parse_base_url(
            "HARVEST_DISCOVERY_URL",
            get("HARVEST_DISCOVERY_URL").as_deref(),
            DEFAULT_DISCOVERY_URL,
        )?;
        let profile_url = parse_base_url(
            "HARVEST_PROFILE_URL",
            get("HARVEST_PROFILE_URL").as_deref(),
            DEFAULT_PROFILE_URL,
        )?;

        let max_in_flight = match get("HARVEST_MAX_IN_FLIGHT") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| {
                    AppError::ConfigError(
                        "HARVEST_MAX_IN_FLIGHT must be a whole number >= 1".into(),
                    )
                })?,
            None => DEFAULT_MAX_IN_FLIGHT,
        };

        let request_timeout = get("HARVEST_REQUEST_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs)
                    .ok_or_else(|| {
                        AppError::ConfigError(
                            "HARVEST_REQUEST_TIMEOUT_SECS must be a positive number of seconds"
                                .into(),
                        )
                    })
            })
            .transpose()?;

        let database = database_settings(&get)?;

        Ok(Self {
            harvest: HarvestSettings {
                discovery_url,
                profile_url,
                max_in_flight,
                request_timeout,
            },
            database,
        })
    }
}

fn parse_base_url(key: &str, value: Option<&str>, default: &str) -> Result<Url, AppError> {
    let raw = value.unwrap_or(default).trim();
    if !raw.starts_with("http://") && !raw.starts_with("https://") {
        return Err(AppError::ConfigError(format!(
            "{} must start with http:// or https://",
            key
        )));
    }
    Url::parse(raw)
        .map_err(|e| AppError::ConfigError(format!("{} is not a valid URL: {}", key, e)))
}

fn database_settings<G>(get: &G) -> Result<Option<DatabaseSettings>, AppError>
where
    G: Fn(&str) -> Option<String>,
{
    if let Some(url) = get("DATABASE_URL").or_else(|| get("DB_URL")) {
        if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
            return Err(AppError::ConfigError(
                "DATABASE_URL must start with postgresql:// or postgres://".into(),
            ));
        }
        return Ok(Some(DatabaseSettings::Url(url)));
    }

    let Some(host) = get("DB_HOST") else {
        return Ok(None);
    };

    let username = get("DB_USERNAME")
        .ok_or_else(|| AppError::ConfigError("DB_USERNAME is required with DB_HOST".into()))?;
    let password = get("DB_PASSWORD").unwrap_or_default();
    let port = match get("DB_PORT") {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|_| {
                AppError::ConfigError("DB_PORT must be a valid number between 1-65535".into())
            })?,
        None => 5432,
    };
    let auth_source = get("DB_AUTH_SOURCE").unwrap_or_else(|| "fighters".to_string());

    Ok(Some(DatabaseSettings::Parts {
        username,
        password,
        host,
        port,
        auth_source,
        ssl_mode: get("DB_SSL_MODE"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_any_keys() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.harvest.discovery_url.as_str(), DEFAULT_DISCOVERY_URL);
        assert_eq!(config.harvest.profile_url.as_str(), DEFAULT_PROFILE_URL);
        assert_eq!(config.harvest.max_in_flight, DEFAULT_MAX_IN_FLIGHT);
        assert!(config.harvest.request_timeout.is_none());
        assert!(config.database.is_none());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = Config::from_lookup(lookup(&[("HARVEST_PROFILE_URL", "ftp://example.com")]))
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_rejects_zero_in_flight() {
        let err =
            Config::from_lookup(lookup(&[("HARVEST_MAX_IN_FLIGHT", "0")])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_timeout_is_parsed() {
        let config =
            Config::from_lookup(lookup(&[("HARVEST_REQUEST_TIMEOUT_SECS", "15")])).unwrap();
        assert_eq!(config.harvest.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_database_from_parts() {
        let config = Config::from_lookup(lookup(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USERNAME", "harvester"),
            ("DB_PASSWORD", "secret"),
            ("DB_AUTH_SOURCE", "mma"),
        ]))
        .unwrap();

        match config.database {
            Some(DatabaseSettings::Parts {
                host,
                port,
                username,
                auth_source,
                ..
            }) => {
                assert_eq!(host, "db.internal");
                assert_eq!(port, 6543);
                assert_eq!(username, "harvester");
                assert_eq!(auth_source, "mma");
            }
            other => panic!("expected connection parts, got {:?}", other),
        }
    }

    #[test]
    fn test_database_url_takes_precedence() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://u:p@localhost/mma"),
            ("DB_HOST", "ignored"),
        ]))
        .unwrap();
        assert!(matches!(config.database, Some(DatabaseSettings::Url(_))));
    }

    #[test]
    fn test_database_host_requires_username() {
        let err = Config::from_lookup(lookup(&[("DB_HOST", "localhost")])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_database_port_must_be_numeric() {
        let err = Config::from_lookup(lookup(&[
            ("DB_HOST", "localhost"),
            ("DB_USERNAME", "harvest"),
            ("DB_PORT", "70000"),
        ]))
        .unwrap_err();
        match err {
            AppError::ConfigError(msg) => assert!(msg.contains("DB_PORT")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_in_flight_must_be_a_number() {
        let err =
            Config::from_lookup(lookup(&[("HARVEST_MAX_IN_FLIGHT", "many")])).unwrap_err();
        match err {
            AppError::ConfigError(msg) => assert!(msg.contains("HARVEST_MAX_IN_FLIGHT")),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
