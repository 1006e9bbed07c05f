//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Request handling never reads process-wide environment variables; the binaries read
//! them and hand the raw values to the parsing helpers below.

use crate::constants::{DEFAULT_DATABASE_URL, DEFAULT_DB_TIMEOUT_SECS};
use crate::error::{CatalogError, CatalogResult};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database_url: Option<String>,
    acquire_timeout: Duration,
    run_migrations: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `database_url` of `None` disables the condition store; the built-in catalog is used.
    pub fn new(
        database_url: Option<String>,
        acquire_timeout: Duration,
        run_migrations: bool,
    ) -> CatalogResult<Self> {
        if let Some(url) = &database_url {
            if !url.starts_with("sqlite:") {
                return Err(CatalogError::InvalidInput(format!(
                    "condition store url must use the sqlite: scheme, got '{url}'"
                )));
            }
        }

        if acquire_timeout.is_zero() {
            return Err(CatalogError::InvalidInput(
                "condition store timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            database_url,
            acquire_timeout,
            run_migrations,
        })
    }

    /// Build a config from raw environment values (`None` = variable unset).
    pub fn from_env_values(
        database_url: Option<String>,
        timeout_secs: Option<String>,
        migrate: Option<String>,
    ) -> CatalogResult<Self> {
        Self::new(
            database_url_from_env_value(database_url),
            acquire_timeout_from_env_value(timeout_secs)?,
            run_migrations_from_env_value(migrate)?,
        )
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn acquire_timeout(&self) -> Duration {
        self.acquire_timeout
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations
    }
}

/// Resolve the condition store URL.
///
/// Unset falls back to [`DEFAULT_DATABASE_URL`]; an empty or whitespace value disables the
/// store.
pub fn database_url_from_env_value(value: Option<String>) -> Option<String> {
    match value {
        None => Some(DEFAULT_DATABASE_URL.to_string()),
        Some(v) => {
            let v = v.trim();
            (!v.is_empty()).then(|| v.to_string())
        }
    }
}

/// Parse the pool acquire timeout in whole seconds.
///
/// If `value` is `None` or empty/whitespace, returns the default.
pub fn acquire_timeout_from_env_value(value: Option<String>) -> CatalogResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let secs = match value {
        None => DEFAULT_DB_TIMEOUT_SECS,
        Some(v) => v.parse::<u64>().map_err(|_| {
            CatalogError::InvalidInput(format!(
                "condition store timeout must be a whole number of seconds, got '{v}'"
            ))
        })?,
    };

    Ok(Duration::from_secs(secs))
}

/// Parse the migrate-on-startup flag. Defaults to `true`.
pub fn run_migrations_from_env_value(value: Option<String>) -> CatalogResult<bool> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None => Ok(true),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(CatalogError::InvalidInput(format!(
            "expected a boolean for the migrate flag, got '{other}'"
        ))),
    }
}
