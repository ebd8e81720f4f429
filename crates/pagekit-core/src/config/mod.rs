//! Application configuration schemas.
//!
//! Configuration is read from TOML files via the `config` crate and can be
//! overridden with `PAGEKIT__`-prefixed environment variables. Every field
//! has a default, so an empty configuration is valid.

pub mod app;
pub mod logging;
pub mod pagination;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::logging::LoggingConfig;
use self::pagination::PaginationConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Pagination entry-point settings.
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default`, the `config/{env}` overlay, and environment
    /// variables such as `PAGEKIT__PAGINATION__DEFAULT_PAGE_SIZE`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PAGEKIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings the entry point cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.pagination.default_page_size == 0 {
            return Err(AppError::configuration(
                "pagination.default_page_size must be positive",
            ));
        }
        Ok(())
    }
}
