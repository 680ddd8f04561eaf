use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use validator::Validate;

use crate::error::{PacktallyError, PacktallyResult};
use crate::validation::format_validation_errors;

/// Rows scanned from the top of a sheet when looking for the header.
pub const DEFAULT_HEADER_SCAN_ROWS: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[validate]
    pub sheet: SheetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// `json` or anything else for human-readable output.
    pub format: String,
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SheetConfig {
    #[validate(range(min = 1, max = 64, message = "Header scan window must be between 1 and 64 rows"))]
    pub header_scan_rows: usize,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("PACKTALLY").separator("__"));

        config.build()?.try_deserialize()
    }

    /// Loads every layer and rejects values outside their allowed ranges.
    pub fn load_validated() -> PacktallyResult<Self> {
        Self::load()?.checked()
    }

    /// Returns the config unchanged if it validates.
    pub fn checked(self) -> PacktallyResult<Self> {
        match self.validate() {
            Ok(()) => Ok(self),
            Err(errors) => Err(PacktallyError::configuration(format_validation_errors(&errors))),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                max_request_size: 16 * 1024 * 1024, // 16MB
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
                file_path: None,
            },
            sheet: SheetConfig::default(),
        }
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
        }
    }
}
