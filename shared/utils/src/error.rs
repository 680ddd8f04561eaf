use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PacktallyError {
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Sheet decode error: {message}")]
    SheetDecode { message: String },

    #[error("Unsupported sheet format: {filename}")]
    UnsupportedFormat { filename: String },

    #[error("Payload too large: {message}")]
    PayloadTooLarge { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl PacktallyError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn sheet_decode(message: impl Into<String>) -> Self {
        Self::SheetDecode {
            message: message.into(),
        }
    }

    pub fn unsupported_format(filename: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            filename: filename.into(),
        }
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::PayloadTooLarge {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::SheetDecode { .. } => "SHEET_DECODE_ERROR",
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::SheetDecode { .. } => 422,
            Self::UnsupportedFormat { .. } => 415,
            Self::PayloadTooLarge { .. } => 413,
            Self::Configuration { .. } => 500,
            Self::NotFound { .. } => 404,
            Self::Internal { .. } => 500,
        }
    }
}

pub type PacktallyResult<T> = Result<T, PacktallyError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<PacktallyError> for ErrorResponse {
    fn from(error: PacktallyError) -> Self {
        let details = match &error {
            PacktallyError::Validation { field, .. } => Some(serde_json::json!({ "field": field })),
            _ => None,
        };
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

impl From<config::ConfigError> for PacktallyError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}
