//! Error types for cogctl

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cogctl operations
pub type Result<T> = std::result::Result<T, CogError>;

/// Main error type for cogctl
#[derive(Error, Debug)]
pub enum CogError {
    /// Argument and settings errors, raised before any network call
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transport and remote service errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Response did not have the expected shape
    #[error("Unexpected response: {0}")]
    Response(#[from] ResponseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Argument and settings errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Argument '--{0}' is required but not provided")]
    MissingArgument(String),

    #[error("Unexpected command {0}")]
    UnknownCommand(String),

    #[error("No region configured (use --region, AWS_REGION, a region in ~/.aws/config or a region-prefixed user pool id)")]
    MissingRegion,

    #[error("AWS credentials not found (set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY or configure a profile in ~/.aws/credentials)")]
    MissingCredentials,

    #[error("Option '--{option}' has no matching attribute in the attribute schema")]
    UnmappedOverride { option: String },

    #[error("Failed to read settings file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Transport and remote service errors
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Request could not be built or delivered
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid endpoint URL '{0}'")]
    InvalidEndpoint(String),

    /// Error reported by the identity provider itself
    #[error("{code} ({status}): {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },
}

/// Unexpected response shapes
#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("Field '{0}' missing from response")]
    MissingField(&'static str),

    #[error("Unsupported challenge '{0}'")]
    UnsupportedChallenge(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl ProviderError {
    /// Exception name reported by the provider, if this is a service error
    pub fn service_code(&self) -> Option<&str> {
        match self {
            ProviderError::Service { code, .. } => Some(code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display() {
        let err = ProviderError::Service {
            status: 400,
            code: "UsernameExistsException".to_string(),
            message: "User account already exists".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "UsernameExistsException (400): User account already exists"
        );
        assert_eq!(err.service_code(), Some("UsernameExistsException"));
    }

    #[test]
    fn test_config_error_wraps() {
        let err: CogError = ConfigError::MissingArgument("username".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Argument '--username' is required but not provided"
        );
    }
}
