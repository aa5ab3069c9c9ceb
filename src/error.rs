//! Error types for the Crystallize API SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use crystallize_api::{TenantIdentifier, ConfigError};
//!
//! let result = TenantIdentifier::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyTenantIdentifier)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Tenant identifier cannot be empty.
    #[error("Tenant identifier cannot be empty. Please provide your Crystallize tenant identifier.")]
    EmptyTenantIdentifier,

    /// Tenant identifier contains characters that are not allowed.
    #[error("Invalid tenant identifier '{identifier}'. Expected lowercase letters, digits and hyphens.")]
    InvalidTenantIdentifier {
        /// The invalid identifier that was provided.
        identifier: String,
    },

    /// Access token id cannot be empty.
    #[error("Access token id cannot be empty. Please provide a valid Crystallize access token id.")]
    EmptyAccessTokenId,

    /// Access token secret cannot be empty.
    #[error("Access token secret cannot be empty. Please provide a valid Crystallize access token secret.")]
    EmptyAccessTokenSecret,

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A required environment variable is not set.
    #[error("Missing environment variable '{name}'.")]
    MissingEnvVar {
        /// The name of the variable.
        name: &'static str,
    },

    /// The number of HTTP attempts must be at least one.
    #[error("Invalid tries: at least one attempt is required.")]
    InvalidTries,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tenant_identifier_error_message() {
        let error = ConfigError::EmptyTenantIdentifier;
        let message = error.to_string();
        assert!(message.contains("Tenant identifier cannot be empty"));
    }

    #[test]
    fn test_invalid_tenant_identifier_error_message() {
        let error = ConfigError::InvalidTenantIdentifier {
            identifier: "bad tenant!".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("bad tenant!"));
        assert!(message.contains("hyphens"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "tenant_identifier",
        };
        let message = error.to_string();
        assert!(message.contains("tenant_identifier"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_missing_env_var_names_the_variable() {
        let error = ConfigError::MissingEnvVar {
            name: "CRYSTALLIZE_TENANT_IDENTIFIER",
        };
        assert!(error.to_string().contains("CRYSTALLIZE_TENANT_IDENTIFIER"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::InvalidTries;
        let _: &dyn std::error::Error = &error;
    }
}
