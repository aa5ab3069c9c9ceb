//! Configuration types for the Crystallize API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with Crystallize.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`CrystallizeConfig`]: The main configuration struct holding all SDK settings
//! - [`CrystallizeConfigBuilder`]: A builder for constructing [`CrystallizeConfig`] instances
//! - [`TenantIdentifier`]: A validated tenant slug
//! - [`AccessTokenId`] / [`AccessTokenSecret`]: Validated credentials, the secret masked in debug output
//! - [`HostUrl`]: A validated origin override
//!
//! # Example
//!
//! ```rust
//! use crystallize_api::{CrystallizeConfig, TenantIdentifier, AccessTokenId, AccessTokenSecret};
//!
//! let config = CrystallizeConfig::builder()
//!     .tenant_identifier(TenantIdentifier::new("furniture").unwrap())
//!     .access_token_id(AccessTokenId::new("token-id").unwrap())
//!     .access_token_secret(AccessTokenSecret::new("token-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.tenant_identifier().as_ref(), "furniture");
//! ```

mod newtypes;

pub use newtypes::{AccessTokenId, AccessTokenSecret, HostUrl, TenantIdentifier};

use crate::error::ConfigError;

/// Environment variable holding the tenant identifier.
pub const ENV_TENANT_IDENTIFIER: &str = "CRYSTALLIZE_TENANT_IDENTIFIER";
/// Environment variable holding the tenant id.
pub const ENV_TENANT_ID: &str = "CRYSTALLIZE_TENANT_ID";
/// Environment variable holding the access token id.
pub const ENV_ACCESS_TOKEN_ID: &str = "CRYSTALLIZE_ACCESS_TOKEN_ID";
/// Environment variable holding the access token secret.
pub const ENV_ACCESS_TOKEN_SECRET: &str = "CRYSTALLIZE_ACCESS_TOKEN_SECRET";
/// Environment variable holding an origin override.
pub const ENV_ORIGIN: &str = "CRYSTALLIZE_ORIGIN";

/// Configuration for the Crystallize API SDK.
///
/// Holds the tenant, credentials and transport settings shared by every
/// endpoint client.
///
/// # Thread Safety
///
/// `CrystallizeConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct CrystallizeConfig {
    tenant_identifier: TenantIdentifier,
    tenant_id: Option<String>,
    access_token_id: Option<AccessTokenId>,
    access_token_secret: Option<AccessTokenSecret>,
    origin: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    tries: u32,
}

impl CrystallizeConfig {
    /// Creates a new builder for constructing a `CrystallizeConfig`.
    #[must_use]
    pub fn builder() -> CrystallizeConfigBuilder {
        CrystallizeConfigBuilder::new()
    }

    /// Builds a configuration from the `CRYSTALLIZE_*` environment variables.
    ///
    /// `CRYSTALLIZE_TENANT_IDENTIFIER` is required. The tenant id, access
    /// token pair and origin are optional; empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when the tenant identifier is
    /// not set, or any validation error of the individual values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// This is what [`from_env`](Self::from_env) uses; it is exposed so the
    /// variables can come from somewhere other than the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let tenant_identifier = read(ENV_TENANT_IDENTIFIER).ok_or(ConfigError::MissingEnvVar {
            name: ENV_TENANT_IDENTIFIER,
        })?;

        let mut builder =
            CrystallizeConfigBuilder::new().tenant_identifier(TenantIdentifier::new(tenant_identifier)?);

        if let Some(tenant_id) = read(ENV_TENANT_ID) {
            builder = builder.tenant_id(tenant_id);
        }
        if let Some(id) = read(ENV_ACCESS_TOKEN_ID) {
            builder = builder.access_token_id(AccessTokenId::new(id)?);
        }
        if let Some(secret) = read(ENV_ACCESS_TOKEN_SECRET) {
            builder = builder.access_token_secret(AccessTokenSecret::new(secret)?);
        }
        if let Some(origin) = read(ENV_ORIGIN) {
            builder = builder.origin(HostUrl::new(origin)?);
        }

        builder.build()
    }

    /// Returns the tenant identifier.
    #[must_use]
    pub const fn tenant_identifier(&self) -> &TenantIdentifier {
        &self.tenant_identifier
    }

    /// Returns the tenant id, if configured.
    #[must_use]
    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    /// Returns the access token id, if configured.
    #[must_use]
    pub const fn access_token_id(&self) -> Option<&AccessTokenId> {
        self.access_token_id.as_ref()
    }

    /// Returns the access token secret, if configured.
    #[must_use]
    pub const fn access_token_secret(&self) -> Option<&AccessTokenSecret> {
        self.access_token_secret.as_ref()
    }

    /// Returns the origin override, if configured.
    #[must_use]
    pub const fn origin(&self) -> Option<&HostUrl> {
        self.origin.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns how many times a request is attempted on 429/500 responses.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }
}

// Verify CrystallizeConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CrystallizeConfig>();
};

/// Builder for constructing [`CrystallizeConfig`] instances.
///
/// Only `tenant_identifier` is required.
///
/// # Defaults
///
/// - `tries`: 1 (no HTTP-level retries)
/// - everything else: `None`
#[derive(Debug, Default)]
pub struct CrystallizeConfigBuilder {
    tenant_identifier: Option<TenantIdentifier>,
    tenant_id: Option<String>,
    access_token_id: Option<AccessTokenId>,
    access_token_secret: Option<AccessTokenSecret>,
    origin: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    tries: Option<u32>,
}

impl CrystallizeConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tenant identifier (required).
    #[must_use]
    pub fn tenant_identifier(mut self, identifier: TenantIdentifier) -> Self {
        self.tenant_identifier = Some(identifier);
        self
    }

    /// Sets the tenant id.
    #[must_use]
    pub fn tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Sets the access token id.
    #[must_use]
    pub fn access_token_id(mut self, id: AccessTokenId) -> Self {
        self.access_token_id = Some(id);
        self
    }

    /// Sets the access token secret.
    #[must_use]
    pub fn access_token_secret(mut self, secret: AccessTokenSecret) -> Self {
        self.access_token_secret = Some(secret);
        self
    }

    /// Roots every endpoint at the given origin instead of the Crystallize hosts.
    #[must_use]
    pub fn origin(mut self, origin: HostUrl) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets how many times a request is attempted when it receives a 429 or 500.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Builds the [`CrystallizeConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `tenant_identifier` is
    /// not set, or [`ConfigError::InvalidTries`] if `tries` is zero.
    pub fn build(self) -> Result<CrystallizeConfig, ConfigError> {
        let tenant_identifier = self
            .tenant_identifier
            .ok_or(ConfigError::MissingRequiredField {
                field: "tenant_identifier",
            })?;

        let tries = self.tries.unwrap_or(1);
        if tries == 0 {
            return Err(ConfigError::InvalidTries);
        }

        Ok(CrystallizeConfig {
            tenant_identifier,
            tenant_id: self.tenant_id,
            access_token_id: self.access_token_id,
            access_token_secret: self.access_token_secret,
            origin: self.origin,
            user_agent_prefix: self.user_agent_prefix,
            tries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_builder_requires_tenant_identifier() {
        let result = CrystallizeConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "tenant_identifier"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = CrystallizeConfig::builder()
            .tenant_identifier(TenantIdentifier::new("furniture").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.tries(), 1);
        assert!(config.tenant_id().is_none());
        assert!(config.access_token_id().is_none());
        assert!(config.access_token_secret().is_none());
        assert!(config.origin().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_rejects_zero_tries() {
        let result = CrystallizeConfig::builder()
            .tenant_identifier(TenantIdentifier::new("furniture").unwrap())
            .tries(0)
            .build();

        assert!(matches!(result, Err(ConfigError::InvalidTries)));
    }

    #[test]
    fn test_config_debug_does_not_leak_secret() {
        let config = CrystallizeConfig::builder()
            .tenant_identifier(TenantIdentifier::new("furniture").unwrap())
            .access_token_secret(AccessTokenSecret::new("do-not-print").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("CrystallizeConfig"));
        assert!(!debug_str.contains("do-not-print"));
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = CrystallizeConfig::from_lookup(lookup_from(&[
            (ENV_TENANT_IDENTIFIER, "furniture"),
            (ENV_TENANT_ID, "tenant-123"),
            (ENV_ACCESS_TOKEN_ID, "id"),
            (ENV_ACCESS_TOKEN_SECRET, "secret"),
            (ENV_ORIGIN, "http://localhost:4000"),
        ]))
        .unwrap();

        assert_eq!(config.tenant_identifier().as_ref(), "furniture");
        assert_eq!(config.tenant_id(), Some("tenant-123"));
        assert_eq!(config.access_token_id().unwrap().as_ref(), "id");
        assert_eq!(config.access_token_secret().unwrap().as_ref(), "secret");
        assert_eq!(config.origin().unwrap().as_ref(), "http://localhost:4000");
    }

    #[test]
    fn test_from_lookup_treats_empty_values_as_unset() {
        let config = CrystallizeConfig::from_lookup(lookup_from(&[
            (ENV_TENANT_IDENTIFIER, "furniture"),
            (ENV_ACCESS_TOKEN_ID, ""),
            (ENV_ACCESS_TOKEN_SECRET, "  "),
        ]))
        .unwrap();

        assert!(config.access_token_id().is_none());
        assert!(config.access_token_secret().is_none());
    }

    #[test]
    fn test_from_lookup_requires_tenant_identifier() {
        let result = CrystallizeConfig::from_lookup(lookup_from(&[(ENV_ACCESS_TOKEN_ID, "id")]));

        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar {
                name: ENV_TENANT_IDENTIFIER
            })
        ));
    }
}
