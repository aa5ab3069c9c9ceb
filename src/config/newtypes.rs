//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Crystallize tenant identifier.
///
/// The identifier is the slug that appears in every API URL
/// (`https://api.crystallize.com/{identifier}/catalogue`). It is trimmed and
/// lowercased on construction.
///
/// # Example
///
/// ```rust
/// use crystallize_api::TenantIdentifier;
///
/// let tenant = TenantIdentifier::new(" Furniture ").unwrap();
/// assert_eq!(tenant.as_ref(), "furniture");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TenantIdentifier(String);

impl TenantIdentifier {
    /// Creates a new validated tenant identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyTenantIdentifier`] if the identifier is empty,
    /// or [`ConfigError::InvalidTenantIdentifier`] if it contains anything other
    /// than ASCII letters, digits and hyphens.
    pub fn new(identifier: impl Into<String>) -> Result<Self, ConfigError> {
        let identifier = identifier.into().trim().to_lowercase();
        if identifier.is_empty() {
            return Err(ConfigError::EmptyTenantIdentifier);
        }

        let valid = identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid || identifier.starts_with('-') || identifier.ends_with('-') {
            return Err(ConfigError::InvalidTenantIdentifier { identifier });
        }

        Ok(Self(identifier))
    }
}

impl AsRef<str> for TenantIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TenantIdentifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TenantIdentifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated access token id.
///
/// Sent as the `X-Crystallize-Access-Token-Id` header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessTokenId(String);

impl AccessTokenId {
    /// Creates a new validated access token id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessTokenId`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyAccessTokenId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for AccessTokenId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated access token secret.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `AccessTokenSecret(*****)` instead of the actual secret.
///
/// # Example
///
/// ```rust
/// use crystallize_api::AccessTokenSecret;
///
/// let secret = AccessTokenSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "AccessTokenSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessTokenSecret(String);

impl AccessTokenSecret {
    /// Creates a new validated access token secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessTokenSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyAccessTokenSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for AccessTokenSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessTokenSecret(*****)")
    }
}

/// A validated origin URL.
///
/// Used to point every API endpoint at a different origin, e.g. a proxy or a
/// local test server. Trailing slashes are dropped.
///
/// # Example
///
/// ```rust
/// use crystallize_api::HostUrl;
///
/// let url = HostUrl::new("http://localhost:3000/").unwrap();
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), Some("localhost"));
/// assert_eq!(url.as_ref(), "http://localhost:3000");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidHostUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}
