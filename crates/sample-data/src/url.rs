//! Minimal absolute URL value.
//!
//! Only checks the `scheme://host...` form; it is a value type for sample
//! data, not a full URL parser.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Error returned for strings that are not absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("missing '://' in '{0}'")]
    MissingScheme(String),

    #[error("invalid scheme '{scheme}' in '{url}'")]
    InvalidScheme { url: String, scheme: String },

    #[error("missing host in '{0}'")]
    MissingHost(String),
}

/// An absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url(Cow<'static, str>);

impl Url {
    /// Wrap a URL literal known to be well formed.
    pub const fn from_static(url: &'static str) -> Self {
        Url(Cow::Borrowed(url))
    }

    /// Parse and validate an absolute URL.
    pub fn parse(url: impl Into<String>) -> Result<Self, UrlError> {
        let url = url.into();
        validate(&url)?;
        Ok(Url(Cow::Owned(url)))
    }

    /// URL built internally from known-good parts.
    pub(crate) fn from_parts(url: String) -> Self {
        Url(Cow::Owned(url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn scheme(&self) -> &str {
        self.0.split_once("://").map_or("", |(scheme, _)| scheme)
    }

    /// Host part (without port, path or query).
    pub fn host(&self) -> &str {
        let rest = self.0.split_once("://").map_or("", |(_, rest)| rest);
        let end = rest.find(['/', '?', '#', ':']).unwrap_or(rest.len());
        &rest[..end]
    }
}

fn validate(url: &str) -> Result<(), UrlError> {
    let (scheme, rest) = url
        .split_once("://")
        .ok_or_else(|| UrlError::MissingScheme(url.to_string()))?;

    let scheme_ok = scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !scheme_ok {
        return Err(UrlError::InvalidScheme {
            url: url.to_string(),
            scheme: scheme.to_string(),
        });
    }

    if rest.is_empty() || rest.starts_with(['/', '?', '#']) {
        return Err(UrlError::MissingHost(url.to_string()));
    }
    Ok(())
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Url {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s)
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Url {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let url = String::deserialize(deserializer)?;
        Url::parse(url).map_err(serde::de::Error::custom)
    }
}
