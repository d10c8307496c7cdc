//! # Identifier Newtypes
//!
//! [`Uri`] and [`Email`] validate their format at construction time, and
//! their `Deserialize` impls route through the same constructor, so a badge
//! document with a malformed `id`, `url` or `email` is rejected when it is
//! parsed rather than when it is used.
//!
//! Both types keep the exact input string. A `Uri` is never normalized
//! (`https://example.org` does not become `https://example.org/`), because
//! the identifier text is part of what gets signed.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Routes deserialization through `new()` so invalid values are rejected.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// An absolute URI: `https://…`, `urn:uuid:…`, `did:method:…` and so on.
///
/// # Validation
///
/// - Parses as an absolute URL (has a scheme).
/// - Contains no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Uri(String);

impl_validating_deserialize!(Uri);

impl Uri {
    /// # Errors
    ///
    /// [`ValidationError::InvalidUri`] if the value is not an absolute URI.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.is_empty() {
            return Err(ValidationError::InvalidUri {
                value: s,
                reason: "empty string".to_string(),
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidUri {
                value: s,
                reason: "contains whitespace".to_string(),
            });
        }
        if let Err(e) = url::Url::parse(&s) {
            return Err(ValidationError::InvalidUri {
                value: s,
                reason: e.to_string(),
            });
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased scheme (`https`, `did`, `urn`, …).
    pub fn scheme(&self) -> String {
        self.0
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// True for plain `http:` URIs, which badge hosts should not use.
    pub fn is_insecure_http(&self) -> bool {
        self.scheme() == "http"
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Uri {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = ValidationError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An email address.
///
/// # Validation
///
/// - Exactly one `@`, with a non-empty local part.
/// - Domain has at least two non-empty dot-separated labels of
///   alphanumerics and `-`, not starting or ending with `-`.
/// - No whitespace, at most 254 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl_validating_deserialize!(Email);

impl Email {
    /// # Errors
    ///
    /// [`ValidationError::InvalidEmail`] if the syntax check fails.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if Self::is_well_formed(&s) {
            Ok(Self(s))
        } else {
            Err(ValidationError::InvalidEmail(s))
        }
    }

    fn is_well_formed(s: &str) -> bool {
        if s.len() > 254 || s.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = s.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') || local.starts_with('.') || local.ends_with('.')
        {
            return false;
        }
        let labels: Vec<&str> = domain.split('.').collect();
        labels.len() >= 2
            && labels.iter().all(|label| {
                !label.is_empty()
                    && !label.starts_with('-')
                    && !label.ends_with('-')
                    && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
