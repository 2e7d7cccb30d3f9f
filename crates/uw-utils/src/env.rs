//! Environment variable lookup
//!
//! [`Env`] wraps a lookup function so configuration loading can be exercised
//! without touching the real process environment.

use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// A required variable is unset or blank
    #[error("Environment variable not found: {0}")]
    Missing(String),

    /// A variable is set but cannot be parsed
    #[error("Environment variable {name} is invalid: {reason}")]
    Invalid { name: String, reason: String },
}

/// Source of environment variables
pub struct Env<F = fn(&str) -> Option<String>> {
    lookup: F,
}

impl Env {
    /// Read from the process environment
    pub fn process() -> Self {
        Self {
            lookup: |name: &str| std::env::var(name).ok(),
        }
    }
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Read through a custom lookup function
    pub fn from_fn(lookup: F) -> Self {
        Self { lookup }
    }

    /// Get a variable, treating blank values as unset
    pub fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Get a variable that must be present
    pub fn required(&self, name: &str) -> Result<String, EnvError> {
        self.optional(name)
            .ok_or_else(|| EnvError::Missing(name.to_string()))
    }

    /// Get and parse an optional variable
    pub fn parsed<T>(&self, name: &str) -> Result<Option<T>, EnvError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.optional(name)
            .map(|raw| {
                raw.parse::<T>().map_err(|e| EnvError::Invalid {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Env<impl Fn(&str) -> Option<String>> {
        Env::from_fn(|name: &str| match name {
            "TOKEN" => Some("abc".to_string()),
            "BLANK" => Some("   ".to_string()),
            "SECS" => Some("45".to_string()),
            "BAD_SECS" => Some("soon".to_string()),
            _ => None,
        })
    }

    #[test]
    fn test_required() {
        assert_eq!(env().required("TOKEN"), Ok("abc".to_string()));
        assert_eq!(
            env().required("MISSING"),
            Err(EnvError::Missing("MISSING".to_string()))
        );
        assert!(env().required("BLANK").is_err());
    }

    #[test]
    fn test_parsed() {
        assert_eq!(env().parsed::<u64>("SECS"), Ok(Some(45)));
        assert_eq!(env().parsed::<u64>("MISSING"), Ok(None));

        let err = env().parsed::<u64>("BAD_SECS").unwrap_err();
        assert!(err.to_string().contains("BAD_SECS"));
    }
}
