//! Invalidation Patterns
//!
//! Selects which cache keys an invalidation removes. Prefix matching is what
//! the API client uses; regex matching must be asked for explicitly so that
//! a key prefix containing `.` or `?` is never read as an expression.

use regex::Regex;

use crate::error::Result;

/// Key selector for [`CacheStore::invalidate`](super::CacheStore::invalidate).
#[derive(Debug, Clone)]
pub enum InvalidationPattern {
    /// Every entry
    All,
    /// Keys starting with the given literal text
    Prefix(String),
    /// Keys the expression finds a match in (unanchored, like `Regex::is_match`)
    Regex(Regex),
}

impl InvalidationPattern {
    /// Builds a prefix selector.
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    /// Compiles a regex selector.
    pub fn parse_regex(expr: &str) -> Result<Self> {
        Ok(Self::Regex(Regex::new(expr)?))
    }

    /// Returns true if `key` is selected by this pattern.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::All => true,
            Self::Prefix(prefix) => key.starts_with(prefix.as_str()),
            Self::Regex(regex) => regex.is_match(key),
        }
    }
}

impl From<Option<&str>> for InvalidationPattern {
    /// `None` clears everything, `Some(p)` is a prefix.
    fn from(pattern: Option<&str>) -> Self {
        match pattern {
            None | Some("") => Self::All,
            Some(prefix) => Self::prefix(prefix),
        }
    }
}
