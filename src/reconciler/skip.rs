//! # Skip Policy
//!
//! Keys matching any exclude pattern are left exactly as the store holds them.

use crate::error::ValidationError;
use regex::Regex;

/// Ordered list of compiled exclude patterns
///
/// A key is skipped when any pattern matches it (unanchored search, so
/// patterns that must match the whole key need their own `^`/`$`).
#[derive(Debug, Clone, Default)]
pub struct SkipPolicy {
    patterns: Vec<Regex>,
}

impl SkipPolicy {
    /// Policy that skips nothing
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Compile patterns in order
    ///
    /// Blank patterns are ignored: an empty regex matches every key, and a
    /// blank CI input means "no exclusion", not "exclude everything".
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ValidationError> {
        let patterns = patterns
            .iter()
            .map(AsRef::as_ref)
            .filter(|p| !p.trim().is_empty())
            .map(|p| {
                Regex::new(p).map_err(|source| ValidationError::InvalidSkipPattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(key))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Source text of the compiled patterns, in order
    #[must_use]
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }
}
