//! # Change Records
//!
//! One entry per key that differs between desired and current state, plus
//! the pure formatting used to preview them.

use crate::constants::MASKED_VALUE;
use std::fmt;

/// Classification of a single key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    /// Present only in the desired state
    Added { new_value: String },
    /// Present in both with a different value
    Changed { old_value: String, new_value: String },
    /// Present only in the current state
    Removed,
    /// Matched the skip policy; left as the store holds it
    Skipped,
}

impl ChangeKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added { .. } => "added",
            ChangeKind::Changed { .. } => "changed",
            ChangeKind::Removed => "removed",
            ChangeKind::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub key: String,
    pub kind: ChangeKind,
}

impl ChangeRecord {
    #[must_use]
    pub fn added(key: impl Into<String>, new_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: ChangeKind::Added {
                new_value: new_value.into(),
            },
        }
    }

    #[must_use]
    pub fn changed(
        key: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            kind: ChangeKind::Changed {
                old_value: old_value.into(),
                new_value: new_value.into(),
            },
        }
    }

    #[must_use]
    pub fn removed(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: ChangeKind::Removed,
        }
    }

    #[must_use]
    pub fn skipped(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: ChangeKind::Skipped,
        }
    }

    /// Human-readable description
    ///
    /// Values only appear for `Added`/`Changed` and only when `show_values` is set.
    #[must_use]
    pub fn describe(&self, show_values: bool) -> String {
        let display = |value: &str| {
            if show_values {
                value.to_string()
            } else {
                MASKED_VALUE.to_string()
            }
        };

        match &self.kind {
            ChangeKind::Added { new_value } => {
                format!("Key: {}, Added, New Value: {}", self.key, display(new_value))
            }
            ChangeKind::Changed {
                old_value,
                new_value,
            } => format!(
                "Key: {}, New Value: {}, Old Value: {}",
                self.key,
                display(new_value),
                display(old_value)
            ),
            ChangeKind::Removed => format!("Key: {}, Removed", self.key),
            ChangeKind::Skipped => format!("Key: {}, Skipped", self.key),
        }
    }
}

/// Masked form; use [`ChangeRecord::describe`] to reveal values
impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(false))
    }
}
