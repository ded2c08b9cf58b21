//! # Reconciler
//!
//! Pure diff/merge over two ordered payloads.
//!
//! [`compute`] walks the desired state in file order, then the current state
//! in store order, so the records of a [`ChangeSet`] always come out in the
//! same sequence for the same inputs. There is no I/O and no failure mode.

mod change;
mod skip;

pub use change::{ChangeKind, ChangeRecord};
pub use skip::SkipPolicy;

use crate::SecretPayload;

/// What applying a change set does to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Replace the remote payload with the merged state
    #[default]
    Update,
    /// Delete the remote secret
    Delete,
}

impl SyncMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMode::Update => "update",
            SyncMode::Delete => "delete",
        }
    }
}

/// Per-kind record counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeSummary {
    pub added: usize,
    pub changed: usize,
    pub removed: usize,
    pub skipped: usize,
}

impl ChangeSummary {
    /// Whether applying would alter the remote payload
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.added + self.changed + self.removed > 0
    }
}

impl std::fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} added, {} changed, {} removed, {} skipped",
            self.added, self.changed, self.removed, self.skipped
        )
    }
}

/// Ordered change records and the payload they produce
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeSet {
    records: Vec<ChangeRecord>,
    merged_state: SecretPayload,
    show_values: bool,
    mode: SyncMode,
}

impl ChangeSet {
    /// Change set for the delete path: no records, nothing to merge
    #[must_use]
    pub fn deletion() -> Self {
        Self {
            mode: SyncMode::Delete,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    #[must_use]
    pub fn merged_state(&self) -> &SecretPayload {
        &self.merged_state
    }

    #[must_use]
    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    #[must_use]
    pub fn show_values(&self) -> bool {
        self.show_values
    }

    /// Descriptions in record order, masked according to the set's display policy
    #[must_use]
    pub fn descriptions(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|record| record.describe(self.show_values))
            .collect()
    }

    #[must_use]
    pub fn summary(&self) -> ChangeSummary {
        self.records
            .iter()
            .fold(ChangeSummary::default(), |mut summary, record| {
                match record.kind {
                    ChangeKind::Added { .. } => summary.added += 1,
                    ChangeKind::Changed { .. } => summary.changed += 1,
                    ChangeKind::Removed => summary.removed += 1,
                    ChangeKind::Skipped => summary.skipped += 1,
                }
                summary
            })
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.summary().has_changes()
    }
}

/// Diff `desired` against `current`
///
/// - desired pass: skipped keys are reported and left alone, equal values
///   produce nothing, everything else is merged as `Added` or `Changed`
/// - current pass: keys missing from `desired` are `Removed`, unless the
///   skip policy matches them, in which case they are `Skipped` and kept
#[must_use]
pub fn compute(
    desired: &SecretPayload,
    current: &SecretPayload,
    skip: &SkipPolicy,
    show_values: bool,
) -> ChangeSet {
    let mut records = Vec::new();
    let mut merged_state = current.clone();

    for (key, new_value) in desired {
        if skip.matches(key) {
            records.push(ChangeRecord::skipped(key.as_str()));
            continue;
        }

        match current.get(key) {
            Some(old_value) if old_value == new_value => {}
            Some(old_value) => {
                records.push(ChangeRecord::changed(
                    key.as_str(),
                    old_value.as_str(),
                    new_value.as_str(),
                ));
                merged_state.insert(key.clone(), new_value.clone());
            }
            None => {
                records.push(ChangeRecord::added(key.as_str(), new_value.as_str()));
                merged_state.insert(key.clone(), new_value.clone());
            }
        }
    }

    for key in current.keys() {
        if desired.contains_key(key) {
            continue;
        }

        if skip.matches(key) {
            records.push(ChangeRecord::skipped(key.as_str()));
            continue;
        }

        records.push(ChangeRecord::removed(key.as_str()));
        merged_state.shift_remove(key);
    }

    ChangeSet {
        records,
        merged_state,
        show_values,
        mode: SyncMode::Update,
    }
}
