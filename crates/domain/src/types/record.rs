//! UI-managed record identity and search/cleanup results

use serde::{Deserialize, Serialize};

use super::is_blank;
use crate::errors::{Result, SyncError};

/// Search key for a record shown in the remote UI's results table.
///
/// Both names are stored trimmed; matching is case-sensitive on the full
/// name as displayed by the remote UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    first_name: String,
    last_name: String,
}

impl RecordKey {
    /// # Errors
    /// Returns `SyncError::InvalidArgument` when either name is blank.
    pub fn new(first_name: &str, last_name: &str) -> Result<Self> {
        if is_blank(first_name) {
            return Err(SyncError::InvalidArgument(format!(
                "Invalid firstName provided: '{first_name}'"
            )));
        }
        if is_blank(last_name) {
            return Err(SyncError::InvalidArgument(format!(
                "Invalid lastName provided: '{last_name}'"
            )));
        }

        Ok(Self { first_name: first_name.trim().to_string(), last_name: last_name.trim().to_string() })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// First and last name joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Position of a located row in the results table.
///
/// Valid only until the next UI-mutating action; row ordering is decided by
/// the remote system and may change after any mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordLocation {
    pub row_index: usize,
}

impl RecordLocation {
    pub const fn new(row_index: usize) -> Self {
        Self { row_index }
    }
}

/// Result of searching the results table for a [`RecordKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Exactly one matching row.
    Found(RecordLocation),
    /// No row appeared within the polling budget.
    NotFound,
    /// More than one row matched; not actionable for cleanup.
    Ambiguous { count: usize },
}

impl SearchOutcome {
    /// Classify a settled row count. Only a count of exactly one is a match.
    pub fn from_row_count(count: usize) -> Self {
        match count {
            0 => Self::NotFound,
            1 => Self::Found(RecordLocation::new(0)),
            count => Self::Ambiguous { count },
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// What an idempotent cleanup did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    Deleted,
    AlreadyAbsent,
    SkippedAmbiguous,
}

crate::impl_domain_status_conversions!(CleanupOutcome {
    Deleted => "deleted",
    AlreadyAbsent => "already_absent",
    SkippedAmbiguous => "skipped_ambiguous",
});
