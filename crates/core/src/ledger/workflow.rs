//! Journal entry state machine.
//!
//! ```text
//! DRAFT --post--> POSTED --void--> VOIDED
//!   |               |
//! edit/delete     reverse (creates a sibling entry, original stays POSTED)
//! ```

use serde::{Deserialize, Serialize};

use super::error::LedgerError;
use super::types::JournalStatus;

/// Actions that depend on an entry's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalAction {
    /// Replace header and lines.
    Edit,
    /// Finalize a draft.
    Post,
    /// Cancel a posted entry.
    Void,
    /// Create the mirror-image entry.
    Reverse,
    /// Remove a draft.
    Delete,
}

impl std::fmt::Display for JournalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Edit => "edit",
            Self::Post => "post",
            Self::Void => "void",
            Self::Reverse => "reverse",
            Self::Delete => "delete",
        })
    }
}

/// Stateless journal workflow rules.
pub struct JournalWorkflow;

impl JournalWorkflow {
    /// Checks that `action` is legal for an entry in `status`.
    ///
    /// # Errors
    ///
    /// `CanOnlyDeleteDraft` for deleting a non-draft, `InvalidTransition` for
    /// every other illegal action.
    pub fn ensure_allowed(
        entry_number: &str,
        status: JournalStatus,
        action: JournalAction,
    ) -> Result<(), LedgerError> {
        let allowed = match action {
            JournalAction::Edit | JournalAction::Post | JournalAction::Delete => {
                status == JournalStatus::Draft
            }
            JournalAction::Void | JournalAction::Reverse => status == JournalStatus::Posted,
        };
        if allowed {
            return Ok(());
        }
        if action == JournalAction::Delete {
            return Err(LedgerError::CanOnlyDeleteDraft {
                entry_number: entry_number.to_string(),
                status,
            });
        }
        Err(LedgerError::InvalidTransition {
            action,
            entry_number: entry_number.to_string(),
            status,
        })
    }

    /// Status of the entry after `action` succeeds.
    #[must_use]
    pub const fn status_after(status: JournalStatus, action: JournalAction) -> JournalStatus {
        match action {
            JournalAction::Post => JournalStatus::Posted,
            JournalAction::Void => JournalStatus::Voided,
            JournalAction::Edit | JournalAction::Reverse | JournalAction::Delete => status,
        }
    }

    /// Entries are created either as drafts or directly posted.
    pub fn ensure_creatable(status: JournalStatus) -> Result<(), LedgerError> {
        match status {
            JournalStatus::Draft | JournalStatus::Posted => Ok(()),
            JournalStatus::Voided => Err(LedgerError::InvalidRequestedStatus(status)),
        }
    }
}
