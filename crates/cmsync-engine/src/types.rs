//! Compensation bookkeeping for a batch run.

use serde::{Deserialize, Serialize};

/// What the sync did for one record during a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    Create,
    Update,
    /// Reserved for records the run touched without writing. No current
    /// path produces it; compensation ignores it.
    None,
}

/// Minimal revision marker captured before an update.
///
/// Deliberately tiny — enough to identify what was there, not enough to
/// restore it. Updates are never reverted (see [`crate::compensation`]),
/// and the revision is not used as a conditional-write precondition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviousState {
    pub id: String,
    pub rev: Option<String>,
}

/// One per synced record; lives only for the duration of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationEntry {
    pub action: SyncAction,
    pub document_id: String,
    /// `None` means the document did not exist before this run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_state: Option<PreviousState>,
}
