//! Best-effort compensation after a failed batch run.
//!
//! Only invoked when the surrounding job system has decided the run
//! actually failed — never on plain success.

use futures::future::join_all;

use cmsync_content::SyncService;

use crate::types::{CompensationEntry, SyncAction};

/// Undoes creations performed by a failed run.
///
/// A document is deleted only when its entry is a `create` with no
/// previous state, i.e. the run brought it into existence. Updates are
/// left alone on purpose: editors may have touched the document since,
/// and the next successful sync corrects the synced fields anyway.
/// Deletion errors are logged and swallowed — this is cleanup, not a
/// rollback guarantee.
pub async fn compensate(service: &SyncService, entries: &[CompensationEntry]) {
    if entries.is_empty() {
        return;
    }

    let deletions = entries
        .iter()
        .filter(|entry| entry.action == SyncAction::Create && entry.previous_state.is_none())
        .map(|entry| async move {
            if let Err(err) = service.delete(&entry.document_id).await {
                tracing::warn!(
                    document_id = %entry.document_id,
                    error = %err,
                    "failed to delete document during compensation"
                );
            } else {
                tracing::info!(
                    document_id = %entry.document_id,
                    "deleted document created by failed run"
                );
            }
        });

    join_all(deletions).await;
}
