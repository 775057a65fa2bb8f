//! Batch sync orchestration.
//!
//! Pages through the (optionally filtered) catalog in id order. Records
//! within a page are synced concurrently; pages run strictly one after
//! another. Every synced record appends a [`CompensationEntry`], and the
//! first per-record failure aborts the run with a permanent-failure
//! outcome carrying everything accumulated so far.

use futures::stream::{self, StreamExt};

use cmsync_content::{ContentError, DocumentKind, SyncService};
use cmsync_core::Product;

use crate::error::EngineError;
use crate::source::ProductSource;
use crate::types::{CompensationEntry, PreviousState, SyncAction};

/// Result of a batch run.
///
/// Both arms carry the compensation log: on success it is returned for
/// symmetry (nothing consumes it), on permanent failure the surrounding
/// job system is expected to hand it to
/// [`crate::compensation::compensate`] and not retry the run.
#[derive(Debug)]
pub enum BatchOutcome {
    Completed {
        /// Number of records processed across all pages.
        total: usize,
        compensation: Vec<CompensationEntry>,
    },
    PermanentFailure {
        message: String,
        /// Entries for every record that completed before the failure was
        /// observed, prior pages included.
        compensation: Vec<CompensationEntry>,
    },
}

/// Drives a full catalog sync against a [`SyncService`].
pub struct SyncRunner<'a, S> {
    service: &'a SyncService,
    source: &'a S,
    batch_size: u64,
}

impl<'a, S: ProductSource + Sync> SyncRunner<'a, S> {
    #[must_use]
    pub fn new(service: &'a SyncService, source: &'a S, batch_size: u64) -> Self {
        Self {
            service,
            source,
            batch_size: batch_size.max(1),
        }
    }

    /// Runs the sync over the whole catalog, or over `product_ids` when
    /// given.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Source`] if a page query itself fails.
    /// Per-record sync failures do not error — they produce
    /// [`BatchOutcome::PermanentFailure`].
    pub async fn run(
        &self,
        product_ids: Option<&[String]>,
    ) -> Result<BatchOutcome, EngineError> {
        let mut total = 0usize;
        let mut compensation: Vec<CompensationEntry> = Vec::new();
        let mut offset = 0u64;
        let mut has_more = true;

        while has_more {
            let page = self
                .source
                .fetch_page(product_ids, offset, self.batch_size)
                .await?;
            let page_len = page.data.len();
            tracing::info!(offset, page_len, count = page.count, "syncing page");

            // Whole-page fan-out, joined before the next page. Entries are
            // appended as records complete, so a failure mid-page still
            // leaves the already-completed records accounted for.
            let mut inflight = stream::iter(page.data.iter().map(|product| self.sync_one(product)))
                .buffer_unordered(page_len.max(1));

            while let Some(result) = inflight.next().await {
                match result {
                    Ok(entry) => compensation.push(entry),
                    Err(err) => {
                        tracing::error!(error = %err, "record sync failed; aborting run");
                        return Ok(BatchOutcome::PermanentFailure {
                            message: format!(
                                "an error occurred while syncing documents: {err}"
                            ),
                            compensation,
                        });
                    }
                }
            }
            drop(inflight);

            offset += self.batch_size;
            has_more = offset < page.count;
            total += page_len;
        }

        Ok(BatchOutcome::Completed {
            total,
            compensation,
        })
    }

    /// Syncs a single record and builds its compensation entry.
    ///
    /// The existence probe here is separate from the one inside
    /// `upsert_document`: this one classifies the compensation action and
    /// captures the revision marker, the inner one routes create-vs-update.
    /// Probe failures count as "does not exist" in both places.
    async fn sync_one(&self, product: &Product) -> Result<CompensationEntry, ContentError> {
        let existing = self.service.retrieve(&product.id).await.ok().flatten();

        self.service
            .upsert_document(DocumentKind::Product, product)
            .await?;

        Ok(CompensationEntry {
            action: if existing.is_some() {
                SyncAction::Update
            } else {
                SyncAction::Create
            },
            document_id: product.id.clone(),
            previous_state: existing.map(|doc| PreviousState {
                id: doc.id,
                rev: doc.rev,
            }),
        })
    }
}
