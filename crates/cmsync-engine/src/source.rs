//! Seam between the batch engine and the commerce backend.

use async_trait::async_trait;

use cmsync_core::Product;

use crate::error::SourceError;

/// One page of products plus the total count matching the query.
///
/// `count` covers the whole (possibly filtered) record set, not the page;
/// the pagination loop uses it to decide whether more pages remain.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub data: Vec<Product>,
    pub count: u64,
}

/// Paginated access to the commerce catalog.
///
/// Implementations must order records by id ascending so page boundaries
/// neither skip nor duplicate records under a static record set. No
/// guarantee is made (or expected) for records inserted or deleted while
/// a sync is running.
#[async_trait]
pub trait ProductSource {
    /// Fetches records `skip..skip+take`, optionally restricted to an
    /// explicit id list.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on transport or decoding failure; the
    /// engine aborts the run rather than retrying.
    async fn fetch_page(
        &self,
        ids: Option<&[String]>,
        skip: u64,
        take: u64,
    ) -> Result<ProductPage, SourceError>;
}
