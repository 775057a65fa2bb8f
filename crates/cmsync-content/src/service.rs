//! High-level sync façade over the content-store client.
//!
//! Routes commerce records to the create or update transform per document
//! kind and exposes the retrieve / delete / list / studio-link operations
//! the batch engine and the CLI need.

use cmsync_core::{AppConfig, Product};

use crate::client::ContentStoreClient;
use crate::error::ContentError;
use crate::merge::ProtectedFields;
use crate::types::{Document, MutateResponse};

/// The document kinds this bridge can sync.
///
/// A closed enum rather than a type-keyed registry: adding a kind means
/// adding a variant plus its create/update transform pair, and the
/// compiler checks every dispatch site stays exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Product,
}

impl DocumentKind {
    /// Built-in content-store type name, before any configured remapping.
    #[must_use]
    pub fn default_type_name(self) -> &'static str {
        match self {
            DocumentKind::Product => "product",
        }
    }
}

/// Sync service: transforms + merge policy + content-store API.
pub struct SyncService {
    pub(crate) client: ContentStoreClient,
    pub(crate) protected: ProtectedFields,
    product_type_name: String,
    studio_url: Option<String>,
}

impl SyncService {
    /// Builds a service from configuration and an already-constructed client.
    ///
    /// The configured `product_type_name` (if any) remaps the document type
    /// used for product documents; the protected field set starts at its
    /// default five entries.
    #[must_use]
    pub fn new(client: ContentStoreClient, config: &AppConfig) -> Self {
        Self {
            client,
            protected: ProtectedFields::default(),
            product_type_name: config
                .product_type_name
                .clone()
                .unwrap_or_else(|| DocumentKind::Product.default_type_name().to_string()),
            studio_url: config.studio_url.clone(),
        }
    }

    /// Replaces the protected field set (per-deployment customization).
    #[must_use]
    pub fn with_protected_fields(mut self, protected: ProtectedFields) -> Self {
        self.protected = protected;
        self
    }

    /// Resolved content-store type name for a document kind.
    #[must_use]
    pub fn type_name(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Product => &self.product_type_name,
        }
    }

    /// Creates or updates the document for `product`.
    ///
    /// Probes existence via [`SyncService::retrieve`]; a probe failure
    /// (transport error included) is treated as "does not exist" and routes
    /// to the create path.
    ///
    /// # Errors
    ///
    /// Propagates any [`ContentError`] from the create or patch call itself.
    pub async fn upsert_document(
        &self,
        kind: DocumentKind,
        product: &Product,
    ) -> Result<MutateResponse, ContentError> {
        let existing = self.retrieve(&product.id).await.ok().flatten();
        if existing.is_some() {
            self.update_document(kind, product).await
        } else {
            self.create_document(kind, product).await
        }
    }

    /// Runs the create transform and submits the full document.
    ///
    /// # Errors
    ///
    /// Propagates any [`ContentError`] from the creation call. Asset
    /// uploads inside the transform degrade to missing images instead of
    /// erroring.
    pub async fn create_document(
        &self,
        kind: DocumentKind,
        product: &Product,
    ) -> Result<MutateResponse, ContentError> {
        match kind {
            DocumentKind::Product => {
                let doc = self.transform_product_for_create(product).await;
                self.client.create(&doc).await
            }
        }
    }

    /// Runs the update transform and applies the resulting `set` patch in a
    /// single round trip.
    ///
    /// # Errors
    ///
    /// Propagates any [`ContentError`] from the patch call. The existing-
    /// document fetch inside the transform degrades to "no merge" on
    /// failure.
    pub async fn update_document(
        &self,
        kind: DocumentKind,
        product: &Product,
    ) -> Result<MutateResponse, ContentError> {
        match kind {
            DocumentKind::Product => {
                let patch = self.transform_product_for_update(product).await;
                self.client.patch_set(&product.id, &patch.set).await
            }
        }
    }

    /// Fetches a document by id; `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Propagates transport and decoding errors; callers that only probe
    /// existence are expected to map those onto "does not exist".
    pub async fn retrieve(&self, id: &str) -> Result<Option<Document>, ContentError> {
        self.client.get_document(id).await
    }

    /// Deletes a document; deleting a nonexistent id is not an error.
    ///
    /// # Errors
    ///
    /// Propagates transport errors and non-2xx responses.
    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        self.client.delete(id).await.map(|_| ())
    }

    /// Batch-fetches documents by id. Each result carries its identity in
    /// the uniform `id` field alongside the raw document fields.
    ///
    /// # Errors
    ///
    /// Propagates transport and decoding errors.
    pub async fn list(&self, ids: &[String]) -> Result<Vec<Document>, ContentError> {
        self.client.get_documents(ids).await
    }

    /// Composes a studio deep link of the form
    /// `{studio}/structure/{type};{id}`.
    ///
    /// `explicit_type` bypasses the type-name mapping with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::MissingStudioUrl`] when no studio base URL
    /// was configured.
    pub fn studio_link(
        &self,
        kind: DocumentKind,
        id: &str,
        explicit_type: Option<&str>,
    ) -> Result<String, ContentError> {
        let studio = self
            .studio_url
            .as_deref()
            .ok_or(ContentError::MissingStudioUrl)?;
        let resolved = explicit_type.unwrap_or_else(|| self.type_name(kind));
        Ok(format!(
            "{}/structure/{resolved};{id}",
            studio.trim_end_matches('/')
        ))
    }
}

#[cfg(test)]
mod tests {
    use cmsync_core::app_config::{AppConfig, Dataset};

    use super::*;

    fn config(studio_url: Option<&str>, type_name: Option<&str>) -> AppConfig {
        AppConfig {
            api_token: "test-token".to_string(),
            project_id: "proj1".to_string(),
            api_version: "2024-01-01".to_string(),
            dataset: Dataset::Development,
            commerce_url: "http://localhost:9000".to_string(),
            studio_url: studio_url.map(str::to_string),
            product_type_name: type_name.map(str::to_string),
            batch_size: 200,
            request_timeout_secs: 30,
            user_agent: "cmsync/test".to_string(),
            log_level: "info".to_string(),
        }
    }

    fn service(studio_url: Option<&str>, type_name: Option<&str>) -> SyncService {
        let cfg = config(studio_url, type_name);
        let client = ContentStoreClient::new(&cfg).unwrap();
        SyncService::new(client, &cfg)
    }

    #[test]
    fn studio_link_uses_mapped_type_name() {
        let svc = service(Some("https://studio.example.com"), None);
        let link = svc
            .studio_link(DocumentKind::Product, "prod_1", None)
            .unwrap();
        assert_eq!(link, "https://studio.example.com/structure/product;prod_1");
    }

    #[test]
    fn studio_link_honours_type_map_override() {
        let svc = service(Some("https://studio.example.com/"), Some("catalogProduct"));
        let link = svc
            .studio_link(DocumentKind::Product, "prod_1", None)
            .unwrap();
        assert_eq!(
            link,
            "https://studio.example.com/structure/catalogProduct;prod_1"
        );
    }

    #[test]
    fn studio_link_explicit_type_bypasses_the_map() {
        let svc = service(Some("https://studio.example.com"), Some("catalogProduct"));
        let link = svc
            .studio_link(DocumentKind::Product, "prod_1", Some("legacyProduct"))
            .unwrap();
        assert_eq!(
            link,
            "https://studio.example.com/structure/legacyProduct;prod_1"
        );
    }

    #[test]
    fn studio_link_without_configured_url_is_a_config_error() {
        let svc = service(None, None);
        let result = svc.studio_link(DocumentKind::Product, "prod_1", None);
        assert!(matches!(result, Err(ContentError::MissingStudioUrl)));
    }
}
