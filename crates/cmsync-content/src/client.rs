//! Low-level HTTP client for the content-store API.
//!
//! Wraps `reqwest` with bearer-token auth and typed response
//! deserialization for the three surfaces the bridge needs: document
//! reads, the mutation endpoint (create / patch / delete) and image asset
//! uploads. Higher-level semantics (transforms, merge policy, upsert
//! routing) live in [`crate::service::SyncService`].

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde_json::{json, Map, Value};

use cmsync_core::AppConfig;

use crate::error::ContentError;
use crate::types::{AssetResponse, Document, DocumentsResponse, MutateResponse};

/// API host of the hosted content store; the project id is the subdomain.
const DEFAULT_API_HOST: &str = "api.sanity.io";

/// Client for the content-store HTTP API.
///
/// Use [`ContentStoreClient::new`] for production or
/// [`ContentStoreClient::with_base_url`] to point at a mock server in tests.
pub struct ContentStoreClient {
    pub(crate) client: Client,
    base_url: Url,
    token: String,
    api_version: String,
    dataset: String,
}

impl ContentStoreClient {
    /// Creates a client pointed at the hosted API for the configured project.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ContentError::InvalidBaseUrl`] if the
    /// project id does not form a valid hostname.
    pub fn new(config: &AppConfig) -> Result<Self, ContentError> {
        let base = format!("https://{}.{DEFAULT_API_HOST}", config.project_id);
        Self::with_base_url(config, &base)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ContentError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(config: &AppConfig, base_url: &str) -> Result<Self, ContentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends path segments instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ContentError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            token: config.api_token.clone(),
            api_version: config.api_version.clone(),
            dataset: config.dataset.to_string(),
        })
    }

    /// Fetches a single document by id.
    ///
    /// Returns `Ok(None)` on HTTP 404 or when the store answers with an
    /// empty document list — both mean "does not exist".
    ///
    /// # Errors
    ///
    /// - [`ContentError::Http`] on network failure.
    /// - [`ContentError::UnexpectedStatus`] on any non-2xx status other than 404.
    /// - [`ContentError::Deserialize`] if the response shape is unexpected.
    pub async fn get_document(&self, id: &str) -> Result<Option<Document>, ContentError> {
        let url = self.endpoint(&format!("data/doc/{}/{id}", self.dataset))?;
        let response = self.client.get(url.clone()).bearer_auth(&self.token).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let parsed: DocumentsResponse = Self::read_json(response, &url).await?;
        Ok(parsed.documents.into_iter().next())
    }

    /// Batch-fetches documents by id. Ids absent from the store are simply
    /// missing from the result; an empty id slice short-circuits to an
    /// empty vec without a request.
    ///
    /// # Errors
    ///
    /// Same as [`ContentStoreClient::get_document`].
    pub async fn get_documents(&self, ids: &[String]) -> Result<Vec<Document>, ContentError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.endpoint(&format!("data/doc/{}/{}", self.dataset, ids.join(",")))?;
        let response = self.client.get(url.clone()).bearer_auth(&self.token).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let parsed: DocumentsResponse = Self::read_json(response, &url).await?;
        Ok(parsed.documents)
    }

    /// Creates a new document from a full payload.
    ///
    /// The payload carries its own `_id`, so the store assigns no identity
    /// of its own.
    ///
    /// # Errors
    ///
    /// - [`ContentError::Http`] on network failure.
    /// - [`ContentError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ContentError::Deserialize`] if the response shape is unexpected.
    pub async fn create<T: Serialize>(&self, doc: &T) -> Result<MutateResponse, ContentError> {
        self.mutate(json!([{ "create": doc }])).await
    }

    /// Applies a `set` patch to the document identified by `id`.
    ///
    /// Committed in a single round trip; fields not named in `set` are left
    /// untouched by the store.
    ///
    /// # Errors
    ///
    /// Same as [`ContentStoreClient::create`].
    pub async fn patch_set(
        &self,
        id: &str,
        set: &Map<String, Value>,
    ) -> Result<MutateResponse, ContentError> {
        self.mutate(json!([{ "patch": { "id": id, "set": set } }])).await
    }

    /// Deletes the document identified by `id`.
    ///
    /// Deleting a nonexistent document succeeds with an empty result list.
    ///
    /// # Errors
    ///
    /// Same as [`ContentStoreClient::create`].
    pub async fn delete(&self, id: &str) -> Result<MutateResponse, ContentError> {
        self.mutate(json!([{ "delete": { "id": id } }])).await
    }

    /// Uploads raw image bytes and returns the assigned asset id.
    ///
    /// # Errors
    ///
    /// - [`ContentError::Http`] on network failure.
    /// - [`ContentError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ContentError::Deserialize`] if the response shape is unexpected.
    pub async fn upload_asset(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<String, ContentError> {
        let mut url = self.endpoint(&format!("assets/images/{}", self.dataset))?;
        url.query_pairs_mut().append_pair("filename", filename);
        let response = self
            .client
            .post(url.clone())
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        let parsed: AssetResponse = Self::read_json(response, &url).await?;
        Ok(parsed.document.id)
    }

    /// Sends a mutation batch to the mutation endpoint with `returnIds=true`.
    async fn mutate(&self, mutations: Value) -> Result<MutateResponse, ContentError> {
        let mut url = self.endpoint(&format!("data/mutate/{}", self.dataset))?;
        url.query_pairs_mut().append_pair("returnIds", "true");
        let response = self
            .client
            .post(url.clone())
            .bearer_auth(&self.token)
            .json(&json!({ "mutations": mutations }))
            .send()
            .await?;
        Self::read_json(response, &url).await
    }

    /// Asserts a 2xx status and parses the response body as JSON.
    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        url: &Url,
    ) -> Result<T, ContentError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ContentError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Builds `{base}/v{api_version}/{path}`.
    fn endpoint(&self, path: &str) -> Result<Url, ContentError> {
        let relative = format!("v{}/{path}", self.api_version);
        self.base_url
            .join(&relative)
            .map_err(|e| ContentError::InvalidBaseUrl {
                url: format!("{}{relative}", self.base_url),
                reason: e.to_string(),
            })
    }
}
