//! HTTP implementation of [`ProductSource`] against the commerce backend's
//! graph-style query endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use cmsync_core::{AppConfig, Product};

use crate::error::SourceError;
use crate::source::{ProductPage, ProductSource};

/// Field selection for product queries. Nested relations use the
/// backend's `relation.*` expansion syntax.
const PRODUCT_FIELDS: &[&str] = &[
    "id",
    "title",
    "subtitle",
    "description",
    "handle",
    "status",
    "material",
    "discountable",
    "is_giftcard",
    "origin_country",
    "hs_code",
    "mid_code",
    "external_id",
    "thumbnail",
    "weight",
    "length",
    "height",
    "width",
    "images.*",
    "variants.*",
    "variants.options.*",
    "variants.options.option.*",
    "options.*",
    "options.values.*",
    "tags.*",
    "metadata",
];

/// Client for the commerce backend's query endpoint.
pub struct CommerceClient {
    client: Client,
    base_url: Url,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    entity: &'a str,
    fields: &'a [&'a str],
    filters: Filters<'a>,
    pagination: Pagination,
}

#[derive(Serialize)]
struct Filters<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a [String]>,
}

#[derive(Serialize)]
struct Pagination {
    skip: u64,
    take: u64,
    order: Order,
}

#[derive(Serialize)]
struct Order {
    id: &'static str,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    data: Vec<Product>,
    #[serde(default)]
    metadata: QueryMetadata,
}

#[derive(Default, Deserialize)]
struct QueryMetadata {
    #[serde(default)]
    count: u64,
}

impl CommerceClient {
    /// Creates a client pointed at the configured commerce backend.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SourceError::InvalidBaseUrl`] if the
    /// configured URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, SourceError> {
        Self::with_base_url(config, &config.commerce_url)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`CommerceClient::new`].
    pub fn with_base_url(config: &AppConfig, base_url: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SourceError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    fn query_url(&self) -> Result<Url, SourceError> {
        self.base_url
            .join("query")
            .map_err(|e| SourceError::InvalidBaseUrl {
                url: format!("{}query", self.base_url),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl ProductSource for CommerceClient {
    async fn fetch_page(
        &self,
        ids: Option<&[String]>,
        skip: u64,
        take: u64,
    ) -> Result<ProductPage, SourceError> {
        let url = self.query_url()?;
        let request = QueryRequest {
            entity: "product",
            fields: PRODUCT_FIELDS,
            filters: Filters { id: ids },
            pagination: Pagination {
                skip,
                take,
                order: Order { id: "ASC" },
            },
        };

        let response = self.client.post(url.clone()).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: QueryResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
                context: format!("product query (skip={skip}, take={take})"),
                source: e,
            })?;

        Ok(ProductPage {
            data: parsed.data,
            count: parsed.metadata.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use cmsync_core::app_config::Dataset;

    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            api_token: "test-token".to_string(),
            project_id: "proj1".to_string(),
            api_version: "2024-01-01".to_string(),
            dataset: Dataset::Production,
            commerce_url: "http://localhost:9000".to_string(),
            studio_url: None,
            product_type_name: None,
            batch_size: 200,
            request_timeout_secs: 30,
            user_agent: "cmsync/test".to_string(),
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn query_url_appends_to_base() {
        let client = CommerceClient::new(&test_config()).unwrap();
        assert_eq!(
            client.query_url().unwrap().as_str(),
            "http://localhost:9000/query"
        );
    }

    #[test]
    fn query_url_strips_trailing_slash() {
        let client =
            CommerceClient::with_base_url(&test_config(), "http://localhost:9000///").unwrap();
        assert_eq!(
            client.query_url().unwrap().as_str(),
            "http://localhost:9000/query"
        );
    }

    #[test]
    fn with_base_url_rejects_garbage() {
        let result = CommerceClient::with_base_url(&test_config(), "not-a-url");
        assert!(matches!(result, Err(SourceError::InvalidBaseUrl { .. })));
    }
}
