/// Target dataset within the content-store project.
///
/// The content store exposes exactly two environments for this deployment;
/// anything else in the env var is rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Production,
    Development,
}

impl Dataset {
    /// Dataset name as it appears in content-store API paths.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Dataset::Production => "production",
            Dataset::Development => "development",
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Static API token used as a bearer credential against the content store.
    pub api_token: String,
    /// Content-store project identifier (part of the API hostname).
    pub project_id: String,
    /// Content-store API version, e.g. `"2024-01-01"`.
    pub api_version: String,
    pub dataset: Dataset,
    /// Base URL of the commerce backend's query endpoint.
    pub commerce_url: String,
    /// Base URL of the editor studio, used only for deep links.
    pub studio_url: Option<String>,
    /// Override for the content-store type name of product documents.
    pub product_type_name: Option<String>,
    /// Page size for batch sync pagination.
    pub batch_size: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_token", &"[redacted]")
            .field("project_id", &self.project_id)
            .field("api_version", &self.api_version)
            .field("dataset", &self.dataset)
            .field("commerce_url", &self.commerce_url)
            .field("studio_url", &self.studio_url)
            .field("product_type_name", &self.product_type_name)
            .field("batch_size", &self.batch_size)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
