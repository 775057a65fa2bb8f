use crate::app_config::{AppConfig, Dataset};
use crate::ConfigError;

/// Load application configuration from environment variables already in the
/// process.
///
/// `.env` handling is the binary's concern (the CLI calls
/// `dotenvy::dotenv().ok()` before this); this function only reads what is
/// already set.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_token = require("CMSYNC_API_TOKEN")?;
    let project_id = require("CMSYNC_PROJECT_ID")?;
    let commerce_url = require("CMSYNC_COMMERCE_URL")?;

    let api_version = or_default("CMSYNC_API_VERSION", "2024-01-01");
    let dataset = parse_dataset(&or_default("CMSYNC_DATASET", "production"))?;
    let studio_url = lookup("CMSYNC_STUDIO_URL").ok();
    let product_type_name = lookup("CMSYNC_PRODUCT_TYPE_NAME").ok();

    let batch_size = parse_u64("CMSYNC_BATCH_SIZE", "200")?;
    if batch_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CMSYNC_BATCH_SIZE".to_string(),
            reason: "batch size must be at least 1".to_string(),
        });
    }
    let request_timeout_secs = parse_u64("CMSYNC_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("CMSYNC_USER_AGENT", "cmsync/0.1 (catalog-sync)");
    let log_level = or_default("CMSYNC_LOG_LEVEL", "info");

    Ok(AppConfig {
        api_token,
        project_id,
        api_version,
        dataset,
        commerce_url,
        studio_url,
        product_type_name,
        batch_size,
        request_timeout_secs,
        user_agent,
        log_level,
    })
}

/// Parse a string into a `Dataset` variant.
///
/// Only the two provisioned datasets are accepted; a typo here would
/// otherwise sync the whole catalog into a nonexistent dataset.
fn parse_dataset(s: &str) -> Result<Dataset, ConfigError> {
    match s {
        "production" => Ok(Dataset::Production),
        "development" => Ok(Dataset::Development),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CMSYNC_DATASET".to_string(),
            reason: format!("unknown dataset '{other}' (expected production or development)"),
        }),
    }
}
