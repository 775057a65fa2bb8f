//! Shared configuration and commerce domain types for the cmsync bridge.

pub mod app_config;
pub mod config;
pub mod product;

use thiserror::Error;

pub use app_config::{AppConfig, Dataset};
pub use config::load_app_config_from_env;
pub use product::{
    Product, ProductImage, ProductOption, ProductOptionValue, ProductTag, ProductVariant,
    VariantOption,
};

/// Errors raised while loading or validating application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
