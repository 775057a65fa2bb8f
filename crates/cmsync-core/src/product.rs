//! Commerce-side product types consumed by the sync bridge.
//!
//! These mirror the shape returned by the commerce backend's graph-style
//! query endpoint. Nearly everything is optional: the backend omits fields
//! that were never set, and the transform layer (not this module) decides
//! how absence maps onto the content-store payload (`null` vs default vs
//! omitted key). `#[serde(default)]` keeps deserialization tolerant of
//! sparse records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A product record from the commerce backend.
///
/// `id` is the cross-system join key: the content-store document for this
/// product carries the same identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// URL slug, e.g. `"medusa-t-shirt"`. Also used to derive asset filenames.
    #[serde(default)]
    pub handle: Option<String>,
    /// Publication status: `"draft"`, `"proposed"`, `"published"`, `"rejected"`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub origin_country: Option<String>,
    /// Harmonized System customs code.
    #[serde(default)]
    pub hs_code: Option<String>,
    /// Manufacturer identification code.
    #[serde(default)]
    pub mid_code: Option<String>,
    #[serde(default)]
    pub discountable: Option<bool>,
    #[serde(default)]
    pub is_giftcard: Option<bool>,
    /// Primary image URL, uploaded as `{handle}-thumb` on sync.
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    #[serde(default)]
    pub tags: Vec<ProductTag>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    /// Identifier in a system the catalog was imported from, if any.
    #[serde(default)]
    pub external_id: Option<String>,
    /// Free-form metadata. May carry SEO overrides under `meta_title`,
    /// `meta_description` and `keywords`.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// A purchasable variant of a [`Product`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub ean: Option<String>,
    #[serde(default)]
    pub upc: Option<String>,
    #[serde(default)]
    pub allow_backorder: Option<bool>,
    #[serde(default)]
    pub manage_inventory: Option<bool>,
    #[serde(default)]
    pub requires_shipping: Option<bool>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub hs_code: Option<String>,
    #[serde(default)]
    pub origin_country: Option<String>,
    #[serde(default)]
    pub mid_code: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    /// Option assignments, e.g. `Size = "M"`.
    #[serde(default)]
    pub options: Vec<VariantOption>,
}

/// One option assignment on a variant.
///
/// The backend may expand the parent option (`option.title`) or only expose
/// its id; the transform falls back from title to `option_id` to `""`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantOption {
    pub id: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub option_id: Option<String>,
    #[serde(default)]
    pub option: Option<VariantOptionParent>,
}

/// Expanded parent option of a [`VariantOption`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantOptionParent {
    #[serde(default)]
    pub title: Option<String>,
}

/// A configurable option on a product (e.g. `Size`) with its allowed values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductOption {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub values: Vec<ProductOptionValue>,
}

/// One allowed value of a [`ProductOption`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductOptionValue {
    #[serde(default)]
    pub value: Option<String>,
}

/// A gallery image on a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
}

/// A tag attached to a product. Synced as its plain string value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductTag {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}
