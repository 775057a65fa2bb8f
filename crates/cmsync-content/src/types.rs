//! Wire types for the content-store API and the product document payloads.
//!
//! ## Null vs default vs omitted
//!
//! The distinction is load-bearing and enforced by the types here rather
//! than by convention:
//!
//! - Nullable descriptive scalars (`subtitle`, `material`, dimensions, ...)
//!   are `Option<T>` serialized **always**, so an absent source value lands
//!   as an explicit `null` in the document.
//! - Boolean flags are plain `bool` with their documented defaults applied
//!   at transform time (`discountable`, `manage_inventory` and
//!   `requires_shipping` default `true`; `allow_backorder` and
//!   `is_giftcard` default `false`).
//! - Arrays are `Vec<T>` serialized always — an empty list, never `null`.
//! - On the **update patch only**, `thumbnail` and `images` are skipped
//!   entirely when no upload happened, so an update never introduces a
//!   media key the document did not already have.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An existing document read back from the content store.
///
/// Only identity and revision are modeled; everything else stays in the
/// flattened `fields` map so editor-owned values of any shape survive a
/// read-merge-write cycle untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: String,
    /// Revision marker assigned by the content store on every write.
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Returns the raw value of a field, if the document defines it.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Envelope returned by the document read endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct DocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// Result of a mutation request (create / patch / delete).
#[derive(Debug, Clone, Deserialize)]
pub struct MutateResponse {
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    #[serde(default)]
    pub results: Vec<MutateResult>,
}

/// One entry in [`MutateResponse::results`].
#[derive(Debug, Clone, Deserialize)]
pub struct MutateResult {
    pub id: String,
    #[serde(default)]
    pub operation: Option<String>,
}

/// Envelope returned by the asset upload endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct AssetResponse {
    pub document: AssetDocument,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssetDocument {
    #[serde(rename = "_id")]
    pub id: String,
}

/// A content-store image value: a typed wrapper around an asset reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(rename = "_type")]
    pub type_tag: String,
    pub asset: AssetLink,
}

/// Reference to an uploaded asset document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLink {
    #[serde(rename = "_type")]
    pub type_tag: String,
    #[serde(rename = "_ref")]
    pub asset_id: String,
}

impl ImageRef {
    /// Wraps an uploaded asset id as `{_type: "image", asset: {_type: "reference", _ref}}`.
    #[must_use]
    pub fn from_asset_id(asset_id: String) -> Self {
        Self {
            type_tag: "image".to_string(),
            asset: AssetLink {
                type_tag: "reference".to_string(),
                asset_id,
            },
        }
    }
}

/// Slug structure used for the product handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug {
    #[serde(rename = "_type")]
    pub type_tag: String,
    pub current: String,
}

impl Slug {
    #[must_use]
    pub fn new(current: String) -> Self {
        Self {
            type_tag: "slug".to_string(),
            current,
        }
    }
}

/// Full document payload for the create path.
///
/// Carries the document identity (`_id` is the commerce product id — the
/// store assigns no id of its own) and seeds the editor-owned fields with
/// their creation defaults: `type`/`collection` null, `categories` empty,
/// media from the source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDoc {
    #[serde(rename = "_type")]
    pub type_name: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub handle: Option<Slug>,
    pub status: String,
    pub material: Option<String>,
    pub origin_country: Option<String>,
    pub hs_code: Option<String>,
    pub mid_code: Option<String>,
    pub discountable: bool,
    pub is_giftcard: bool,
    pub thumbnail: Option<ImageRef>,
    pub images: Vec<ImageRef>,
    pub variants: Vec<VariantDoc>,
    pub options: Vec<OptionDoc>,
    /// Editor-owned from here on: initialized empty, never synced again.
    pub collection: Option<Value>,
    pub categories: Vec<Value>,
    #[serde(rename = "type")]
    pub type_ref: Option<Value>,
    pub tags: Vec<String>,
    pub specs: Vec<SpecBlock>,
    pub seo: SeoBlock,
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub external_id: Option<String>,
}

/// Sync-owned fields for the update path, before the editor-field merge.
///
/// Unlike [`ProductDoc`] this carries no identity (the patch targets a
/// document id) and no editor-owned fields — those are copied in from the
/// existing document by [`crate::merge::ProtectedFields::apply`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPatch {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub handle: Option<Slug>,
    pub status: String,
    pub material: Option<String>,
    pub origin_country: Option<String>,
    pub hs_code: Option<String>,
    pub mid_code: Option<String>,
    pub discountable: bool,
    pub is_giftcard: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageRef>,
    pub variants: Vec<VariantDoc>,
    pub options: Vec<OptionDoc>,
    pub tags: Vec<String>,
    pub specs: Vec<SpecBlock>,
    pub seo: SeoBlock,
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub external_id: Option<String>,
}

/// A variant entry inside a product document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantDoc {
    #[serde(rename = "_type")]
    pub type_tag: String,
    /// Array item key; the commerce variant id keeps patches stable.
    #[serde(rename = "_key")]
    pub key: String,
    pub title: String,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub ean: Option<String>,
    pub upc: Option<String>,
    pub allow_backorder: bool,
    pub manage_inventory: bool,
    pub requires_shipping: bool,
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub hs_code: Option<String>,
    pub origin_country: Option<String>,
    pub mid_code: Option<String>,
    pub material: Option<String>,
    pub options: Vec<VariantOptionDoc>,
}

/// One option assignment inside a [`VariantDoc`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantOptionDoc {
    #[serde(rename = "_type")]
    pub type_tag: String,
    #[serde(rename = "_key")]
    pub key: String,
    /// Display title of the parent option, falling back to its id.
    pub option: String,
    pub value: Option<String>,
}

/// An option entry inside a product document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDoc {
    #[serde(rename = "_type")]
    pub type_tag: String,
    #[serde(rename = "_key")]
    pub key: String,
    pub title: Option<String>,
    pub values: Vec<String>,
}

/// Derived single-entry content block built from title + description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecBlock {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub type_tag: String,
    pub title: Option<String>,
    pub lang: String,
    pub content: String,
}

/// SEO block; source metadata overrides win over title/description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoBlock {
    #[serde(rename = "_type")]
    pub type_tag: String,
    #[serde(rename = "metaTitle")]
    pub meta_title: Option<String>,
    #[serde(rename = "metaDescription")]
    pub meta_description: Option<String>,
    pub keywords: Vec<String>,
}

/// A `set`-only patch as accepted by the mutation endpoint.
///
/// Fields not present in `set` are left untouched by the store's patch
/// semantics, which is what allows the update path to never mention
/// editor-owned fields it has nothing to say about.
#[derive(Debug, Clone, Serialize)]
pub struct PatchSet {
    pub set: Map<String, Value>,
}
