//! Product transforms: commerce record → content-store payload.
//!
//! Two variants: a full document for the create path and a `set` patch for
//! the update path. The field construction itself is pure and
//! synchronous; the async wrappers on [`SyncService`] add the network
//! edges (media uploads, existing-document fetch for the merge).
//!
//! ## Default policy
//!
//! Absent or falsy descriptive scalars (empty string, zero) become
//! explicit `null`; flags get fixed defaults (`discountable`,
//! `manage_inventory`, `requires_shipping` → `true`; `allow_backorder`,
//! `is_giftcard` → `false`); arrays become `[]`, never `null`.

use serde_json::{Map, Value};

use cmsync_core::{Product, ProductOption, ProductVariant, VariantOption};

use crate::service::{DocumentKind, SyncService};
use crate::types::{
    ImageRef, OptionDoc, PatchSet, ProductDoc, ProductPatch, SeoBlock, Slug, SpecBlock,
    VariantDoc, VariantOptionDoc,
};

impl SyncService {
    /// Builds the full create payload, uploading thumbnail and gallery
    /// images along the way.
    pub(crate) async fn transform_product_for_create(&self, product: &Product) -> ProductDoc {
        tracing::info!(
            product_id = %product.id,
            title = product.title.as_deref().unwrap_or_default(),
            "transforming product for create"
        );
        let (thumbnail, images) = self.upload_product_media(product).await;
        build_create_doc(
            self.type_name(DocumentKind::Product),
            product,
            thumbnail,
            images,
        )
    }

    /// Builds the update patch: sync-owned fields plus re-uploaded media,
    /// with editor-owned fields of the existing document copied back over
    /// the result.
    ///
    /// A failed fetch of the existing document is treated as "no existing
    /// document" — the patch then goes out unmerged, which is only ever
    /// hit when the earlier existence probe and this fetch disagree.
    pub(crate) async fn transform_product_for_update(&self, product: &Product) -> PatchSet {
        tracing::info!(
            product_id = %product.id,
            title = product.title.as_deref().unwrap_or_default(),
            "transforming product for update"
        );

        let existing = self.client.get_document(&product.id).await.ok().flatten();

        // Media are re-uploaded unconditionally; no diffing against the
        // previous assets.
        let (thumbnail, images) = self.upload_product_media(product).await;
        let patch = build_patch(product, thumbnail, images);

        let mut set = match serde_json::to_value(&patch) {
            Ok(Value::Object(map)) => map,
            // A struct with named fields always serializes to an object.
            Ok(_) | Err(_) => Map::new(),
        };

        if let Some(existing) = &existing {
            self.protected.apply(existing, &mut set);
            tracing::info!(
                product_id = %product.id,
                "preserved editor-owned fields from existing document"
            );
        }

        PatchSet { set }
    }

    /// Uploads the thumbnail and gallery images, in source order.
    ///
    /// Sequential on purpose: the gallery must preserve source ordering,
    /// and failed uploads simply drop out of the list.
    async fn upload_product_media(&self, product: &Product) -> (Option<ImageRef>, Vec<ImageRef>) {
        let handle = product.handle.as_deref().unwrap_or_default();

        let mut thumbnail = None;
        if let Some(url) = &product.thumbnail {
            thumbnail = self
                .client
                .upload_image_from_url(url, Some(&format!("{handle}-thumb")))
                .await;
        }

        let mut images = Vec::new();
        for (index, image) in product.images.iter().enumerate() {
            let filename = format!("{handle}-{}", index + 1);
            if let Some(reference) = self
                .client
                .upload_image_from_url(&image.url, Some(&filename))
                .await
            {
                images.push(reference);
            }
        }

        (thumbnail, images)
    }
}

/// Full create payload. Editor-owned references start empty; media are
/// seeded from the source exactly once, here.
pub(crate) fn build_create_doc(
    type_name: &str,
    product: &Product,
    thumbnail: Option<ImageRef>,
    images: Vec<ImageRef>,
) -> ProductDoc {
    ProductDoc {
        type_name: type_name.to_string(),
        id: product.id.clone(),
        title: product.title.clone().unwrap_or_default(),
        subtitle: none_if_empty(&product.subtitle),
        description: none_if_empty(&product.description),
        handle: slug_of(product),
        status: status_of(product),
        material: none_if_empty(&product.material),
        origin_country: none_if_empty(&product.origin_country),
        hs_code: none_if_empty(&product.hs_code),
        mid_code: none_if_empty(&product.mid_code),
        discountable: product.discountable.unwrap_or(true),
        is_giftcard: product.is_giftcard.unwrap_or(false),
        thumbnail,
        images,
        variants: product.variants.iter().map(variant_doc).collect(),
        options: product.options.iter().map(option_doc).collect(),
        collection: None,
        categories: Vec::new(),
        type_ref: None,
        tags: tag_values(product),
        specs: spec_blocks(product),
        seo: seo_block(product),
        weight: non_zero(product.weight),
        length: non_zero(product.length),
        height: non_zero(product.height),
        width: non_zero(product.width),
        external_id: none_if_empty(&product.external_id),
    }
}

/// Sync-owned fields for the update path. Media keys are only present when
/// an upload actually produced something.
pub(crate) fn build_patch(
    product: &Product,
    thumbnail: Option<ImageRef>,
    images: Vec<ImageRef>,
) -> ProductPatch {
    ProductPatch {
        title: product.title.clone().unwrap_or_default(),
        subtitle: none_if_empty(&product.subtitle),
        description: none_if_empty(&product.description),
        handle: slug_of(product),
        status: status_of(product),
        material: none_if_empty(&product.material),
        origin_country: none_if_empty(&product.origin_country),
        hs_code: none_if_empty(&product.hs_code),
        mid_code: none_if_empty(&product.mid_code),
        discountable: product.discountable.unwrap_or(true),
        is_giftcard: product.is_giftcard.unwrap_or(false),
        thumbnail,
        images,
        variants: product.variants.iter().map(variant_doc).collect(),
        options: product.options.iter().map(option_doc).collect(),
        tags: tag_values(product),
        specs: spec_blocks(product),
        seo: seo_block(product),
        weight: non_zero(product.weight),
        length: non_zero(product.length),
        height: non_zero(product.height),
        width: non_zero(product.width),
        external_id: none_if_empty(&product.external_id),
    }
}

fn variant_doc(variant: &ProductVariant) -> VariantDoc {
    VariantDoc {
        type_tag: "object".to_string(),
        key: variant.id.clone(),
        title: variant.title.clone().unwrap_or_default(),
        sku: none_if_empty(&variant.sku),
        barcode: none_if_empty(&variant.barcode),
        ean: none_if_empty(&variant.ean),
        upc: none_if_empty(&variant.upc),
        allow_backorder: variant.allow_backorder.unwrap_or(false),
        manage_inventory: variant.manage_inventory.unwrap_or(true),
        requires_shipping: variant.requires_shipping.unwrap_or(true),
        weight: non_zero(variant.weight),
        length: non_zero(variant.length),
        height: non_zero(variant.height),
        width: non_zero(variant.width),
        hs_code: none_if_empty(&variant.hs_code),
        origin_country: none_if_empty(&variant.origin_country),
        mid_code: none_if_empty(&variant.mid_code),
        material: none_if_empty(&variant.material),
        options: variant.options.iter().map(variant_option_doc).collect(),
    }
}

fn variant_option_doc(option: &VariantOption) -> VariantOptionDoc {
    let label = option
        .option
        .as_ref()
        .and_then(|parent| none_if_empty(&parent.title))
        .or_else(|| none_if_empty(&option.option_id))
        .unwrap_or_default();
    VariantOptionDoc {
        type_tag: "object".to_string(),
        key: option.id.clone(),
        option: label,
        value: option.value.clone(),
    }
}

fn option_doc(option: &ProductOption) -> OptionDoc {
    OptionDoc {
        type_tag: "object".to_string(),
        key: option.id.clone(),
        title: option.title.clone(),
        values: option
            .values
            .iter()
            .filter_map(|v| v.value.clone())
            .collect(),
    }
}

fn tag_values(product: &Product) -> Vec<String> {
    product
        .tags
        .iter()
        .filter_map(|tag| tag.value.clone())
        .collect()
}

/// Single derived spec entry keyed by the product id.
fn spec_blocks(product: &Product) -> Vec<SpecBlock> {
    vec![SpecBlock {
        key: product.id.clone(),
        type_tag: "spec".to_string(),
        title: product.title.clone(),
        lang: "en".to_string(),
        content: product.description.clone().unwrap_or_default(),
    }]
}

fn seo_block(product: &Product) -> SeoBlock {
    SeoBlock {
        type_tag: "object".to_string(),
        meta_title: metadata_string(product, "meta_title").or_else(|| none_if_empty(&product.title)),
        meta_description: metadata_string(product, "meta_description")
            .or_else(|| none_if_empty(&product.description)),
        keywords: metadata_keywords(product),
    }
}

fn metadata_string(product: &Product, key: &str) -> Option<String> {
    product
        .metadata
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn metadata_keywords(product: &Product) -> Vec<String> {
    product
        .metadata
        .get("keywords")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn slug_of(product: &Product) -> Option<Slug> {
    none_if_empty(&product.handle).map(Slug::new)
}

fn status_of(product: &Product) -> String {
    none_if_empty(&product.status).unwrap_or_else(|| "draft".to_string())
}

/// Empty strings count as absent, mirroring the falsy-to-null policy.
fn none_if_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Zero counts as absent for the nullable dimension fields.
#[allow(clippy::float_cmp)]
fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|n| *n != 0.0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use cmsync_core::product::{
        ProductImage, ProductOptionValue, ProductTag, VariantOptionParent,
    };

    use super::*;

    fn base_product() -> Product {
        Product {
            id: "prod_1".to_string(),
            title: Some("Medusa T-Shirt".to_string()),
            handle: Some("medusa-t-shirt".to_string()),
            description: Some("A comfy tee".to_string()),
            ..Product::default()
        }
    }

    #[test]
    fn create_doc_seeds_protected_fields_with_creation_defaults() {
        let doc = build_create_doc("product", &base_product(), None, Vec::new());
        assert!(doc.type_ref.is_none());
        assert!(doc.collection.is_none());
        assert!(doc.categories.is_empty());
    }

    #[test]
    fn create_doc_uses_commerce_id_as_document_identity() {
        let doc = build_create_doc("product", &base_product(), None, Vec::new());
        assert_eq!(doc.id, "prod_1");
        assert_eq!(doc.type_name, "product");
    }

    #[test]
    fn create_doc_serializes_protected_defaults_as_null_and_empty() {
        let doc = build_create_doc("product", &base_product(), None, Vec::new());
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["type"], json!(null));
        assert_eq!(value["collection"], json!(null));
        assert_eq!(value["categories"], json!([]));
        assert_eq!(value["thumbnail"], json!(null));
        assert_eq!(value["images"], json!([]));
    }

    #[test]
    fn variant_flag_defaults_match_the_documented_policy() {
        let variant = ProductVariant {
            id: "variant_1".to_string(),
            ..ProductVariant::default()
        };
        let doc = variant_doc(&variant);
        assert!(!doc.allow_backorder);
        assert!(doc.manage_inventory);
        assert!(doc.requires_shipping);
    }

    #[test]
    fn explicit_variant_flags_are_respected() {
        let variant = ProductVariant {
            id: "variant_1".to_string(),
            allow_backorder: Some(true),
            ..ProductVariant::default()
        };
        assert!(variant_doc(&variant).allow_backorder);
    }

    #[test]
    fn falsy_scalars_become_explicit_null() {
        let mut product = base_product();
        product.subtitle = Some(String::new());
        product.material = None;
        product.weight = Some(0.0);
        let doc = build_create_doc("product", &product, None, Vec::new());
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["subtitle"], json!(null));
        assert_eq!(value["material"], json!(null));
        assert_eq!(value["weight"], json!(null));
    }

    #[test]
    fn status_defaults_to_draft() {
        let mut product = base_product();
        product.status = None;
        assert_eq!(status_of(&product), "draft");
        product.status = Some("published".to_string());
        assert_eq!(status_of(&product), "published");
    }

    #[test]
    fn handle_becomes_a_slug_structure() {
        let doc = build_create_doc("product", &base_product(), None, Vec::new());
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value["handle"],
            json!({ "_type": "slug", "current": "medusa-t-shirt" })
        );
    }

    #[test]
    fn missing_handle_is_null_not_omitted() {
        let mut product = base_product();
        product.handle = None;
        let value = serde_json::to_value(build_create_doc("product", &product, None, Vec::new()))
            .unwrap();
        assert!(value.as_object().unwrap().contains_key("handle"));
        assert_eq!(value["handle"], json!(null));
    }

    #[test]
    fn update_patch_omits_media_keys_when_nothing_was_uploaded() {
        let patch = build_patch(&base_product(), None, Vec::new());
        let value = serde_json::to_value(&patch).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("thumbnail"));
        assert!(!object.contains_key("images"));
    }

    #[test]
    fn update_patch_includes_uploaded_media() {
        let thumbnail = ImageRef::from_asset_id("image-thumb-1".to_string());
        let images = vec![ImageRef::from_asset_id("image-1".to_string())];
        let patch = build_patch(&base_product(), Some(thumbnail), images);
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            value["thumbnail"]["asset"]["_ref"],
            json!("image-thumb-1")
        );
        assert_eq!(value["images"][0]["asset"]["_ref"], json!("image-1"));
    }

    #[test]
    fn update_patch_never_mentions_editor_owned_references() {
        let patch = build_patch(&base_product(), None, Vec::new());
        let value = serde_json::to_value(&patch).unwrap();
        let object = value.as_object().unwrap();
        for field in ["type", "collection", "categories"] {
            assert!(!object.contains_key(field), "{field} must not be patched");
        }
    }

    #[test]
    fn transform_is_idempotent_for_unchanged_input() {
        let product = base_product();
        let first = serde_json::to_value(build_patch(&product, None, Vec::new())).unwrap();
        let second = serde_json::to_value(build_patch(&product, None, Vec::new())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn spec_block_derives_from_title_and_description() {
        let blocks = spec_blocks(&base_product());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].key, "prod_1");
        assert_eq!(blocks[0].lang, "en");
        assert_eq!(blocks[0].title.as_deref(), Some("Medusa T-Shirt"));
        assert_eq!(blocks[0].content, "A comfy tee");
    }

    #[test]
    fn seo_metadata_overrides_win_over_title_and_description() {
        let mut product = base_product();
        product
            .metadata
            .insert("meta_title".to_string(), json!("SEO Title"));
        product
            .metadata
            .insert("keywords".to_string(), json!(["tee", "cotton"]));
        let seo = seo_block(&product);
        assert_eq!(seo.meta_title.as_deref(), Some("SEO Title"));
        assert_eq!(seo.meta_description.as_deref(), Some("A comfy tee"));
        assert_eq!(seo.keywords, vec!["tee", "cotton"]);
    }

    #[test]
    fn seo_falls_back_to_null_when_nothing_is_available() {
        let mut product = base_product();
        product.title = None;
        product.description = None;
        let seo = seo_block(&product);
        assert!(seo.meta_title.is_none());
        assert!(seo.meta_description.is_none());
        assert!(seo.keywords.is_empty());
    }

    #[test]
    fn variant_option_label_falls_back_from_title_to_option_id() {
        let with_title = VariantOption {
            id: "vo_1".to_string(),
            value: Some("M".to_string()),
            option_id: Some("opt_size".to_string()),
            option: Some(VariantOptionParent {
                title: Some("Size".to_string()),
            }),
        };
        assert_eq!(variant_option_doc(&with_title).option, "Size");

        let without_title = VariantOption {
            id: "vo_2".to_string(),
            value: Some("M".to_string()),
            option_id: Some("opt_size".to_string()),
            option: None,
        };
        assert_eq!(variant_option_doc(&without_title).option, "opt_size");

        let bare = VariantOption {
            id: "vo_3".to_string(),
            ..VariantOption::default()
        };
        assert_eq!(variant_option_doc(&bare).option, "");
    }

    #[test]
    fn tags_and_option_values_flatten_to_plain_strings() {
        let mut product = base_product();
        product.tags = vec![
            ProductTag {
                id: Some("tag_1".to_string()),
                value: Some("summer".to_string()),
            },
            ProductTag {
                id: Some("tag_2".to_string()),
                value: None,
            },
        ];
        product.options = vec![ProductOption {
            id: "opt_1".to_string(),
            title: Some("Size".to_string()),
            values: vec![
                ProductOptionValue {
                    value: Some("S".to_string()),
                },
                ProductOptionValue {
                    value: Some("M".to_string()),
                },
            ],
        }];
        let doc = build_create_doc("product", &product, None, Vec::new());
        assert_eq!(doc.tags, vec!["summer"]);
        assert_eq!(doc.options[0].values, vec!["S", "M"]);
    }

    #[test]
    fn gallery_images_keep_source_order() {
        let mut product = base_product();
        product.images = vec![
            ProductImage {
                id: None,
                url: "https://cdn.example.com/a.png".to_string(),
            },
            ProductImage {
                id: None,
                url: "https://cdn.example.com/b.png".to_string(),
            },
        ];
        let images = vec![
            ImageRef::from_asset_id("image-a".to_string()),
            ImageRef::from_asset_id("image-b".to_string()),
        ];
        let doc = build_create_doc("product", &product, None, images);
        assert_eq!(doc.images[0].asset.asset_id, "image-a");
        assert_eq!(doc.images[1].asset.asset_id, "image-b");
    }
}
