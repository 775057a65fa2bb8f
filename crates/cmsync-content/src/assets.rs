//! Image asset uploads: fetch a remote image and re-upload it into the
//! content store.
//!
//! Asset failures are never fatal. A product whose image host is down
//! still syncs — it just syncs without that image — so every failure path
//! here logs and returns `None` instead of propagating.

use crate::client::ContentStoreClient;
use crate::error::ContentError;
use crate::types::ImageRef;

/// Fallback filename when the source URL yields nothing usable.
const DEFAULT_FILENAME: &str = "image.jpg";

/// Fallback content type when the image response carries no header.
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

impl ContentStoreClient {
    /// Fetches an image from `image_url` and uploads it as a content-store
    /// asset, returning the typed image reference.
    ///
    /// Returns `None` — never an error — when the fetch answers non-2xx,
    /// the download fails mid-body, or the upload itself fails. Each case
    /// is logged with the source URL.
    pub async fn upload_image_from_url(
        &self,
        image_url: &str,
        filename: Option<&str>,
    ) -> Option<ImageRef> {
        match self.fetch_and_upload(image_url, filename).await {
            Ok(reference) => reference,
            Err(err) => {
                tracing::error!(image_url, error = %err, "error uploading image to content store");
                None
            }
        }
    }

    async fn fetch_and_upload(
        &self,
        image_url: &str,
        filename: Option<&str>,
    ) -> Result<Option<ImageRef>, ContentError> {
        let response = self.client.get(image_url).send().await?;
        if !response.status().is_success() {
            tracing::warn!(image_url, status = response.status().as_u16(), "failed to fetch image");
            return Ok(None);
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_owned();
        let bytes = response.bytes().await?;

        let name = match filename {
            Some(name) => name.to_owned(),
            None => filename_from_url(image_url),
        };

        let asset_id = self.upload_asset(bytes.to_vec(), &name, &content_type).await?;
        Ok(Some(ImageRef::from_asset_id(asset_id)))
    }
}

/// Derives a filename from the last path segment of a URL.
///
/// Falls back to [`DEFAULT_FILENAME`] when the URL does not parse or has
/// no usable final segment.
pub(crate) fn filename_from_url(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_owned))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_FILENAME.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_from_url_takes_last_segment() {
        assert_eq!(
            filename_from_url("https://cdn.example.com/media/shirt-front.png"),
            "shirt-front.png"
        );
    }

    #[test]
    fn filename_from_url_ignores_query_string() {
        assert_eq!(
            filename_from_url("https://cdn.example.com/media/shirt.png?w=800&fit=crop"),
            "shirt.png"
        );
    }

    #[test]
    fn filename_from_url_falls_back_on_bare_host() {
        assert_eq!(filename_from_url("https://cdn.example.com"), "image.jpg");
    }

    #[test]
    fn filename_from_url_falls_back_on_unparseable_input() {
        assert_eq!(filename_from_url("not a url at all"), "image.jpg");
    }
}
