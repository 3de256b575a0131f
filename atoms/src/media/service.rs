use async_trait::async_trait;

use super::model::{ImageAttachment, ImageRef, UploadPart, UploadPayload, UploadResponse};
use crate::error::SurveyError;

const DEFAULT_EXTENSION: &str = "jpg";

/// Remote image store receiving one multipart payload per section.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload_images_payload(&self, payload: UploadPayload) -> Result<UploadResponse, SurveyError>;
}

/// Package the images of one section. Part `i` is named `{section_key}_{i}`.
pub fn build_upload_payload(images: &[ImageAttachment], section_key: &str) -> UploadPayload {
    let parts = images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            let name = format!("{}_{}", section_key, index);
            let file_name = format!("{}.{}", name, extension_for(&image.uri));
            let content_type = mime_guess::from_path(&file_name)
                .first_or_octet_stream()
                .to_string();
            UploadPart {
                name,
                file_name,
                content_type,
                uri: image.uri.clone(),
            }
        })
        .collect();

    UploadPayload {
        section_key: section_key.to_string(),
        parts,
    }
}

/// Upload the images of one section and return their blob identifiers.
///
/// `result[i]` belongs to `images[i]`. Never fails: an upload error, or a
/// response that does not account for every image, is logged and the section
/// ends up with no images.
pub async fn upload_images<U: ImageUploader + ?Sized>(
    uploader: &U,
    images: &[ImageAttachment],
    section_key: &str,
) -> Vec<String> {
    if images.is_empty() {
        return Vec::new();
    }

    let payload = build_upload_payload(images, section_key);

    tracing::info!("📤 uploading {} image(s) for section={}", images.len(), section_key);

    let response = match uploader.upload_images_payload(payload).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("❌ upload_images failed: section={}, error={}", section_key, e);
            return Vec::new();
        }
    };

    if response.urls.len() != images.len() {
        tracing::error!(
            "❌ upload_images got {} url(s) for {} image(s): section={}",
            response.urls.len(),
            images.len(),
            section_key
        );
        return Vec::new();
    }

    let blob_ids: Option<Vec<String>> = response.urls.iter().map(|url| blob_id_from_url(url)).collect();
    match blob_ids {
        Some(ids) => {
            tracing::info!("✅ upload_images success: section={}, blobs={:?}", section_key, ids);
            ids
        }
        None => {
            tracing::error!("❌ upload_images returned unusable urls: section={}, urls={:?}", section_key, response.urls);
            Vec::new()
        }
    }
}

/// Trailing path segment of a remote URL, without query or fragment.
pub fn blob_id_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Attach confirmed blob identifiers to their images, by position.
pub fn confirm_uploads(images: &[ImageAttachment], blob_ids: &[String]) -> Vec<ImageAttachment> {
    images
        .iter()
        .zip(blob_ids)
        .map(|(image, blob_id)| ImageAttachment {
            blob_name: Some(blob_id.clone()),
            ..image.clone()
        })
        .collect()
}

/// References for the attachments whose upload was confirmed.
pub fn image_refs(images: &[ImageAttachment]) -> Vec<ImageRef> {
    images
        .iter()
        .filter_map(|image| {
            image.blob_name.as_ref().map(|blob_name| ImageRef {
                blob_name: blob_name.clone(),
                is_landscape: image.is_landscape,
            })
        })
        .collect()
}

fn extension_for(uri: &str) -> String {
    // data:image/png;base64,....
    if let Some(rest) = uri.strip_prefix("data:") {
        let mime = rest.split([';', ',']).next().unwrap_or_default();
        return match mime.strip_prefix("image/") {
            Some("jpeg") | None => DEFAULT_EXTENSION.to_string(),
            Some(subtype) if !subtype.is_empty() => subtype.to_ascii_lowercase(),
            Some(_) => DEFAULT_EXTENSION.to_string(),
        };
    }

    let path = uri.split(['?', '#']).next().unwrap_or_default();
    let file = path.rsplit('/').next().unwrap_or_default();
    match file.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= 5
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => DEFAULT_EXTENSION.to_string(),
    }
}
