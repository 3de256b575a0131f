use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hazard_atoms::media::{ImageUploader, UploadPayload, UploadResponse};
use hazard_atoms::SurveyError;

/// Risk-note pictures stored as S3 objects under
/// "{key_prefix}/{uuid}-{file_name}".
pub struct S3ImageStore {
    client: S3Client,
    bucket: String,
    public_base_url: String,
    key_prefix: String,
}

impl S3ImageStore {
    pub fn new(client: S3Client, bucket: &str, public_base_url: &str, key_prefix: &str) -> Self {
        Self {
            client,
            bucket: bucket.to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            key_prefix: key_prefix.trim_matches('/').to_string(),
        }
    }

    fn object_key(&self, file_name: &str) -> String {
        format!("{}/{}-{}", self.key_prefix, uuid::Uuid::new_v4(), file_name)
    }

    /// Store every part, pushing each written key onto `stored`.
    async fn put_parts(&self, payload: &UploadPayload, stored: &mut Vec<String>) -> Result<(), SurveyError> {
        for part in &payload.parts {
            let bytes = read_image(&part.uri)?;
            let key = self.object_key(&part.file_name);

            self.client
                .put_object()
                .bucket(&self.bucket)
                .key(&key)
                .content_type(&part.content_type)
                .body(ByteStream::from(bytes))
                .send()
                .await
                .map_err(|e| SurveyError::Upload(format!("S3 put_object error: {}", e)))?;

            tracing::info!("🖼️ stored {} as s3://{}/{}", part.name, self.bucket, key);
            stored.push(key);
        }
        Ok(())
    }

    /// Remove objects of a section whose upload did not complete.
    async fn discard(&self, keys: &[String]) {
        for key in keys {
            match self.client.delete_object().bucket(&self.bucket).key(key).send().await {
                Ok(_) => tracing::info!("🗑️ discarded s3://{}/{}", self.bucket, key),
                Err(e) => tracing::error!("❌ could not discard orphaned s3://{}/{}: {}", self.bucket, key, e),
            }
        }
    }
}

#[async_trait]
impl ImageUploader for S3ImageStore {
    async fn upload_images_payload(&self, payload: UploadPayload) -> Result<UploadResponse, SurveyError> {
        let mut stored = Vec::with_capacity(payload.parts.len());

        if let Err(e) = self.put_parts(&payload, &mut stored).await {
            tracing::warn!(
                "⚠️ section {} failed after {} object(s): {:?}",
                payload.section_key,
                stored.len(),
                stored
            );
            self.discard(&stored).await;
            return Err(e);
        }

        let urls = stored
            .iter()
            .map(|key| format!("{}/{}", self.public_base_url, key))
            .collect();
        Ok(UploadResponse { urls })
    }
}

/// Decode the bytes of an image sent inline as a `data:` URI.
///
/// Device paths and `file://` URLs are rejected: they name files on the
/// phone, not on this host.
pub fn read_image(uri: &str) -> Result<Vec<u8>, SurveyError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| SurveyError::Upload("images must be sent as data URIs".to_string()))?;
    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| SurveyError::Upload("malformed data URI".to_string()))?;

    if header.ends_with(";base64") {
        STANDARD
            .decode(data.trim())
            .map_err(|e| SurveyError::Upload(format!("invalid base64 image data: {}", e)))
    } else {
        Ok(data.as_bytes().to_vec())
    }
}
