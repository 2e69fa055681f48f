use crate::{
    config::StorageConfig,
    error::{ApiError, Result},
};
use aws_config::Region;
use aws_credential_types::Credentials;
use aws_sdk_s3::{config::Builder as S3ConfigBuilder, primitives::ByteStream, Client as S3Client};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Resume thumbnail storage backed by an S3-compatible bucket.
pub struct StorageService {
    client: S3Client,
    bucket_name: String,
    endpoint_url: String,
    public_base_url: Option<String>,
}

impl StorageService {
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "StaticStorage",
        );

        let s3_config = S3ConfigBuilder::new()
            .region(Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint_url)
            .credentials_provider(credentials)
            .force_path_style(true)
            .behavior_version_latest()
            .build();

        let client = S3Client::from_conf(s3_config);

        info!(
            "StorageService initialized with bucket: {}, region: {}",
            config.bucket_name, config.region
        );

        Ok(Self {
            client,
            bucket_name: config.bucket_name.clone(),
            endpoint_url: config.endpoint_url.clone(),
            public_base_url: config.public_base_url.clone(),
        })
    }

    /// Upload thumbnail bytes and return the permanent URL.
    #[instrument(skip(self, image_data))]
    pub async fn upload_thumbnail(
        &self,
        image_data: Vec<u8>,
        content_type: &str,
        user_id: Uuid,
    ) -> Result<String> {
        let file_id = Uuid::now_v7();
        let extension = match content_type {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        };
        let key = format!("thumbnails/{}/{}.{}", user_id, file_id, extension);

        info!("Uploading thumbnail: {} ({} bytes)", key, image_data.len());

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&key)
            .body(ByteStream::from(image_data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to upload thumbnail: {}", e);
                ApiError::Internal(anyhow::anyhow!("Failed to upload thumbnail: {}", e))
            })?;

        let permanent_url = if let Some(base_url) = &self.public_base_url {
            format!("{}/{}", base_url, key)
        } else {
            format!("{}/{}/{}", self.endpoint_url, self.bucket_name, key)
        };

        info!("Thumbnail uploaded: {}", permanent_url);

        Ok(permanent_url)
    }

    /// Extract the object key from a permanent URL.
    pub fn extract_key_from_url(&self, url: &str) -> Option<String> {
        if let Some(base_url) = &self.public_base_url {
            url.strip_prefix(&format!("{}/", base_url))
                .map(|s| s.to_string())
        } else {
            url.split(&format!("{}/", self.bucket_name))
                .nth(1)
                .map(|s| s.to_string())
        }
    }

    /// Delete a stored thumbnail, used when a replacement upload makes the
    /// old object unreachable. Missing objects are not an error.
    #[instrument(skip(self))]
    pub async fn delete_thumbnail(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to delete thumbnail: {}", e);
                ApiError::Internal(anyhow::anyhow!("Failed to delete thumbnail: {}", e))
            })?;

        info!("Thumbnail deleted: {}", key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_service(public_base_url: Option<String>) -> StorageService {
        StorageService::new(&StorageConfig {
            access_key_id: "test-access-key".to_string(),
            secret_access_key: "test-secret-key".to_string(),
            region: "auto".to_string(),
            endpoint_url: "https://account.example-storage.com".to_string(),
            bucket_name: "careerforge".to_string(),
            public_base_url,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_extract_key_from_public_url() {
        let service = test_service(Some("https://cdn.example.com".to_string())).await;

        let key = service
            .extract_key_from_url("https://cdn.example.com/thumbnails/user-1/file-1.png");
        assert_eq!(key.as_deref(), Some("thumbnails/user-1/file-1.png"));
    }

    #[tokio::test]
    async fn test_extract_key_from_bucket_url() {
        let service = test_service(None).await;

        let key = service.extract_key_from_url(
            "https://account.example-storage.com/careerforge/thumbnails/user-1/file-1.png",
        );
        assert_eq!(key.as_deref(), Some("thumbnails/user-1/file-1.png"));
    }

    #[tokio::test]
    async fn test_extract_key_from_foreign_url() {
        let service = test_service(Some("https://cdn.example.com".to_string())).await;

        let key = service.extract_key_from_url("https://elsewhere.example.com/thumbnails/a.png");
        assert_eq!(key, None);
    }
}
