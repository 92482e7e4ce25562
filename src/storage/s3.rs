//! S3 blob store (AWS or LocalStack)

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client as S3Client;
use tracing::debug;

use super::{BlobStore, StoreError, StoreResult};
use crate::config::S3Config;

/// Blob store backed by S3 buckets
pub struct S3BlobStore {
    client: S3Client,
    region: String,
}

impl S3BlobStore {
    /// Create a new store. No request is made until the first operation.
    pub async fn new(config: &S3Config) -> Self {
        let sdk_config = Self::build_aws_config(config).await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        Self {
            client: S3Client::from_conf(s3_config),
            region: config.region.clone(),
        }
    }

    /// Build AWS SDK configuration with optional custom endpoint and credentials
    async fn build_aws_config(config: &S3Config) -> aws_config::SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        match (&config.access_key_id, &config.secret_access_key) {
            (Some(key_id), Some(secret)) => {
                let credentials = aws_sdk_s3::config::Credentials::new(
                    key_id.clone(),
                    secret.clone(),
                    None, // session token
                    None, // expiry
                    "budget-squad",
                );
                loader = loader.credentials_provider(credentials);
                debug!("S3 store using explicit credentials");
            }
            _ => debug!("S3 store using default credential chain"),
        }

        loader.load().await
    }

    fn unavailable<E>(action: &str, container: &str, err: E) -> StoreError
    where
        E: std::error::Error,
    {
        StoreError::Unavailable(format!(
            "Failed to {} in bucket '{}': {}",
            action,
            container,
            DisplayErrorContext(err)
        ))
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn get(&self, container: &str, key: &str) -> StoreResult<String> {
        let output = match self
            .client
            .get_object()
            .bucket(container)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                if e.as_service_error().map(|se| se.is_no_such_key()).unwrap_or(false) {
                    return Err(StoreError::not_found(container, key));
                }
                return Err(Self::unavailable("read object", container, e));
            }
        };

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| Self::unavailable("read object body", container, e))?;

        String::from_utf8(body.into_bytes().to_vec()).map_err(|e| {
            StoreError::Unavailable(format!("Object '{}' contains invalid UTF-8: {}", key, e))
        })
    }

    async fn put(&self, container: &str, key: &str, text: &str) -> StoreResult<()> {
        self.client
            .put_object()
            .bucket(container)
            .key(key)
            .body(text.to_string().into_bytes().into())
            .content_type("text/plain")
            .send()
            .await
            .map_err(|e| Self::unavailable("write object", container, e))?;

        debug!(bucket = container, key, bytes = text.len(), "object written");
        Ok(())
    }

    fn uri(&self, container: &str, key: &str) -> String {
        format!("s3://{}/{}", container, key)
    }

    async fn container_exists(&self, container: &str) -> bool {
        self.client
            .head_bucket()
            .bucket(container)
            .send()
            .await
            .is_ok()
    }

    async fn create_container(&self, container: &str) -> StoreResult<()> {
        let mut request = self.client.create_bucket().bucket(container);

        // us-east-1 rejects an explicit location constraint
        if self.region != "us-east-1" {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                    .build(),
            );
        }

        request
            .send()
            .await
            .map_err(|e| Self::unavailable("create bucket", container, e))?;
        Ok(())
    }
}
