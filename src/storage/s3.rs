//! S3-backed blob store

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ServerSideEncryption;
use aws_sdk_s3::Client;
use tracing::debug;

use super::BlobStore;
use crate::config::AwsConfig;
use crate::error::{EnvputError, EnvputResult};

/// Name reported for credentials read from `.envputrc`
const CREDENTIALS_PROVIDER: &str = "envput-config";

/// Stores envelopes as objects in a single bucket
#[derive(Clone, Debug)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Build a client for the configured region
    ///
    /// Uses the credentials from the config when both are present, otherwise
    /// the default AWS chain (environment, shared profile, instance role).
    pub async fn from_config(aws: &AwsConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(aws.region.clone()));

        if aws.has_static_credentials() {
            loader = loader.credentials_provider(Credentials::new(
                aws.access_key_id.clone(),
                aws.secret_access_key.as_str(),
                None,
                None,
                CREDENTIALS_PROVIDER,
            ));
        }

        let sdk_config = loader.load().await;
        debug!(bucket = %aws.bucket, region = %aws.region, "created S3 client");

        Self {
            client: Client::new(&sdk_config),
            bucket: aws.bucket.clone(),
        }
    }
}

/// HTTP status of a service error; `None` for timeouts, dispatch failures, etc.
fn service_status<E>(err: &SdkError<E>) -> Option<u16> {
    match err {
        SdkError::ServiceError(e) => Some(e.raw().status().as_u16()),
        _ => None,
    }
}

/// Only HTTP 404 means the object is missing
fn is_not_found<E>(err: &SdkError<E>) -> bool {
    service_status(err) == Some(404)
}

/// Error for a failed existence check
///
/// Without `s3:ListBucket` S3 answers HEAD on a missing key with 403 rather
/// than 404, so a 403 gets a hint instead of a bare access-denied.
fn check_error(
    location: &str,
    status: Option<u16>,
    detail: impl std::fmt::Display,
) -> EnvputError {
    let mut message = format!("Failed to check {}: {}", location, detail);
    if status == Some(403) {
        message.push_str(
            ". Access denied (HTTP 403): S3 also returns 403 for keys that do not exist \
             when the credentials lack s3:ListBucket on the bucket. Grant s3:ListBucket \
             or check the credentials.",
        );
    }
    EnvputError::StorageTransfer(message)
}

fn transfer_error<E>(action: &str, location: &str, err: E) -> EnvputError
where
    E: std::error::Error,
{
    EnvputError::StorageTransfer(format!(
        "Failed to {} {}: {}",
        action,
        location,
        DisplayErrorContext(err)
    ))
}

#[async_trait]
impl BlobStore for S3Store {
    async fn put(&self, key: &str, data: Vec<u8>) -> EnvputResult<()> {
        let location = self.location(key);
        debug!(%location, bytes = data.len(), "put_object");

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type("application/octet-stream")
            .server_side_encryption(ServerSideEncryption::Aes256)
            .metadata("envput-version", env!("CARGO_PKG_VERSION"))
            .metadata("content-type", "encrypted-env-file")
            .send()
            .await
            .map_err(|e| transfer_error("upload to", &location, e))?;

        Ok(())
    }

    async fn get(&self, key: &str) -> EnvputResult<Vec<u8>> {
        let location = self.location(key);

        if !self.exists(key).await? {
            return Err(EnvputError::StorageNotFound(location));
        }

        debug!(%location, "get_object");
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if is_not_found(&e) {
                    EnvputError::StorageNotFound(location.clone())
                } else {
                    transfer_error("download from", &location, e)
                }
            })?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| transfer_error("read body of", &location, e))?;

        Ok(body.into_bytes().to_vec())
    }

    async fn exists(&self, key: &str) -> EnvputResult<bool> {
        let location = self.location(key);
        debug!(%location, "head_object");

        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => {
                let status = service_status(&e);
                Err(check_error(&location, status, DisplayErrorContext(e)))
            }
        }
    }

    fn location(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_check_mentions_list_bucket() {
        let err = check_error("s3://bucket/myapp/production", Some(403), "AccessDenied");

        assert!(matches!(err, EnvputError::StorageTransfer(_)));
        let message = err.to_string();
        assert!(message.contains("s3://bucket/myapp/production"));
        assert!(message.contains("HTTP 403"));
        assert!(message.contains("s3:ListBucket"));
    }

    #[test]
    fn test_other_check_failures_have_no_hint() {
        for status in [None, Some(500)] {
            let message = check_error("s3://bucket/key", status, "timeout").to_string();
            assert_eq!(message, "Storage error: Failed to check s3://bucket/key: timeout");
        }
    }
}
