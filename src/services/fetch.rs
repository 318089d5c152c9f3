//! Remote object fetch
//!
//! The monthly archive is a single object in a storage bucket. Fetching is
//! behind [`ObjectSource`] so the pipeline can run against anything that can
//! drop a file on disk; [`S3ObjectSource`] is the production implementation.

use std::path::Path;

use aws_sdk_s3::error::DisplayErrorContext;
use tracing::info;

use crate::error::{CostSplitError, CostSplitResult};

/// Something that can copy a remote object to a local file
pub trait ObjectSource {
    /// Download `key` from `bucket` into `dest`, overwriting it
    fn fetch(&self, bucket: &str, key: &str, dest: &Path) -> CostSplitResult<()>;
}

/// Fetches objects from Amazon S3 using the ambient AWS credentials
///
/// Credentials and region come from the default provider chain
/// (environment, shared config files, instance metadata).
#[derive(Debug, Default, Clone, Copy)]
pub struct S3ObjectSource;

impl S3ObjectSource {
    pub fn new() -> Self {
        Self
    }

    async fn download(bucket: &str, key: &str, dest: &Path) -> CostSplitResult<()> {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = aws_sdk_s3::Client::new(&config);

        let object = client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                CostSplitError::Fetch(format!(
                    "s3://{}/{}: {}",
                    bucket,
                    key,
                    DisplayErrorContext(&e)
                ))
            })?;

        let body = object.body.collect().await.map_err(|e| {
            CostSplitError::Fetch(format!("s3://{}/{}: {}", bucket, key, e))
        })?;

        std::fs::write(dest, body.into_bytes()).map_err(|e| {
            CostSplitError::Io(format!("Failed to write {}: {}", dest.display(), e))
        })
    }
}

impl ObjectSource for S3ObjectSource {
    fn fetch(&self, bucket: &str, key: &str, dest: &Path) -> CostSplitResult<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CostSplitError::Fetch(format!("Failed to start runtime: {}", e)))?;

        runtime.block_on(Self::download(bucket, key, dest))?;
        info!(bucket, key, dest = %dest.display(), "downloaded archive");
        Ok(())
    }
}
