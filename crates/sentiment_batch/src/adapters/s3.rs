use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::adapters::object_store::{ObjectListing, ObjectSource, OutcomeStore};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Reads objects from one bucket. Listing is a single `ListObjectsV2` page.
#[derive(Debug, Clone)]
pub struct S3ObjectSource {
    bucket: String,
    s3_client: aws_sdk_s3::Client,
}

impl S3ObjectSource {
    pub fn new(bucket: impl Into<String>, s3_client: aws_sdk_s3::Client) -> Self {
        Self {
            bucket: bucket.into(),
            s3_client,
        }
    }
}

impl ObjectSource for S3ObjectSource {
    fn list_keys(&self) -> Result<ObjectListing, String> {
        let bucket = self.bucket.clone();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .list_objects_v2()
                    .bucket(bucket)
                    .send()
                    .await
                    .map_err(|error| {
                        format!(
                            "failed to list objects in s3: {}",
                            DisplayErrorContext(&error)
                        )
                    })?;

                Ok::<_, String>(ObjectListing {
                    keys: output
                        .contents()
                        .iter()
                        .filter_map(|object| object.key().map(str::to_string))
                        .collect(),
                    truncated: output.is_truncated().unwrap_or(false),
                })
            })
        })
    }

    fn read_object(&self, key: &str) -> Result<Vec<u8>, String> {
        let bucket = self.bucket.clone();
        let object_key = key.to_string();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .get_object()
                    .bucket(bucket)
                    .key(object_key)
                    .send()
                    .await
                    .map_err(|error| {
                        format!("failed to read object from s3: {}", DisplayErrorContext(&error))
                    })?;

                output
                    .body
                    .collect()
                    .await
                    .map(|data| data.into_bytes().to_vec())
                    .map_err(|error| format!("failed to read object body from s3: {error}"))
            })
        })
    }
}

/// Writes JSON result objects into one bucket, overwriting existing keys.
#[derive(Debug, Clone)]
pub struct S3OutcomeStore {
    bucket: String,
    s3_client: aws_sdk_s3::Client,
}

impl S3OutcomeStore {
    pub fn new(bucket: impl Into<String>, s3_client: aws_sdk_s3::Client) -> Self {
        Self {
            bucket: bucket.into(),
            s3_client,
        }
    }
}

impl OutcomeStore for S3OutcomeStore {
    fn write_object(&self, key: &str, body: &[u8]) -> Result<(), String> {
        let bucket = self.bucket.clone();
        let object_key = key.to_string();
        let body_bytes = body.to_vec();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(object_key)
                    .content_type(JSON_CONTENT_TYPE)
                    .body(ByteStream::from(body_bytes))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| {
                        format!("failed to write object to s3: {}", DisplayErrorContext(&error))
                    })
            })
        })
    }
}
