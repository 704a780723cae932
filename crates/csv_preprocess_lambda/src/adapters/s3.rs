use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;

use crate::adapters::object_store::{ObjectStore, StoreError};

/// S3-backed store. The client is built once per process and shared by every invocation.
#[derive(Clone)]
pub struct S3ObjectStore {
    s3_client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(s3_client: aws_sdk_s3::Client) -> Self {
        Self { s3_client }
    }
}

impl ObjectStore for S3ObjectStore {
    fn read_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let client = &self.s3_client;

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .get_object()
                    .bucket(bucket)
                    .key(key)
                    .send()
                    .await
                    .map_err(|error| classify_get_error(bucket, key, error))?;

                output
                    .body
                    .collect()
                    .await
                    .map(|data| data.into_bytes().to_vec())
                    .map_err(|error| StoreError::Request {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                        message: format!("failed to read object body: {error}"),
                    })
            })
        })
    }

    fn write_object(
        &self,
        bucket: &str,
        key: &str,
        body: &[u8],
        content_type: &str,
    ) -> Result<(), StoreError> {
        let client = &self.s3_client;
        let body_bytes = body.to_vec();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(key)
                    .content_type(content_type)
                    .body(ByteStream::from(body_bytes))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| StoreError::Request {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                        message: format!(
                            "failed to write object to s3: {}",
                            DisplayErrorContext(&error)
                        ),
                    })
            })
        })
    }
}

fn classify_get_error(
    bucket: &str,
    key: &str,
    error: SdkError<GetObjectError, HttpResponse>,
) -> StoreError {
    let status = error
        .raw_response()
        .map(|response| response.status().as_u16());
    let no_such_key = error
        .as_service_error()
        .is_some_and(GetObjectError::is_no_such_key);
    let bucket = bucket.to_string();
    let key = key.to_string();
    let message = DisplayErrorContext(&error).to_string();

    if no_such_key || status == Some(404) {
        StoreError::NotFound {
            bucket,
            key,
            message,
        }
    } else if status == Some(403) {
        StoreError::AccessDenied {
            bucket,
            key,
            message,
        }
    } else {
        StoreError::Request {
            bucket,
            key,
            message,
        }
    }
}
