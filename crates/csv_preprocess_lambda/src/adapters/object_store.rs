use thiserror::Error;

pub const CSV_CONTENT_TYPE: &str = "text/csv";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("object {bucket}/{key} not found: {message}")]
    NotFound {
        bucket: String,
        key: String,
        message: String,
    },
    #[error("access denied to {bucket}/{key}: {message}")]
    AccessDenied {
        bucket: String,
        key: String,
        message: String,
    },
    #[error("request for {bucket}/{key} failed: {message}")]
    Request {
        bucket: String,
        key: String,
        message: String,
    },
}

/// Whole-object reads and overwriting writes against a bucketed store.
pub trait ObjectStore {
    fn read_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;

    fn write_object(
        &self,
        bucket: &str,
        key: &str,
        body: &[u8],
        content_type: &str,
    ) -> Result<(), StoreError>;
}
