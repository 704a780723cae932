use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PROCESSED_MESSAGE: &str = "File processed successfully.";
pub const EMPTY_FILE_MESSAGE: &str = "Empty file skipped.";

/// S3 object-created notification, reduced to the fields the preprocessor reads.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<TriggerRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriggerRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3BucketRef,
    pub object: S3ObjectRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3BucketRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3ObjectRef {
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocator {
    pub bucket: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationLocator {
    pub bucket: String,
    pub key: String,
}

impl std::fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

impl std::fmt::Display for DestinationLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("trigger event contains no records")]
    NoRecords,
    #[error("trigger record is missing {0}")]
    MissingField(&'static str),
}

impl TriggerEvent {
    /// Locator of the first record. Any further records are ignored.
    pub fn first_source(&self) -> Result<SourceLocator, ContractError> {
        let record = self.records.first().ok_or(ContractError::NoRecords)?;
        if record.s3.bucket.name.is_empty() {
            return Err(ContractError::MissingField("s3.bucket.name"));
        }
        if record.s3.object.key.is_empty() {
            return Err(ContractError::MissingField("s3.object.key"));
        }
        Ok(SourceLocator {
            bucket: record.s3.bucket.name.clone(),
            key: record.s3.object.key.clone(),
        })
    }

    pub fn ignored_record_count(&self) -> usize {
        self.records.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    pub fn processed() -> Self {
        Self {
            status_code: 200,
            body: PROCESSED_MESSAGE.to_string(),
        }
    }

    pub fn empty_file_skipped() -> Self {
        Self {
            status_code: 200,
            body: EMPTY_FILE_MESSAGE.to_string(),
        }
    }
}
