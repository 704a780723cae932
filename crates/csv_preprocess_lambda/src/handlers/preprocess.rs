use std::time::Instant;

use csv_preprocess_core::contract::{
    DestinationLocator, HandlerResponse, SourceLocator, TriggerEvent,
};
use csv_preprocess_core::filter::{filter_csv, FilterError, FilterOutcome, FilterSummary};
use csv_preprocess_core::storage_keys::processed_object_key;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::adapters::object_store::{ObjectStore, StoreError, CSV_CONTENT_TYPE};
use crate::config::PreprocessConfig;

const COMPONENT: &str = "preprocess_handler";

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("invalid trigger event: {0}")]
    InvalidEvent(String),
    #[error("failed to read source object: {0}")]
    SourceRead(#[source] StoreError),
    #[error("failed to decode source object: {0}")]
    Decode(#[source] FilterError),
    #[error("failed to parse source object: {0}")]
    Parse(#[source] FilterError),
    #[error("failed to write processed object: {0}")]
    DestinationWrite(#[source] StoreError),
}

impl From<FilterError> for PreprocessError {
    fn from(error: FilterError) -> Self {
        match error {
            FilterError::Decode(_) => Self::Decode(error),
            _ => Self::Parse(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The source had no header row; nothing was written.
    EmptySkipped,
    Processed {
        destination: DestinationLocator,
        summary: FilterSummary,
    },
}

/// Reads one raw object, filters it and writes the result to the processed bucket.
///
/// At most one write is issued, and only after the whole output has been encoded.
pub fn process_object(
    source: &SourceLocator,
    config: &PreprocessConfig,
    store: &impl ObjectStore,
) -> Result<ProcessOutcome, PreprocessError> {
    let body = store
        .read_object(&source.bucket, &source.key)
        .map_err(PreprocessError::SourceRead)?;

    let (output, summary) = match filter_csv(&body)? {
        FilterOutcome::Empty => return Ok(ProcessOutcome::EmptySkipped),
        FilterOutcome::Filtered { body, summary } => (body, summary),
    };

    let destination = DestinationLocator {
        bucket: config.processed_bucket.clone(),
        key: processed_object_key(&source.key, &config.raw_prefix, &config.processed_prefix),
    };

    store
        .write_object(
            &destination.bucket,
            &destination.key,
            &output,
            CSV_CONTENT_TYPE,
        )
        .map_err(PreprocessError::DestinationWrite)?;

    Ok(ProcessOutcome::Processed {
        destination,
        summary,
    })
}

/// Invocation entry point: decodes the trigger, processes its first record and logs
/// the result. Failures are logged and handed back unchanged so the runtime's own
/// retry and dead-letter policy decides what happens next.
pub fn handle_preprocess_event(
    event: Value,
    config: &PreprocessConfig,
    store: &impl ObjectStore,
) -> Result<HandlerResponse, PreprocessError> {
    let started_at = Instant::now();

    let source = match decode_source(event) {
        Ok(value) => value,
        Err(failure) => {
            error!(
                component = COMPONENT,
                event = "processing_failed",
                error = %failure,
                "Error processing file: {failure}"
            );
            return Err(failure);
        }
    };

    match process_object(&source, config, store) {
        Ok(ProcessOutcome::EmptySkipped) => {
            info!(
                component = COMPONENT,
                event = "empty_file_skipped",
                source_bucket = %source.bucket,
                source_key = %source.key,
                "File {} is empty. Skipping processing.",
                source.key
            );
            Ok(HandlerResponse::empty_file_skipped())
        }
        Ok(ProcessOutcome::Processed {
            destination,
            summary,
        }) => {
            info!(
                component = COMPONENT,
                event = "file_processed",
                source_bucket = %source.bucket,
                source_key = %source.key,
                destination_bucket = %destination.bucket,
                destination_key = %destination.key,
                rows_read = summary.rows_read,
                rows_kept = summary.rows_kept,
                rows_dropped = summary.rows_dropped(),
                duration_ms = started_at.elapsed().as_millis() as u64,
                "Processed file uploaded to: {destination}"
            );
            Ok(HandlerResponse::processed())
        }
        Err(failure) => {
            error!(
                component = COMPONENT,
                event = "processing_failed",
                source_bucket = %source.bucket,
                source_key = %source.key,
                duration_ms = started_at.elapsed().as_millis() as u64,
                error = %failure,
                "Error processing file: {failure}"
            );
            Err(failure)
        }
    }
}

fn decode_source(event: Value) -> Result<SourceLocator, PreprocessError> {
    let event: TriggerEvent = serde_json::from_value(event)
        .map_err(|error| PreprocessError::InvalidEvent(format!("malformed payload: {error}")))?;

    let ignored = event.ignored_record_count();
    if ignored > 0 {
        warn!(
            component = COMPONENT,
            event = "extra_records_ignored",
            ignored_records = ignored,
            "Only the first record of a trigger event is processed"
        );
    }

    event
        .first_source()
        .map_err(|error| PreprocessError::InvalidEvent(error.to_string()))
}
