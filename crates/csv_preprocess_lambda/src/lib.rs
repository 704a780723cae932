//! AWS-oriented adapters and handlers for the raw-to-processed CSV preprocessor.
//!
//! This crate owns runtime integration details (configuration, the Lambda handler
//! and the S3 storage adapter). Event contracts, key derivation and the row filter
//! come from `csv_preprocess_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
