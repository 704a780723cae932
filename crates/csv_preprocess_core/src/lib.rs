//! Shared CSV preprocessing domain primitives.
//!
//! This crate owns the trigger-event contract, destination key derivation and the
//! row filter itself. It intentionally excludes AWS SDK and Lambda runtime concerns;
//! those live in `csv_preprocess_lambda`.

pub mod contract;
pub mod filter;
pub mod storage_keys;
