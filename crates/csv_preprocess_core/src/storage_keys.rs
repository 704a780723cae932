pub const DEFAULT_RAW_PREFIX: &str = "raw/";
pub const DEFAULT_PROCESSED_PREFIX: &str = "processed/";

/// Maps a raw object key onto its processed counterpart.
///
/// Only the first occurrence of `raw_prefix` is replaced, wherever it sits in the key.
/// Keys that do not contain it are returned unchanged.
pub fn processed_object_key(source_key: &str, raw_prefix: &str, processed_prefix: &str) -> String {
    if raw_prefix.is_empty() {
        return source_key.to_string();
    }
    source_key.replacen(raw_prefix, processed_prefix, 1)
}
