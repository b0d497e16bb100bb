//! Filter request decoding
//!
//! Decodes JSON bodies into filter sets with size and count limits. Operator
//! tokens are not checked here; that happens when the filter is compiled.

use serde::de::DeserializeOwned;

use super::error::FilterDecodeError;
use super::types::FilterSet;

/// Maximum size of filter JSON in bytes (64KB)
pub const MAX_FILTER_JSON_SIZE: usize = 64 * 1024;

/// Default maximum number of items in one filter set
pub const DEFAULT_MAX_FILTER_ITEMS: usize = 50;

/// Decode a JSON body after checking its size
pub fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, FilterDecodeError> {
    if body.len() > MAX_FILTER_JSON_SIZE {
        return Err(FilterDecodeError::TooLarge {
            limit: MAX_FILTER_JSON_SIZE,
        });
    }
    Ok(serde_json::from_slice(body)?)
}

/// Reject filter sets with more than `max_items` items
pub fn check_item_limit(filter_set: &FilterSet, max_items: usize) -> Result<(), FilterDecodeError> {
    if filter_set.items.len() > max_items {
        return Err(FilterDecodeError::TooManyItems {
            limit: max_items,
            count: filter_set.items.len(),
        });
    }
    Ok(())
}

/// Parse a filter set from a JSON body
pub fn parse_filter_set(body: &[u8], max_items: usize) -> Result<FilterSet, FilterDecodeError> {
    let filter_set: FilterSet = parse_json_body(body)?;
    check_item_limit(&filter_set, max_items)?;
    tracing::trace!(items = filter_set.items.len(), "Decoded filter set");
    Ok(filter_set)
}
