use crm_core_api::ApiError;
use heapless::String as HeaplessString;
use serde::Serialize;
use std::hash::Hasher;
use std::str::FromStr;
use twox_hash::XxHash64;

/// Hashes serializable data into an i64 using CBOR serialization and XxHash64.
///
/// Used for the lookup columns (`title_hash`, `email_hash`) so equality
/// searches hit a fixed-width index instead of free text.
pub fn hash_as_i64<T: Serialize>(data: &T) -> Result<i64, String> {
    let mut hasher = XxHash64::with_seed(0);
    let mut cbor = Vec::new();
    ciborium::ser::into_writer(data, &mut cbor)
        .map_err(|e| format!("Failed to serialize data for hashing: {e}"))?;
    hasher.write(&cbor);
    Ok(hasher.finish() as i64)
}

/// Converts request text into a bounded code value.
pub fn to_heapless<const N: usize>(field: &str, value: &str) -> Result<HeaplessString<N>, ApiError> {
    HeaplessString::from_str(value).map_err(|_| {
        ApiError::ValidationError(format!("{field} must have at most {N} bytes"))
    })
}

pub fn to_optional_heapless<const N: usize>(
    field: &str,
    value: Option<&str>,
) -> Result<Option<HeaplessString<N>>, ApiError> {
    value.map(|v| to_heapless(field, v)).transpose()
}
