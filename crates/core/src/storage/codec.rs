use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::CoreError;

/// Result of a tolerant decode: the records that validated plus how many
/// were discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub dropped: usize,
}

/// Serialize a document for storage.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, CoreError> {
    serde_json::to_string(value)
        .map_err(|e| CoreError::Serialization(format!("Failed to encode document: {e}")))
}

/// Strictly decode a JSON array, one record at a time.
///
/// Fails with `MalformedPersistedState` if the document is not a JSON array.
/// Individual elements that do not validate as `T` are counted in
/// `dropped` instead of failing the whole document.
pub fn try_decode_list<T: DeserializeOwned>(
    key: &str,
    raw: &str,
) -> Result<Decoded<Vec<T>>, CoreError> {
    let doc: Value = serde_json::from_str(raw).map_err(|e| malformed(key, e.to_string()))?;
    let Value::Array(items) = doc else {
        return Err(malformed(key, "expected a JSON array".into()));
    };

    let total = items.len();
    let value: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    let dropped = total - value.len();
    Ok(Decoded { value, dropped })
}

/// Strictly decode a JSON object of records keyed by string.
pub fn try_decode_map<T: DeserializeOwned>(
    key: &str,
    raw: &str,
) -> Result<Decoded<BTreeMap<String, T>>, CoreError> {
    let doc: Value = serde_json::from_str(raw).map_err(|e| malformed(key, e.to_string()))?;
    let Value::Object(fields) = doc else {
        return Err(malformed(key, "expected a JSON object".into()));
    };

    let total = fields.len();
    let value: BTreeMap<String, T> = fields
        .into_iter()
        .filter_map(|(k, v)| serde_json::from_value(v).ok().map(|record| (k, record)))
        .collect();
    let dropped = total - value.len();
    Ok(Decoded { value, dropped })
}

/// Parse-or-default for list documents. A missing value is an empty list;
/// corruption is logged and recovered, never returned.
pub fn decode_list_or_default<T: DeserializeOwned>(key: &str, raw: Option<&str>) -> Vec<T> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match try_decode_list(key, raw) {
        Ok(decoded) => {
            if decoded.dropped > 0 {
                tracing::warn!(key, dropped = decoded.dropped, "discarded invalid records");
            }
            decoded.value
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "unreadable document, treating as empty");
            Vec::new()
        }
    }
}

/// Parse-or-default for keyed documents.
pub fn decode_map_or_default<T: DeserializeOwned>(
    key: &str,
    raw: Option<&str>,
) -> BTreeMap<String, T> {
    let Some(raw) = raw else {
        return BTreeMap::new();
    };
    match try_decode_map(key, raw) {
        Ok(decoded) => {
            if decoded.dropped > 0 {
                tracing::warn!(key, dropped = decoded.dropped, "discarded invalid records");
            }
            decoded.value
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "unreadable document, treating as empty");
            BTreeMap::new()
        }
    }
}

fn malformed(key: &str, message: String) -> CoreError {
    CoreError::MalformedPersistedState {
        key: key.to_string(),
        message,
    }
}
