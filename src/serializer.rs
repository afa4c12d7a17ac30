//! Serialization layer. Defaults to JSON via serde_json.
//!
//! Implement [`Serializer`] if you need a different text format.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Converts record sequences to/from bytes for persistence.
pub trait Serializer: Send + Sync {
    /// Encode a sequence of records to bytes.
    fn serialize<T: Serialize>(&self, records: &[T]) -> Result<Vec<u8>>;

    /// Decode bytes back into a sequence of records.
    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Vec<T>>;
}

/// JSON array serializer, pretty-printed unless told otherwise.
#[derive(Debug, Clone)]
pub struct JsonSerializer {
    pretty: bool,
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::pretty()
    }
}

impl JsonSerializer {
    /// Compact JSON (single line, no extra whitespace).
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// `true` if output is indented.
    #[must_use]
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Serializer for JsonSerializer {
    fn serialize<T: Serialize>(&self, records: &[T]) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(records)
        } else {
            serde_json::to_vec(records)
        };
        bytes.map_err(Error::from)
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Vec<T>> {
        serde_json::from_slice(bytes).map_err(Error::from)
    }
}
