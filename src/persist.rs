//! Disk I/O helpers: load from file, atomic write, create-if-missing.
//!
//! The rename-over approach is close to atomic on most platforms. On FAT32 or
//! network shares there are no hard guarantees.

use crate::error::{Error, Result};
use crate::serializer::Serializer;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Why [`load`] found nothing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoData {
    /// No file at the path.
    Missing,
    /// The file is zero bytes long.
    Empty,
}

impl std::fmt::Display for NoData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoData::Missing => f.write_str("file does not exist"),
            NoData::Empty => f.write_str("file is empty"),
        }
    }
}

/// Reads and deserializes the file at `path`. A missing or zero-byte file is
/// not an error; it comes back as `Ok(Err(NoData))` so the caller can decide
/// how loudly to report it.
pub fn load<T, S>(path: &Path, serializer: &S) -> Result<std::result::Result<Vec<T>, NoData>>
where
    T: DeserializeOwned,
    S: Serializer,
{
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Err(NoData::Missing)),
        Err(e) => return Err(Error::Io(e.to_string())),
    };
    if bytes.is_empty() {
        return Ok(Err(NoData::Empty));
    }
    serializer.deserialize(&bytes).map(Ok)
}

/// Write `bytes` to `<path>.tmp` and then rename over `path`, so a crash
/// mid-write never leaves a truncated store behind.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let tmp = path.with_extension(format!("{ext}.tmp"));
    std::fs::write(&tmp, bytes).map_err(|e| Error::Io(e.to_string()))?;
    std::fs::rename(&tmp, path).map_err(|e| Error::Io(e.to_string()))?;
    Ok(())
}

/// Create `path` holding an empty JSON array. Returns `Ok(false)` if something
/// already exists there, in which case it is left alone.
pub fn create_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, b"[]")?;
    Ok(true)
}
