//! What to do when the backing file can't be read.

/// Controls how reads react to an unreadable or corrupted file.
///
/// A missing or zero-byte file always reads as an empty store under either
/// policy; these only differ for real I/O and parse failures.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Log the failure and carry on as if the store were empty. The next
    /// mutation then overwrites the bad file.
    #[default]
    Lenient,
    /// Log the failure and hand it back to the caller. The file is left as is.
    Strict,
}

impl ReadPolicy {
    /// `true` for [`ReadPolicy::Lenient`].
    #[must_use]
    pub fn is_lenient(self) -> bool {
        self == ReadPolicy::Lenient
    }
}
