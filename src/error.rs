//! Unified error type for all store operations.

/// Things that can go wrong when using the store.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// File system problem (read, write, rename).
    Io(String),
    /// Failed to serialize the products to bytes.
    Serialize(String),
    /// The backing file is not a JSON array of products.
    Deserialize(String),
    /// A required field was empty when adding a product.
    MissingField(&'static str),
    /// Another product already uses this code.
    DuplicateCode(String),
    /// No product has this id.
    NotFound(u64),
    /// The highest stored id is already `u64::MAX`.
    IdExhausted,
}

impl Error {
    /// `true` for rejections caused by the caller's input rather than by the
    /// file system or the file contents.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::MissingField(_) | Error::DuplicateCode(_) | Error::NotFound(_)
        )
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Serialize(msg) => write!(f, "serialization error: {msg}"),
            Error::Deserialize(msg) => write!(f, "deserialization error: {msg}"),
            Error::MissingField(field) => write!(f, "all fields are required, `{field}` is empty"),
            Error::DuplicateCode(code) => write!(f, "code {code} is already in use"),
            Error::NotFound(id) => write!(f, "product with id {id} not found"),
            Error::IdExhausted => write!(f, "no product ids left"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.to_string())
        } else if err.is_syntax() || err.is_eof() || err.is_data() {
            Error::Deserialize(err.to_string())
        } else {
            Error::Serialize(err.to_string())
        }
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
