//! File-backed JSON product store.
//!
//! Keeps a list of products in a single JSON array on disk and offers
//! create, read, update and delete. Every call re-reads the file, so there is
//! no cache to go stale; every mutation rewrites the whole file.
//!
//! ```rust,no_run
//! use product_store::{NewProduct, ProductStore, ProductUpdate};
//!
//! let store = ProductStore::open("products.json");
//! let p = store.add_product(NewProduct::new("Mug", "Blue mug", 10, "mug.png", "mug-1", 5)).unwrap();
//! store.update_product(p.id, ProductUpdate::new().price(12)).unwrap();
//! assert_eq!(store.get_products().unwrap().len(), 1);
//! ```
//!
//! Diagnostics go through a [`DiagnosticSink`]; by default they are emitted as
//! `tracing` events, so install a subscriber to see them.
//!
//! **Single-process only.** If multiple processes open the same file they will
//! clobber each other. Use advisory file locking or a real database for
//! multi-process access.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod diagnostics;
pub mod error;
pub mod persist;
pub mod policy;
pub mod product;
pub mod serializer;
pub mod store;

pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, Severity, TracingSink};
pub use error::{Error, Result};
pub use policy::ReadPolicy;
pub use product::{FieldValue, NewProduct, Product, ProductUpdate};
pub use store::{ProductStore, ProductStoreBuilder, DEFAULT_PATH};
