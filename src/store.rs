//! The product store and its builder.

use crate::diagnostics::{DiagnosticSink, Severity, TracingSink};
use crate::error::{Error, Result};
use crate::persist::{atomic_write, create_if_missing, load};
use crate::policy::ReadPolicy;
use crate::product::{NewProduct, Product, ProductUpdate};
use crate::serializer::{JsonSerializer, Serializer};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the store lives when no path (or a blank one) is given.
pub const DEFAULT_PATH: &str = "./products.json";

/// File-backed product store.
///
/// Nothing is cached between calls: every operation reads the whole file,
/// works on the result, and mutating operations write the whole sequence
/// back. Use [`open`](Self::open) for the defaults or
/// [`builder`](Self::builder) to pick a read policy, output format or
/// diagnostic sink.
///
/// Mutations through one `ProductStore` are serialized by an internal lock.
/// Two stores (or two processes) on the same file will race each other.
pub struct ProductStore {
    path: PathBuf,
    serializer: JsonSerializer,
    read_policy: ReadPolicy,
    sink: Arc<dyn DiagnosticSink>,
    write_lock: Mutex<()>,
}

impl ProductStore {
    /// Open (or create) a store at `path` with the default settings. A blank
    /// path means [`DEFAULT_PATH`].
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::builder(path).build()
    }

    /// Open (or create) the store at [`DEFAULT_PATH`].
    pub fn open_default() -> Self {
        Self::builder("").build()
    }

    /// Start configuring a new store. Call [`.build()`](ProductStoreBuilder::build)
    /// when ready.
    pub fn builder(path: impl AsRef<Path>) -> ProductStoreBuilder {
        ProductStoreBuilder::new(path)
    }

    // ---- reads ----

    /// Every product, in file order.
    pub fn get_products(&self) -> Result<Vec<Product>> {
        self.read()
    }

    /// The product with `id`, or `None` if there isn't one.
    pub fn get_product_by_id(&self, id: u64) -> Result<Option<Product>> {
        let found = self.read()?.into_iter().find(|p| p.id == id);
        if found.is_none() {
            self.emit(Severity::Warn, format!("Not Found: product with ID {id}"));
        }
        Ok(found)
    }

    /// The product whose code is `code`, or `None`.
    pub fn get_product_by_code(&self, code: &str) -> Result<Option<Product>> {
        Ok(self.read()?.into_iter().find(|p| p.code == code))
    }

    /// Number of products.
    pub fn len(&self) -> Result<usize> {
        self.read().map(|p| p.len())
    }

    /// `true` when the store holds no products.
    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|n| n == 0)
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How read failures are handled.
    #[must_use]
    pub fn read_policy(&self) -> ReadPolicy {
        self.read_policy
    }

    // ---- writes ----

    /// Validate and append a new product, assigning it the next id.
    ///
    /// Fails with [`Error::MissingField`] if any field is empty and with
    /// [`Error::DuplicateCode`] if the code is taken. Nothing is written in
    /// either case.
    pub fn add_product(&self, new: NewProduct) -> Result<Product> {
        if let Some(field) = new.missing_field() {
            self.emit(
                Severity::Warn,
                format!("All fields are required, `{field}` is empty"),
            );
            return Err(Error::MissingField(field));
        }

        let _guard = self.write_lock.lock();
        let mut products = self.read()?;
        if products.iter().any(|p| p.code == new.code) {
            self.emit(
                Severity::Warn,
                format!("This code {} is duplicated", new.code),
            );
            return Err(Error::DuplicateCode(new.code));
        }

        let Some(id) = next_id(&products) else {
            self.emit(
                Severity::Error,
                format!("No ids left after {}", u64::MAX),
            );
            return Err(Error::IdExhausted);
        };
        let product = new.into_product(id);
        products.push(product.clone());
        self.write(&products)?;
        self.emit(
            Severity::Info,
            format!("Product with ID {} has been added", product.id),
        );
        Ok(product)
    }

    /// Overwrite the fields of product `id` that `update` sets and return the
    /// result. The file is rewritten even if nothing actually changed.
    ///
    /// Setting `code` to a code held by a different product fails with
    /// [`Error::DuplicateCode`].
    pub fn update_product(&self, id: u64, update: ProductUpdate) -> Result<Product> {
        let _guard = self.write_lock.lock();
        let mut products = self.read()?;
        let index = self.position(&products, id)?;

        if let Some(code) = &update.code {
            let taken = products
                .iter()
                .enumerate()
                .any(|(i, p)| i != index && &p.code == code);
            if taken {
                self.emit(Severity::Warn, format!("This code {code} is duplicated"));
                return Err(Error::DuplicateCode(code.clone()));
            }
        }

        update.apply(&mut products[index]);
        let updated = products[index].clone();
        self.write(&products)?;
        self.emit(
            Severity::Info,
            format!("Product with ID {id} has been updated"),
        );
        Ok(updated)
    }

    /// Remove product `id` and return it. The remaining products keep their
    /// order.
    pub fn delete_product_by_id(&self, id: u64) -> Result<Product> {
        let _guard = self.write_lock.lock();
        let mut products = self.read()?;
        let index = self.position(&products, id)?;

        let removed = products.remove(index);
        self.write(&products)?;
        self.emit(
            Severity::Info,
            format!("Product with ID {id} has been deleted"),
        );
        Ok(removed)
    }

    // ---- internal ----

    fn read(&self) -> Result<Vec<Product>> {
        match load::<Product, _>(&self.path, &self.serializer) {
            Ok(Ok(products)) => Ok(products),
            // reads as empty under either policy, but still worth a line
            Ok(Err(why)) => {
                self.emit(
                    Severity::Error,
                    format!("Error reading {}: {why}", self.path.display()),
                );
                Ok(Vec::new())
            }
            Err(err) => {
                self.emit(
                    Severity::Error,
                    format!("Error reading {}: {err}", self.path.display()),
                );
                if self.read_policy.is_lenient() {
                    Ok(Vec::new())
                } else {
                    Err(err)
                }
            }
        }
    }

    fn write(&self, products: &[Product]) -> Result<()> {
        let res = self
            .serializer
            .serialize(products)
            .and_then(|bytes| atomic_write(&self.path, &bytes));
        if let Err(err) = &res {
            self.emit(
                Severity::Error,
                format!("Error writing {}: {err}", self.path.display()),
            );
        }
        res
    }

    fn position(&self, products: &[Product], id: u64) -> Result<usize> {
        match products.iter().position(|p| p.id == id) {
            Some(index) => Ok(index),
            None => {
                self.emit(Severity::Warn, format!("Product with ID {id} not found"));
                Err(Error::NotFound(id))
            }
        }
    }

    fn emit(&self, severity: Severity, message: String) {
        self.sink.emit(severity, &message);
    }
}

impl std::fmt::Debug for ProductStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductStore")
            .field("path", &self.path)
            .field("read_policy", &self.read_policy)
            .field("pretty", &self.serializer.is_pretty())
            .finish_non_exhaustive()
    }
}

/// Highest id plus one, so ids stay unique after deletes from the middle.
/// `None` once the highest id is `u64::MAX`.
fn next_id(products: &[Product]) -> Option<u64> {
    match products.iter().map(|p| p.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// `None` when `path` is empty or only whitespace.
fn non_blank(path: &Path) -> Option<&Path> {
    let blank = path.as_os_str().is_empty()
        || path.to_str().is_some_and(|s| s.trim().is_empty());
    (!blank).then_some(path)
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and opens a [`ProductStore`].
///
/// ```rust,no_run
/// use product_store::{ProductStore, ReadPolicy};
///
/// let store = ProductStore::builder("products.json")
///     .read_policy(ReadPolicy::Strict)
///     .pretty(false)
///     .build();
/// ```
pub struct ProductStoreBuilder {
    path: PathBuf,
    read_policy: ReadPolicy,
    pretty: bool,
    sink: Arc<dyn DiagnosticSink>,
}

impl ProductStoreBuilder {
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            read_policy: ReadPolicy::default(),
            pretty: true,
            sink: Arc::new(TracingSink),
        }
    }

    /// Set the read policy (default: [`ReadPolicy::Lenient`]).
    pub fn read_policy(mut self, policy: ReadPolicy) -> Self {
        self.read_policy = policy;
        self
    }

    /// Write indented JSON (default) or a single compact line.
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Send diagnostics somewhere other than `tracing`.
    pub fn sink<S: DiagnosticSink + 'static>(mut self, sink: Arc<S>) -> Self {
        self.sink = sink;
        self
    }

    /// Resolve the path, create the file if it's missing, and return the
    /// store. Never fails: a file that can't be created is logged and later
    /// reads go through the configured [`ReadPolicy`].
    pub fn build(self) -> ProductStore {
        let path = match non_blank(&self.path) {
            Some(p) => p.to_path_buf(),
            None => {
                self.sink.emit(
                    Severity::Info,
                    &format!("No file path provided. Using default file path: {DEFAULT_PATH}"),
                );
                PathBuf::from(DEFAULT_PATH)
            }
        };

        match create_if_missing(&path) {
            Ok(true) => self.sink.emit(
                Severity::Info,
                &format!("New file created at {}", path.display()),
            ),
            Ok(false) => {}
            Err(err) => self.sink.emit(
                Severity::Error,
                &format!("Error creating new file {}: {err}", path.display()),
            ),
        }

        let serializer = if self.pretty {
            JsonSerializer::pretty()
        } else {
            JsonSerializer::compact()
        };

        ProductStore {
            path,
            serializer,
            read_policy: self.read_policy,
            sink: self.sink,
            write_lock: Mutex::new(()),
        }
    }
}

impl std::fmt::Debug for ProductStoreBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductStoreBuilder")
            .field("path", &self.path)
            .field("read_policy", &self.read_policy)
            .field("pretty", &self.pretty)
            .finish_non_exhaustive()
    }
}
