//! Product records and the inputs used to create and patch them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `price` or `stock` value, kept exactly as the caller supplied it.
///
/// The file stores numbers as JSON numbers and anything else as strings, so
/// `10`, `10.5` and `"10 units"` all survive a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A JSON number.
    Number(serde_json::Number),
    /// Free-form text.
    Text(String),
}

impl FieldValue {
    /// Only the empty string counts as empty; `0` is a real value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }

    /// The value as a float, if it is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => n.as_f64(),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

macro_rules! field_value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(v: $t) -> Self {
                FieldValue::Number(serde_json::Number::from(v))
            }
        })*
    };
}

field_value_from_int!(i32, i64, u32, u64, usize);

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        // JSON has no NaN or infinity
        match serde_json::Number::from_f64(v) {
            Some(n) => FieldValue::Number(n),
            None => FieldValue::Text(v.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// A stored product. Field order here is the key order in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned, unique, starts at 1.
    pub id: u64,
    /// Display name.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Price, number or text.
    pub price: FieldValue,
    /// Image reference.
    pub thumbnail: String,
    /// Unique across the store.
    pub code: String,
    /// Units in stock, number or text.
    pub stock: FieldValue,
}

/// Everything needed to add a product except the id, which the store assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// See [`Product::title`].
    pub title: String,
    /// See [`Product::description`].
    pub description: String,
    /// See [`Product::price`].
    pub price: FieldValue,
    /// See [`Product::thumbnail`].
    pub thumbnail: String,
    /// See [`Product::code`].
    pub code: String,
    /// See [`Product::stock`].
    pub stock: FieldValue,
}

impl NewProduct {
    /// Build a new product from its six fields.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<FieldValue>,
        thumbnail: impl Into<String>,
        code: impl Into<String>,
        stock: impl Into<FieldValue>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price: price.into(),
            thumbnail: thumbnail.into(),
            code: code.into(),
            stock: stock.into(),
        }
    }

    /// Name of the first empty field, in declaration order.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.title.is_empty() {
            Some("title")
        } else if self.description.is_empty() {
            Some("description")
        } else if self.price.is_empty() {
            Some("price")
        } else if self.thumbnail.is_empty() {
            Some("thumbnail")
        } else if self.code.is_empty() {
            Some("code")
        } else if self.stock.is_empty() {
            Some("stock")
        } else {
            None
        }
    }

    pub(crate) fn into_product(self, id: u64) -> Product {
        Product {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            thumbnail: self.thumbnail,
            code: self.code,
            stock: self.stock,
        }
    }
}

/// A partial update. `None` fields are left as they are.
///
/// Deserializes from a JSON object holding any subset of the six keys, so
/// `{"price": 15}` is a valid patch:
///
/// ```rust
/// use product_store::ProductUpdate;
///
/// let patch: ProductUpdate = serde_json::from_str(r#"{"price": 15}"#).unwrap();
/// assert_eq!(patch, ProductUpdate::new().price(15));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<FieldValue>,
    /// New thumbnail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// New code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// New stock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<FieldValue>,
}

impl ProductUpdate {
    /// An empty patch. Applying it changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the price.
    pub fn price(mut self, price: impl Into<FieldValue>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Set the thumbnail.
    pub fn thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Set the code.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the stock.
    pub fn stock(mut self, stock: impl Into<FieldValue>) -> Self {
        self.stock = Some(stock.into());
        self
    }

    /// `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite the fields of `product` that this patch sets.
    pub fn apply(&self, product: &mut Product) {
        if let Some(title) = &self.title {
            product.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            product.description.clone_from(description);
        }
        if let Some(price) = &self.price {
            product.price = price.clone();
        }
        if let Some(thumbnail) = &self.thumbnail {
            product.thumbnail.clone_from(thumbnail);
        }
        if let Some(code) = &self.code {
            product.code.clone_from(code);
        }
        if let Some(stock) = &self.stock {
            product.stock = stock.clone();
        }
    }
}
