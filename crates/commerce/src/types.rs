//! Product records as returned by the shop.
//!
//! Fields this crate does not model are kept in `extra` so a record
//! deserialized and written back out loses nothing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Fields to create or update a product with.
///
/// Passed to the shop as given; REST expects snake_case product fields and
/// GraphQL expects a `ProductInput` object.
pub type ProductInput = Value;

/// Product identifier: numeric for REST, a global id (`gid://...`) for GraphQL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// REST numeric id
    Numeric(u64),
    /// GraphQL global id
    Global(String),
}

impl ProductId {
    /// The numeric id, also recovered from the tail of a global id.
    pub fn legacy_id(&self) -> Option<u64> {
        match self {
            Self::Numeric(id) => Some(*id),
            Self::Global(gid) => gid.rsplit('/').next().and_then(|tail| tail.parse().ok()),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Global(gid) => f.write_str(gid),
        }
    }
}

/// A product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Platform id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Custom metadata
    #[serde(default)]
    pub metafields: Vec<Metafield>,
    /// Attached images
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Variant options such as size or frame
    #[serde(default)]
    pub options: Vec<ProductOption>,
    /// Everything else the shop returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Namespaced key/value metadata on a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metafield {
    /// Namespace, e.g. `custom`
    pub namespace: String,
    /// Key within the namespace
    pub key: String,
    /// Stored value
    pub value: Value,
    /// Value type such as `single_line_text_field`
    #[serde(rename = "type", alias = "valueType", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An image attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Platform id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Hosted image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Alt text
    #[serde(alias = "altText", default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Everything else the shop returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A product option and its allowed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Platform id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Option name, e.g. `Size`
    pub name: String,
    /// Allowed values
    #[serde(default)]
    pub values: Vec<String>,
    /// Everything else the shop returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A field-level error reported by a GraphQL mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Path to the offending input field
    #[serde(default)]
    pub field: Option<Vec<String>>,
    /// Human-readable message
    pub message: String,
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(path) if !path.is_empty() => write!(f, "{}: {}", path.join("."), self.message),
            _ => f.write_str(&self.message),
        }
    }
}
