//! Product domain model and mapping conversion.
//!
//! # Responsibility
//! - Define the canonical product record persisted by the repository.
//! - Convert between records and untyped JSON-style mappings with
//!   field-ordered, classified validation errors.
//!
//! # Invariants
//! - `id` is assigned by the store on create and never reused.
//! - `price` is carried as an arbitrary-precision decimal; it never
//!   passes through binary floating point on the way in or out.
//! - `deserialize` surfaces the first failing field only, in the order
//!   name, description, price, available, category.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-assigned row identity.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ProductId = i64;

/// Closed set of product categories.
///
/// Lookup is by exact, case-sensitive name; anything outside the set is
/// rejected with [`DataValidationError::InvalidAttribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Fallback for records that were never fully populated.
    #[default]
    Unknown,
    Cloths,
    Food,
    Housewares,
    Automotive,
    Tools,
}

impl Category {
    /// All variants in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Unknown,
        Category::Cloths,
        Category::Food,
        Category::Housewares,
        Category::Automotive,
        Category::Tools,
    ];

    /// Returns the canonical external name of this category.
    pub fn name(self) -> &'static str {
        match self {
            Category::Unknown => "UNKNOWN",
            Category::Cloths => "CLOTHS",
            Category::Food => "FOOD",
            Category::Housewares => "HOUSEWARES",
            Category::Automotive => "AUTOMOTIVE",
            Category::Tools => "TOOLS",
        }
    }

    /// Looks a category up by its exact external name.
    pub fn from_name(name: &str) -> Option<Category> {
        match name {
            "UNKNOWN" => Some(Category::Unknown),
            "CLOTHS" => Some(Category::Cloths),
            "FOOD" => Some(Category::Food),
            "HOUSEWARES" => Some(Category::Housewares),
            "AUTOMOTIVE" => Some(Category::Automotive),
            "TOOLS" => Some(Category::Tools),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Recoverable input-shape/content errors raised while converting or
/// persisting records.
///
/// This family is distinct from storage failures: callers can always map
/// it to a 400-class response instead of treating it as fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataValidationError {
    /// Required input key absent (or required field left empty).
    MissingField(&'static str),
    /// Input value present but of the wrong shape.
    InvalidType(&'static str),
    /// Price input is not a parseable decimal literal.
    InvalidPrice(String),
    /// Category name outside the closed set.
    InvalidAttribute(String),
    /// Write operation attempted on a record with no persisted id.
    EmptyIdentity,
}

impl Display for DataValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "invalid product: missing {field}"),
            Self::InvalidType(field) => write!(f, "invalid type for field `{field}`"),
            Self::InvalidPrice(value) => write!(f, "invalid price value `{value}`"),
            Self::InvalidAttribute(value) => write!(f, "invalid attribute: {value}"),
            Self::EmptyIdentity => write!(f, "operation called with empty id field"),
        }
    }
}

impl Error for DataValidationError {}

/// Canonical product record, persisted or transient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Store-assigned identity. `None` until the record is created.
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    /// Decimal amount; stored and serialized as a decimal string so the
    /// original scale survives round-trips.
    pub price: Decimal,
    pub available: bool,
    /// `None` only for in-memory shells that were never fully populated;
    /// serialization substitutes `UNKNOWN` in that case.
    pub category: Option<Category>,
}

impl Product {
    /// Creates a new, not-yet-persisted record.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        available: bool,
        category: Category,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            available,
            category: Some(category),
        }
    }

    /// Checks write-path invariants before any SQL mutation.
    ///
    /// # Errors
    /// - `MissingField` when `name` or `description` is empty.
    pub fn validate(&self) -> Result<(), DataValidationError> {
        if self.name.is_empty() {
            return Err(DataValidationError::MissingField("name"));
        }
        if self.description.is_empty() {
            return Err(DataValidationError::MissingField("description"));
        }
        Ok(())
    }

    /// Builds a record from an untyped external mapping.
    ///
    /// Fields are checked in order (name, description, price, available,
    /// category); the first failure wins and no partial record escapes.
    ///
    /// # Errors
    /// - `MissingField` for any absent key.
    /// - `InvalidType` for a present key of the wrong JSON shape,
    ///   including "truthy" stand-ins for `available`.
    /// - `InvalidPrice` for a price string that is not a decimal literal.
    /// - `InvalidAttribute` for an unrecognized category name.
    pub fn deserialize(data: &Map<String, Value>) -> Result<Product, DataValidationError> {
        let name = require_string(data, "name")?;
        let description = require_string(data, "description")?;
        let price = parse_price(require(data, "price")?)?;

        let available = match require(data, "available")? {
            Value::Bool(flag) => *flag,
            _ => return Err(DataValidationError::InvalidType("available")),
        };

        let category = match require(data, "category")? {
            Value::String(raw) => Category::from_name(raw)
                .ok_or_else(|| DataValidationError::InvalidAttribute(raw.clone()))?,
            _ => return Err(DataValidationError::InvalidType("category")),
        };

        Ok(Product {
            id: None,
            name,
            description,
            price,
            available,
            category: Some(category),
        })
    }

    /// Renders this record as an untyped external mapping.
    ///
    /// An unset `category` serializes as `UNKNOWN`; this is a defensive
    /// default for never-populated shells, not a validation pass.
    pub fn serialize(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert(
            "id".to_string(),
            self.id.map_or(Value::Null, Value::from),
        );
        data.insert("name".to_string(), Value::String(self.name.clone()));
        data.insert(
            "description".to_string(),
            Value::String(self.description.clone()),
        );
        data.insert("price".to_string(), Value::String(self.price.to_string()));
        data.insert("available".to_string(), Value::Bool(self.available));
        data.insert(
            "category".to_string(),
            Value::String(self.category.unwrap_or_default().name().to_string()),
        );
        data
    }
}

fn require<'a>(
    data: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a Value, DataValidationError> {
    data.get(key).ok_or(DataValidationError::MissingField(key))
}

fn require_string(
    data: &Map<String, Value>,
    key: &'static str,
) -> Result<String, DataValidationError> {
    match require(data, key)? {
        Value::String(text) => Ok(text.clone()),
        _ => Err(DataValidationError::InvalidType(key)),
    }
}

/// Coerces the accepted price input shapes to a decimal.
///
/// Numbers go through their displayed string form so binary float
/// artifacts never reach the decimal value. Strings are trimmed of
/// surrounding whitespace before parsing.
fn parse_price(value: &Value) -> Result<Decimal, DataValidationError> {
    match value {
        Value::Number(number) => {
            let text = number.to_string();
            Decimal::from_str(&text).map_err(|_| DataValidationError::InvalidPrice(text))
        }
        Value::String(raw) => {
            let trimmed = raw.trim();
            Decimal::from_str(trimmed)
                .map_err(|_| DataValidationError::InvalidPrice(trimmed.to_string()))
        }
        _ => Err(DataValidationError::InvalidType("price")),
    }
}
