use crate::error::PriceError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record identifier as supplied by the backend. Some deployments send
/// integers, others strings; anything else is kept verbatim. None of them is
/// interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Other(serde_json::Value::Null)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
            RecordId::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

/// A single product price at a single store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub brand: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub store: String,
    pub price: f64,
    // Precomputed by the backend ("$2.25 / 1L"); never parsed here
    #[serde(
        rename = "unitPriceString",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub unit_price: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub size: String,
}

/// Missing and `null` text fields both become "" so one sparse record cannot
/// sink the whole response. `price` stays strict.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl PriceRecord {
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        brand: impl Into<String>,
        store: impl Into<String>,
        price: f64,
        size: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: brand.into(),
            store: store.into(),
            price,
            unit_price: String::new(),
            size: size.into(),
        }
    }

    pub fn with_unit_price(mut self, unit_price: impl Into<String>) -> Self {
        self.unit_price = unit_price.into();
        self
    }

    /// Value of a string attribute, used for exact-match filtering.
    pub fn dimension(&self, dimension: FilterDimension) -> &str {
        match dimension {
            FilterDimension::Store => &self.store,
            FilterDimension::Brand => &self.brand,
            FilterDimension::Size => &self.size,
        }
    }
}

/// Body shape returned by `/api/v1/price/all/{term}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceResponse {
    pub data: Vec<PriceRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Store,
    Brand,
    Size,
}

impl FilterDimension {
    pub fn all() -> &'static [FilterDimension] {
        &[
            FilterDimension::Store,
            FilterDimension::Brand,
            FilterDimension::Size,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterDimension::Store => "store",
            FilterDimension::Brand => "brand",
            FilterDimension::Size => "size",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterDimension {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "store" => Ok(FilterDimension::Store),
            "brand" => Ok(FilterDimension::Brand),
            "size" => Ok(FilterDimension::Size),
            other => Err(PriceError::Api(format!("Unknown filter: {}", other))),
        }
    }
}

/// Exact-match constraints. An empty string means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub store: String,
    pub brand: String,
    pub size: String,
}

impl FilterState {
    pub fn get(&self, dimension: FilterDimension) -> &str {
        match dimension {
            FilterDimension::Store => &self.store,
            FilterDimension::Brand => &self.brand,
            FilterDimension::Size => &self.size,
        }
    }

    pub fn set(&mut self, dimension: FilterDimension, value: impl Into<String>) {
        let value = value.into();
        match dimension {
            FilterDimension::Store => self.store = value,
            FilterDimension::Brand => self.brand = value,
            FilterDimension::Size => self.size = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty() && self.brand.is_empty() && self.size.is_empty()
    }

    /// Non-empty constraints, in column order.
    pub fn active(&self) -> Vec<(FilterDimension, &str)> {
        FilterDimension::all()
            .iter()
            .map(|&d| (d, self.get(d)))
            .filter(|(_, v)| !v.is_empty())
            .collect()
    }
}

/// Table columns that can order the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    Brand,
    Store,
    Price,
    UnitPrice,
    Size,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Name,
            SortKey::Brand,
            SortKey::Store,
            SortKey::Price,
            SortKey::UnitPrice,
            SortKey::Size,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Brand => "brand",
            SortKey::Store => "store",
            SortKey::Price => "price",
            SortKey::UnitPrice => "unitPrice",
            SortKey::Size => "size",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "brand" => Ok(SortKey::Brand),
            "store" => Ok(SortKey::Store),
            "price" => Ok(SortKey::Price),
            "unitprice" | "unit-price" | "unit_price" => Ok(SortKey::UnitPrice),
            "size" => Ok(SortKey::Size),
            other => Err(PriceError::Api(format!("Unknown sort column: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("ascending"),
            SortDirection::Descending => f.write_str("descending"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    pub fn descending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Descending)
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self::ascending(SortKey::Price)
    }
}

/// Distinct values available to each filter selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub stores: Vec<String>,
    pub brands: Vec<String>,
    pub sizes: Vec<String>,
}

impl FilterOptions {
    pub fn for_dimension(&self, dimension: FilterDimension) -> &[String] {
        match dimension {
            FilterDimension::Store => &self.stores,
            FilterDimension::Brand => &self.brands,
            FilterDimension::Size => &self.sizes,
        }
    }
}
