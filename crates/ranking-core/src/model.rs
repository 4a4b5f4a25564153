// Typed mirror of the ranking backend's JSON documents.
//
// Response types are lenient (counts and nested lists default when a backend
// omits them); request bodies serialize exactly the fields the backend reads.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// Value type of a comparison attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Text,
    Number,
    Boolean,
}

/// Cycle order for selecting a data type in a form.
const DATA_TYPE_CYCLE: &[DataType] = &[DataType::Text, DataType::Number, DataType::Boolean];

impl DataType {
    /// Wire name, as used in JSON (`text`, `number`, `boolean`).
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Number => "number",
            DataType::Boolean => "boolean",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DataType::Text => "Text",
            DataType::Number => "Number",
            DataType::Boolean => "Boolean",
        }
    }

    /// Input hint shown in an empty value field.
    pub fn placeholder(&self) -> &'static str {
        match self {
            DataType::Number => "Enter numeric value",
            DataType::Boolean => "true/false or yes/no",
            DataType::Text => "Enter text value",
        }
    }

    /// Next type in the cycle Text -> Number -> Boolean -> Text.
    pub fn next(self) -> Self {
        let idx = DATA_TYPE_CYCLE.iter().position(|t| *t == self).unwrap_or(0);
        DATA_TYPE_CYCLE[(idx + 1) % DATA_TYPE_CYCLE.len()]
    }

    /// Previous type in the cycle.
    pub fn prev(self) -> Self {
        let idx = DATA_TYPE_CYCLE.iter().position(|t| *t == self).unwrap_or(0);
        DATA_TYPE_CYCLE[(idx + DATA_TYPE_CYCLE.len() - 1) % DATA_TYPE_CYCLE.len()]
    }

    /// Whether `c` may be typed into a value field of this type.
    ///
    /// Number fields take digits, a sign, a decimal point and an exponent
    /// marker; everything else is free text.
    pub fn accepts_char(&self, c: char) -> bool {
        match self {
            DataType::Number => c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'),
            DataType::Text | DataType::Boolean => !c.is_control(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-defined attribute of a comparison (e.g. "Price", unit "USD").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default)]
    pub unit: Option<String>,
}

impl Attribute {
    /// Name with the unit in parentheses when one is set: `Price (USD)`.
    pub fn label(&self) -> String {
        match self.unit.as_deref().filter(|u| !u.is_empty()) {
            Some(unit) => format!("{} ({})", self.name, unit),
            None => self.name.clone(),
        }
    }
}

/// A product's stored value for one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: i64,
    pub attribute: Attribute,
    pub value: String,
}

impl AttributeValue {
    /// `value unit`, or just `value` when the attribute has no unit.
    pub fn display(&self) -> String {
        join_value_unit(&self.value, self.attribute.unit.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Products and comparisons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Absent in some create responses; treated as "no values".
    #[serde(default)]
    pub attribute_data: Vec<AttributeValue>,
}

impl Product {
    /// Stored value for the attribute with the given id, if any.
    pub fn value_for(&self, attribute_id: i64) -> Option<&AttributeValue> {
        self.attribute_data
            .iter()
            .find(|v| v.attribute.id == attribute_id)
    }
}

/// Row of the comparison list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub product_count: u32,
    #[serde(default)]
    pub attribute_count: u32,
}

impl ComparisonSummary {
    /// Ranking is only meaningful with at least two products.
    pub fn can_rank(&self) -> bool {
        self.product_count > 1
    }
}

/// A comparison with its attributes and products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub product_count: u32,
}

impl Comparison {
    pub fn can_rank(&self) -> bool {
        self.products.len() > 1
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body for creating or updating a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComparison {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body for creating or updating an attribute. `unit` is sent as `null`
/// when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAttribute {
    pub name: String,
    pub data_type: DataType,
    pub unit: Option<String>,
}

/// One attribute value in a product write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeValueInput {
    pub attribute_id: i64,
    pub value: String,
}

/// Body for creating a product together with its attribute values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attribute_data: Vec<AttributeValueInput>,
}

/// Body for updating a product's own fields. Attribute values go through
/// the separate product-attributes endpoint.
///
/// `description` is always sent: the backend keeps fields missing from a
/// PUT, so a cleared description goes out as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductUpdate {
    pub name: String,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Arrow marker for the active sort column.
    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

/// The `sort_by`/`sort_order` pair relayed to the backend.
///
/// `sort_by == None` means "default order" (the backend's own ordering).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub sort_by: Option<String>,
    pub order: SortOrder,
}

impl SortState {
    /// Apply a click on a sort button.
    ///
    /// Selecting the key that is already active flips the order; selecting
    /// any other key (including default order) makes it active with
    /// descending order.
    pub fn select(&mut self, key: Option<&str>) {
        let key = key.filter(|k| !k.is_empty());
        if self.sort_by.as_deref() == key {
            self.order = self.order.toggled();
        } else {
            self.sort_by = key.map(str::to_string);
            self.order = SortOrder::Desc;
        }
    }

    /// Query parameters for the results endpoint. `sort_by` is omitted when
    /// unset; `sort_order` is always sent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(key) = &self.sort_by {
            pairs.push(("sort_by", key.clone()));
        }
        pairs.push(("sort_order", self.order.as_str().to_string()));
        pairs
    }

    pub fn is_active(&self, key: Option<&str>) -> bool {
        self.sort_by.as_deref() == key
    }
}

/// One product's value for an attribute in the ranking response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedValue {
    pub value: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub data_type: DataType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub product_id: i64,
    pub product_name: String,
    /// Keyed by attribute name.
    #[serde(default)]
    pub attribute_values: BTreeMap<String, RankedValue>,
    pub rank: u32,
    #[serde(default)]
    pub score: Option<f64>,
}

impl RankingEntry {
    /// `value unit` for the named attribute, or an empty string.
    pub fn display_value(&self, attribute_name: &str) -> String {
        self.attribute_values
            .get(attribute_name)
            .map(|v| join_value_unit(&v.value, v.unit.as_deref()))
            .unwrap_or_default()
    }
}

/// Response of the results endpoint: the comparison, its products in ranked
/// order, and the sort that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResults {
    pub comparison: Comparison,
    #[serde(default)]
    pub results: Vec<RankingEntry>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: SortOrder,
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn join_value_unit(value: &str, unit: Option<&str>) -> String {
    match unit.filter(|u| !u.is_empty()) {
        Some(unit) => format!("{value} {unit}"),
        None => value.to_string(),
    }
}

/// Render a backend timestamp as a calendar date (`Jul 1, 2025`).
///
/// Accepts RFC 3339 timestamps and SQLite's `YYYY-MM-DD HH:MM:SS`. Anything
/// else is returned unchanged.
pub fn format_created_date(raw: &str) -> String {
    const DATE_FORMAT: &str = "%b %-d, %Y";

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.date_naive().format(DATE_FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, pattern) {
            return ts.date().format(DATE_FORMAT).to_string();
        }
    }
    raw.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
