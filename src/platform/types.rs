//! Result types returned by the data platform.
//!
//! Results arrive column-major: one named, typed column per output field,
//! each holding an ordered sequence of values.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// A single value from a platform query result.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text/string value.
    String(String),

    /// Binary data.
    Bytes(Vec<u8>),

    /// Nested value (lists, structs, maps).
    Json(serde_json::Value),
}

impl Value {
    /// Converts the value into JSON that any client can parse.
    ///
    /// Non-finite floats have no JSON representation and become `null`;
    /// binary data is base64-encoded.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::String(BASE64.encode(b)),
            Value::Json(v) => v.clone(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Json(n.into())),
            },
            serde_json::Value::String(s) => Value::String(s),
            other => Value::Json(other),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

// Conversion implementations for common types
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

/// Name and type descriptor of a result column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Column name.
    pub name: String,

    /// Column data type as reported by the platform (e.g. "int64", "string").
    #[serde(rename = "type")]
    pub data_type: String,
}

impl Field {
    /// Creates a new field with the given name and type.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// A query result in columnar form.
///
/// `fields[k]` describes `columns[k]`. Column order is the order the platform
/// returned and is preserved through to the rows handed to callers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnarResult {
    fields: Vec<Field>,
    columns: Vec<Vec<Value>>,
}

impl ColumnarResult {
    /// Creates an empty result with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a result from parallel field and column lists.
    ///
    /// Fails if the two lists differ in length.
    pub fn from_parts(fields: Vec<Field>, columns: Vec<Vec<Value>>) -> crate::error::Result<Self> {
        if fields.len() != columns.len() {
            return Err(crate::error::BauplanError::internal(format!(
                "result schema lists {} columns but {} were returned",
                fields.len(),
                columns.len()
            )));
        }
        Ok(Self { fields, columns })
    }

    /// Appends a column.
    pub fn with_column<V>(
        mut self,
        name: impl Into<String>,
        data_type: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self
    where
        V: Into<Value>,
    {
        self.fields.push(Field::new(name, data_type));
        self.columns
            .push(values.into_iter().map(Into::into).collect());
        self
    }

    /// Column names in result order.
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// `(name, type)` pairs in result order.
    pub fn column_types(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.data_type.as_str()))
            .collect()
    }

    /// Values of the first column with the given name.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .map(|idx| self.columns[idx].as_slice())
    }

    /// Iterates over `(field, values)` pairs in result order.
    pub fn iter(&self) -> impl Iterator<Item = (&Field, &[Value])> {
        self.fields
            .iter()
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// Number of complete rows, i.e. the length of the shortest column.
    pub fn num_rows(&self) -> usize {
        self.columns.iter().map(Vec::len).min().unwrap_or(0)
    }

    /// Returns true if the columns have different lengths.
    pub fn is_ragged(&self) -> bool {
        let mut lengths = self.columns.iter().map(Vec::len);
        match lengths.next() {
            Some(first) => lengths.any(|len| len != first),
            None => false,
        }
    }
}

/// Branch and namespace a client handle is actually bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub branch: String,
    pub namespace: String,
}
