//! Tabular results built from JSON records
//!
//! Every tool returns a [`TabularResult`]: an ordered set of named, typed
//! columns with one row per record of the API response. Cell types are
//! decided per field while the table is built, and a tool can declare
//! [`ColumnHint`]s to coerce known columns (numeric strings, ISO dates) to
//! their real type.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// A declared target type for a named column
pub type ColumnHint = (&'static str, ColumnType);

/// Declared type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Every cell is null
    Null,
    Bool,
    Int,
    Float,
    Text,
    Date,
    Timestamp,
    /// Nested arrays or objects
    Json,
    /// Cells of incompatible scalar types
    Mixed,
}

/// A single cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ColumnValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Json(Value),
}

impl ColumnValue {
    /// Infer a cell from a raw JSON value
    ///
    /// Strings holding an RFC 3339 timestamp or a `YYYY-MM-DD` date become
    /// temporal cells; every other string stays text.
    pub fn infer(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            Value::String(s) => {
                if let Some(date) = parse_date(&s) {
                    Self::Date(date)
                } else if let Some(ts) = parse_timestamp(&s) {
                    Self::Timestamp(ts)
                } else {
                    Self::Text(s)
                }
            }
            nested @ (Value::Array(_) | Value::Object(_)) => Self::Json(nested),
        }
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::Null => ColumnType::Null,
            Self::Bool(_) => ColumnType::Bool,
            Self::Int(_) => ColumnType::Int,
            Self::Float(_) => ColumnType::Float,
            Self::Text(_) => ColumnType::Text,
            Self::Date(_) => ColumnType::Date,
            Self::Timestamp(_) => ColumnType::Timestamp,
            Self::Json(_) => ColumnType::Json,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert to `target`, yielding `Null` when the value cannot be represented
    pub fn cast(self, target: ColumnType) -> Self {
        match target {
            ColumnType::Null | ColumnType::Mixed => self,
            ColumnType::Bool => match self {
                Self::Bool(b) => Self::Bool(b),
                Self::Int(0) => Self::Bool(false),
                Self::Int(1) => Self::Bool(true),
                Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                    "true" => Self::Bool(true),
                    "false" => Self::Bool(false),
                    _ => Self::Null,
                },
                _ => Self::Null,
            },
            ColumnType::Int => match self {
                Self::Int(i) => Self::Int(i),
                Self::Bool(b) => Self::Int(i64::from(b)),
                Self::Float(f) => float_to_int(f),
                Self::Text(s) => {
                    let s = s.trim();
                    s.parse::<i64>().map_or_else(
                        |_| s.parse::<f64>().map_or(Self::Null, float_to_int),
                        Self::Int,
                    )
                }
                _ => Self::Null,
            },
            ColumnType::Float => match self {
                Self::Float(f) => Self::Float(f),
                Self::Int(i) => Self::Float(i as f64),
                Self::Bool(b) => Self::Float(if b { 1.0 } else { 0.0 }),
                Self::Text(s) => s
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map_or(Self::Null, Self::Float),
                _ => Self::Null,
            },
            ColumnType::Text => match self {
                Self::Null => Self::Null,
                Self::Text(s) => Self::Text(s),
                Self::Json(v) => Self::Text(v.to_string()),
                other => Self::Text(other.to_string()),
            },
            ColumnType::Date => match self {
                Self::Date(d) => Self::Date(d),
                Self::Timestamp(ts) => Self::Date(ts.date_naive()),
                Self::Text(s) => parse_date(&s)
                    .or_else(|| parse_timestamp(&s).map(|ts| ts.date_naive()))
                    .map_or(Self::Null, Self::Date),
                _ => Self::Null,
            },
            ColumnType::Timestamp => match self {
                Self::Timestamp(ts) => Self::Timestamp(ts),
                Self::Date(d) => midnight(d),
                Self::Text(s) => parse_timestamp(&s).map_or_else(
                    || parse_date(&s).map_or(Self::Null, midnight),
                    Self::Timestamp,
                ),
                _ => Self::Null,
            },
            ColumnType::Json => match self {
                Self::Null => Self::Null,
                Self::Json(v) => Self::Json(v),
                other => Self::Json(other.to_json()),
            },
        }
    }

    /// Render back to JSON
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::Text(s) => Value::String(s.clone()),
            Self::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            Self::Timestamp(ts) => Value::String(format_timestamp(ts)),
            Self::Json(v) => v.clone(),
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Timestamp(ts) => f.write_str(&format_timestamp(ts)),
            Self::Json(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for ColumnValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Self::Float(_) => serializer.serialize_none(),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Date(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            Self::Timestamp(ts) => serializer.serialize_str(&format_timestamp(ts)),
            Self::Json(v) => v.serialize(serializer),
        }
    }
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub dtype: ColumnType,
}

/// In-memory columnar table returned by every tool
///
/// Columns are the union of record keys in first-seen order; rows keep the
/// order of the API response. A record missing a key gets `Null` in that
/// column. The table is immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabularResult {
    columns: Vec<Column>,
    rows: Vec<Vec<ColumnValue>>,
}

impl TabularResult {
    /// A table with no columns and no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from JSON records, applying column hints
    ///
    /// Hints naming a column that does not appear in any record are ignored.
    pub fn from_records(records: Vec<Map<String, Value>>, hints: &[ColumnHint]) -> Self {
        let mut names: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for record in &records {
            for key in record.keys() {
                if !index.contains_key(key) {
                    index.insert(key.clone(), names.len());
                    names.push(key.clone());
                }
            }
        }

        let mut rows: Vec<Vec<ColumnValue>> = records
            .into_iter()
            .map(|record| {
                let mut row = vec![ColumnValue::Null; names.len()];
                for (key, value) in record {
                    if let Some(&col) = index.get(&key) {
                        row[col] = ColumnValue::infer(value);
                    }
                }
                row
            })
            .collect();

        let mut declared: Vec<Option<ColumnType>> = vec![None; names.len()];
        for &(name, dtype) in hints {
            let Some(&col) = index.get(name) else {
                continue;
            };
            for row in &mut rows {
                let cell = std::mem::take(&mut row[col]);
                row[col] = cell.cast(dtype);
            }
            declared[col] = Some(dtype);
        }

        let columns = names
            .into_iter()
            .enumerate()
            .map(|(col, name)| {
                let dtype = declared[col].unwrap_or_else(|| unify_column(&mut rows, col));
                Column { name, dtype }
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn rows(&self) -> &[Vec<ColumnValue>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column called `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Declared type of the column called `name`
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.column_index(name).map(|i| self.columns[i].dtype)
    }

    /// All cells of the column called `name`, in row order
    pub fn column(&self, name: &str) -> Option<Vec<&ColumnValue>> {
        let col = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[col]).collect())
    }

    /// The cell at `row` in the column called `name`
    pub fn get(&self, row: usize, name: &str) -> Option<&ColumnValue> {
        let col = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[col])
    }

    /// Rows as JSON objects keyed by column name
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(column, cell)| (column.name.clone(), cell.to_json()))
                    .collect()
            })
            .collect()
    }
}

impl Serialize for TabularResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TabularResult", 3)?;
        state.serialize_field("columns", &self.columns)?;
        state.serialize_field("rows", &self.rows)?;
        state.serialize_field("row_count", &self.rows.len())?;
        state.end()
    }
}

/// Serializes a table as a list of records instead of columns + rows
pub struct Records<'a>(pub &'a TabularResult);

impl Serialize for Records<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        let table = self.0;
        let mut seq = serializer.serialize_seq(Some(table.rows.len()))?;
        for row in &table.rows {
            seq.serialize_element(&RecordRef {
                columns: &table.columns,
                row,
            })?;
        }
        seq.end()
    }
}

struct RecordRef<'a> {
    columns: &'a [Column],
    row: &'a [ColumnValue],
}

impl Serialize for RecordRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.row) {
            map.serialize_entry(&column.name, cell)?;
        }
        map.end()
    }
}

/// Decide the type of an unhinted column; ints are widened when mixed with floats
fn unify_column(rows: &mut [Vec<ColumnValue>], col: usize) -> ColumnType {
    let mut unified = ColumnType::Null;
    for row in rows.iter() {
        let dtype = row[col].column_type();
        unified = match (unified, dtype) {
            (_, ColumnType::Null) => unified,
            (ColumnType::Null, t) => t,
            (a, b) if a == b => a,
            (ColumnType::Int | ColumnType::Float, ColumnType::Int | ColumnType::Float) => {
                ColumnType::Float
            }
            _ => return ColumnType::Mixed,
        };
    }

    if unified == ColumnType::Float {
        for row in rows.iter_mut() {
            if let ColumnValue::Int(i) = row[col] {
                row[col] = ColumnValue::Float(i as f64);
            }
        }
    }
    unified
}

fn float_to_int(f: f64) -> ColumnValue {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        ColumnValue::Int(f as i64)
    } else {
        ColumnValue::Null
    }
}

fn midnight(date: NaiveDate) -> ColumnValue {
    date.and_hms_opt(0, 0, 0)
        .map_or(ColumnValue::Null, |dt| ColumnValue::Timestamp(dt.and_utc()))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
