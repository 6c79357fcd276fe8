//! Type definitions for exported grid data

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Text form used for date/time cells
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Represents a single cell value in an exported row
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellValue {
    /// Missing or null value
    Empty,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Date/time value
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Flatten the value to the text that gets exported.
    ///
    /// `Empty` becomes the empty string, never a placeholder word.
    pub fn as_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::String(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(d) => d.format(DATE_TIME_FORMAT).to_string(),
        }
    }

    /// Check if cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::DateTime(_) => 3,
            CellValue::String(_) => 4,
        }
    }

    /// Total order used when applying grid sort expressions.
    ///
    /// Empty values sort first; numbers compare numerically across
    /// `Int`/`Float`; values of different kinds are ordered by kind.
    pub fn compare(&self, other: &CellValue, ignore_case: bool) -> Ordering {
        match (self, other) {
            (CellValue::String(a), CellValue::String(b)) => {
                if ignore_case {
                    a.to_lowercase().cmp(&b.to_lowercase())
                } else {
                    a.cmp(b)
                }
            }
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64).total_cmp(b),
            (CellValue::Float(a), CellValue::Int(b)) => a.total_cmp(&(*b as f64)),
            (CellValue::Float(a), CellValue::Float(b)) => a.total_cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i as i64)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(d: NaiveDateTime) -> Self {
        CellValue::DateTime(d)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

/// Key/value record in field insertion order
pub type Record = IndexMap<String, CellValue>;

/// Build a record from `(field, value)` pairs
pub fn record<I, K, V>(pairs: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<CellValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// One input row: a record, or a bare scalar for headerless exports
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RowData {
    Record(Record),
    Scalar(CellValue),
}

impl RowData {
    /// Value of `field`, or `Empty` when the field is absent
    pub fn value(&self, field: &str) -> &CellValue {
        match self {
            RowData::Record(r) => r.get(field).unwrap_or(&CellValue::Empty),
            RowData::Scalar(v) => v,
        }
    }
}

impl From<Record> for RowData {
    fn from(r: Record) -> Self {
        RowData::Record(r)
    }
}

impl From<CellValue> for RowData {
    fn from(v: CellValue) -> Self {
        RowData::Scalar(v)
    }
}

/// Column as supplied by the grid
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnDescriptor {
    /// Record key the column reads
    pub field: String,
    /// Display label; blank falls back to `field`
    pub header: String,
    pub hidden: bool,
    pub pinned: bool,
    /// Declaration index
    pub index: usize,
    /// Position among visible columns; `None` while hidden
    pub visible_index: Option<usize>,
}

impl ColumnDescriptor {
    /// Create a visible, unpinned column declared at `index`
    pub fn new(field: impl Into<String>, index: usize) -> Self {
        ColumnDescriptor {
            field: field.into(),
            header: String::new(),
            hidden: false,
            pinned: false,
            index,
            visible_index: Some(index),
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Mark the column hidden; hidden columns have no visible index
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self.visible_index = None;
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn with_visible_index(mut self, visible_index: usize) -> Self {
        self.visible_index = Some(visible_index);
        self
    }

    /// Header text as exported
    pub fn display_header(&self) -> &str {
        if self.header.trim().is_empty() {
            &self.field
        } else {
            &self.header
        }
    }
}

/// Resolved column for one export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportColumn {
    pub header: String,
    pub field: String,
    /// Omitted from output but keeps its slot in the resolved list
    pub skip: bool,
    pub pinned: bool,
}

impl ExportColumn {
    pub fn new(header: impl Into<String>, field: impl Into<String>) -> Self {
        ExportColumn {
            header: header.into(),
            field: field.into(),
            skip: false,
            pinned: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort applied by the grid
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SortExpression {
    pub field: String,
    pub direction: SortDirection,
    pub ignore_case: bool,
}

impl SortExpression {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        SortExpression {
            field: field.into(),
            direction,
            ignore_case: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_cell_value_to_string() {
        assert_eq!(CellValue::Empty.as_string(), "");
        assert_eq!(CellValue::Int(42).as_string(), "42");
        assert_eq!(CellValue::Float(30.0).as_string(), "30");
        assert_eq!(CellValue::Float(1234.56).as_string(), "1234.56");
        assert_eq!(CellValue::Bool(true).as_string(), "true");

        let date = NaiveDate::from_ymd_opt(2018, 4, 23)
            .unwrap()
            .and_hms_opt(10, 5, 0)
            .unwrap();
        assert_eq!(CellValue::DateTime(date).as_string(), "2018-04-23 10:05:00");
    }

    #[test]
    fn test_absent_field_is_empty() {
        let row = RowData::Record(record([("name", "Donna Price")]));
        assert_eq!(row.value("phone"), &CellValue::Empty);
        assert_eq!(row.value("phone").as_string(), "");
    }

    #[test]
    fn test_header_fallback() {
        let col = ColumnDescriptor::new("JobTitle", 0).with_header("  ");
        assert_eq!(col.display_header(), "JobTitle");

        let col = ColumnDescriptor::new("JobTitle", 0).with_header("Job title");
        assert_eq!(col.display_header(), "Job title");
    }

    #[test]
    fn test_compare_mixed_numbers() {
        assert_eq!(
            CellValue::Int(2).compare(&CellValue::Float(10.5), false),
            Ordering::Less
        );
        assert_eq!(
            CellValue::from("abc").compare(&CellValue::from("ABC"), true),
            Ordering::Equal
        );
        assert_eq!(
            CellValue::Empty.compare(&CellValue::Int(0), false),
            Ordering::Less
        );
    }

    #[test]
    fn test_option_conversion() {
        let none: Option<&str> = None;
        assert_eq!(CellValue::from(none), CellValue::Empty);
        assert_eq!(CellValue::from(Some(5i64)), CellValue::Int(5));
    }
}
