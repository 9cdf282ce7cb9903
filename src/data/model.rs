use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::FrameError;

// ---------------------------------------------------------------------------
// Value – a single cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a CSV reader infers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Null,
}

impl Value {
    /// Guess the type of a raw CSV field.
    pub fn guess(s: &str) -> Self {
        if s.is_empty() {
            return Value::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
        if s == "true" || s == "false" {
            return Value::Bool(s == "true");
        }
        Value::String(s.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

// ---------------------------------------------------------------------------
// Column / Frame – one loaded CSV file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }
}

/// Column-oriented table: every column has the same number of rows.
///
/// Serializes as a JSON object `{ column: [cells...] }` in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    columns: Vec<Column>,
    rows: usize,
}

impl Frame {
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, FrameError> {
        let rows = columns.first().map_or(0, |c| c.values.len());
        if let Some(bad) = columns.iter().find(|c| c.values.len() != rows) {
            return Err(FrameError::LengthMismatch {
                column: bad.name.clone(),
                expected: rows,
                actual: bad.values.len(),
            });
        }
        Ok(Frame { columns, rows })
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Broadcast `value` to every row of column `name`.
    ///
    /// An existing column keeps its position and is overwritten; otherwise
    /// the column is appended.
    pub fn set_scalar(&mut self, name: &str, value: Value) {
        let values = vec![value; self.rows];
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(col) => col.values = values,
            None => self.columns.push(Column::new(name, values)),
        }
    }

    /// Arithmetic mean over every cell in the frame, all columns flattened.
    ///
    /// Null cells are skipped. Any other non-numeric cell is an error.
    pub fn mean(&self) -> Result<f64, FrameError> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for col in &self.columns {
            for (row, value) in col.values.iter().enumerate() {
                match value {
                    Value::Null => {}
                    v => {
                        let x = v.as_f64().ok_or_else(|| FrameError::NonNumeric {
                            column: col.name.clone(),
                            row,
                            value: v.to_string(),
                        })?;
                        sum += x;
                        count += 1;
                    }
                }
            }
        }
        if count == 0 {
            return Err(FrameError::Empty);
        }
        Ok(sum / count as f64)
    }
}

impl Serialize for Frame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for col in &self.columns {
            map.serialize_entry(&col.name, &col.values)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// AlgorithmData – the loader's result
// ---------------------------------------------------------------------------

/// Algorithm name → one frame per benchmarked table, each tagged with its
/// source table. Never holds an empty list.
pub type AlgorithmData = BTreeMap<String, Vec<Frame>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(cols: Vec<(&str, Vec<f64>)>) -> Frame {
        Frame::from_columns(
            cols.into_iter()
                .map(|(name, vals)| Column::new(name, vals.into_iter().map(Value::Float).collect()))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn guess_cell_types() {
        assert_eq!(Value::guess(""), Value::Null);
        assert_eq!(Value::guess("42"), Value::Integer(42));
        assert_eq!(Value::guess("4.5"), Value::Float(4.5));
        assert_eq!(Value::guess("true"), Value::Bool(true));
        assert_eq!(Value::guess("open_ai"), Value::from("open_ai"));
    }

    #[test]
    fn mean_flattens_all_columns() {
        let f = frame(vec![("a", vec![1.0, 2.0]), ("b", vec![3.0, 6.0])]);
        assert_eq!(f.mean().unwrap(), 3.0);
    }

    #[test]
    fn mean_rejects_text_and_empty() {
        let f = Frame::from_columns(vec![Column::new("a", vec![Value::Integer(1), "x".into()])])
            .unwrap();
        assert!(matches!(
            f.mean(),
            Err(FrameError::NonNumeric { row: 1, .. })
        ));

        let empty = Frame::from_columns(vec![Column::new("a", vec![])]).unwrap();
        assert_eq!(empty.mean(), Err(FrameError::Empty));
    }

    #[test]
    fn mean_skips_nulls() {
        let f = Frame::from_columns(vec![Column::new(
            "a",
            vec![Value::Integer(10), Value::Null, Value::Integer(20)],
        )])
        .unwrap();
        assert_eq!(f.mean().unwrap(), 15.0);
    }

    #[test]
    fn set_scalar_appends_then_overwrites() {
        let mut f = frame(vec![("cells", vec![1.0, 2.0, 3.0])]);
        f.set_scalar("source", "open_ai".into());
        assert_eq!(f.column_names().collect::<Vec<_>>(), ["cells", "source"]);
        assert_eq!(f.column("source").unwrap().values.len(), 3);

        f.set_scalar("cells", Value::Integer(0));
        assert_eq!(f.column_names().collect::<Vec<_>>(), ["cells", "source"]);
        assert!(f.column("cells").unwrap().values.iter().all(|v| *v == Value::Integer(0)));
    }

    #[test]
    fn ragged_columns_rejected() {
        let err = Frame::from_columns(vec![
            Column::new("a", vec![Value::Integer(1)]),
            Column::new("b", vec![]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            FrameError::LengthMismatch {
                column: "b".into(),
                expected: 1,
                actual: 0
            }
        );
    }

    #[test]
    fn frame_serializes_by_column() {
        let mut f = frame(vec![("cells", vec![1.0])]);
        f.set_scalar("source", "t".into());
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, r#"{"cells":[1.0],"source":["t"]}"#);
    }
}
