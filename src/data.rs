use crate::error::{PlotError, Result};
use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One data record, one field per header column.
pub type Row = Vec<String>;

/// Header given to the X column synthesized when the source has none.
pub const SYNTHETIC_X_COLUMN: &str = "_";

/// Position of the X column once [`PlotData::with_x_column`] has run.
pub const X_INDEX: usize = 0;

#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl PlotData {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Load a data file, picking the JSON loader for `.json` files and CSV
    /// for everything else.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            let value: Value = serde_json::from_reader(reader)?;
            Self::from_json(&value)
        } else {
            Self::from_csv_reader(reader)
        }
    }

    /// Read CSV records; the first record is the header.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(reader);

        let mut records = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            records.push(record.iter().map(str::to_string).collect());
        }

        Self::from_records(records)
    }

    /// Split raw records into header and rows. A header without any row is
    /// nothing to plot.
    pub fn from_records(mut records: Vec<Row>) -> Result<Self> {
        if records.len() < 2 {
            return Err(PlotError::NoData);
        }
        let headers = records.remove(0);
        Ok(Self::new(headers, records))
    }

    /// Create PlotData from a JSON Array of Objects
    pub fn from_json(value: &Value) -> Result<Self> {
        let array = value.as_array().ok_or_else(|| {
            PlotError::InvalidConfig("input data must be a JSON array of objects".to_string())
        })?;

        let Some(first) = array.first() else {
            return Err(PlotError::NoData);
        };

        // Headers come from the first object, in document order
        let first_obj = first.as_object().ok_or_else(|| {
            PlotError::InvalidConfig("items in array must be objects".to_string())
        })?;
        let headers: Vec<String> = first_obj.keys().cloned().collect();

        let mut rows = Vec::with_capacity(array.len());
        for item in array {
            let obj = item.as_object().ok_or_else(|| {
                PlotError::InvalidConfig("items in array must be objects".to_string())
            })?;

            let row = headers
                .iter()
                .map(|header| match obj.get(header) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    Some(Value::Bool(b)) => b.to_string(),
                    // Arrays, objects and nulls are not numbers; leave the cell
                    // empty so it drops out like any other unparsable field.
                    _ => String::new(),
                })
                .collect();
            rows.push(row);
        }

        Ok(Self::new(headers, rows))
    }

    /// Make sure the X values sit in column [`X_INDEX`].
    ///
    /// With `x_from_data` the first source column already holds X. Otherwise a
    /// [`SYNTHETIC_X_COLUMN`] numbered from 1 is prepended.
    pub fn with_x_column(mut self, x_from_data: bool) -> Self {
        if x_from_data {
            return self;
        }

        self.headers.insert(X_INDEX, SYNTHETIC_X_COLUMN.to_string());
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.insert(X_INDEX, (i + 1).to_string());
        }
        debug!("synthesized X column for {} rows", self.rows.len());
        self
    }

    pub fn column_index(&self) -> ColumnIndex {
        ColumnIndex::from_headers(&self.headers)
    }
}

/// Column name to row position. A repeated name resolves to its last
/// occurrence.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn from_headers(headers: &[String]) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { positions }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }
}

/// Parse a cell as a finite number. Surrounding whitespace is ignored.
pub fn parse_number(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
