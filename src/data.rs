use anyhow::{anyhow, Result};
use serde_json::Value;

/// In-memory record table: ordered rows over named categorical columns,
/// plus (by convention) one numeric count column. Cell values are kept as
/// strings; the aggregator parses the count column on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Create a Table from an existing CsvData struct (CLI support)
    pub fn from_csv(csv: crate::csv_reader::CsvData) -> Self {
        Self {
            headers: csv.headers,
            rows: csv.rows,
        }
    }

    /// Build a table from a JSON array of record objects. Column order
    /// comes from the first record; a record may omit a field (empty
    /// cell), but nested arrays and objects are rejected.
    pub fn from_json(value: &Value) -> Result<Self> {
        let records = value
            .as_array()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| anyhow!("expected a non-empty JSON array of records"))?;

        let headers: Vec<String> = records[0]
            .as_object()
            .ok_or_else(|| anyhow!("records must be JSON objects"))?
            .keys()
            .cloned()
            .collect();

        let rows = records
            .iter()
            .map(|record| {
                let obj = record
                    .as_object()
                    .ok_or_else(|| anyhow!("records must be JSON objects"))?;
                headers
                    .iter()
                    .map(|field| cell_text(field, obj.get(field)))
                    .collect()
            })
            .collect::<Result<Vec<Vec<String>>>>()?;

        Ok(Self { headers, rows })
    }

    /// Case-insensitive column lookup
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.eq_ignore_ascii_case(name))
    }
}

fn cell_text(field: &str, value: Option<&Value>) -> Result<String> {
    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::Null) | None => Ok(String::new()),
        Some(other) => Err(anyhow!("field '{}' holds unsupported JSON value {}", field, other)),
    }
}
