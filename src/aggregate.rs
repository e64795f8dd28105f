use crate::data::Table;
use crate::error::{ChartError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Full sorted label set per column, keyed by column name.
/// Always derived from the complete table, never from an aggregated
/// subset, so axis and legend ordering stay stable across selections.
pub type CategoryOrders = BTreeMap<String, Vec<String>>;

/// One row per distinct dimension-value combination, with summed count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedTable {
    pub dimensions: Vec<String>,
    pub rows: Vec<AggRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggRow {
    pub values: Vec<String>,
    pub count: f64,
}

impl AggregatedTable {
    /// Position of a dimension within each row's value tuple
    pub fn dimension_index(&self, name: &str) -> Option<usize> {
        self.dimensions.iter().position(|d| d.eq_ignore_ascii_case(name))
    }

    pub fn max_count(&self) -> f64 {
        self.rows.iter().map(|r| r.count).fold(0.0, f64::max)
    }

    pub fn total_count(&self) -> f64 {
        self.rows.iter().map(|r| r.count).sum()
    }
}

/// Group rows by the tuple of values across `dimensions` and sum the count
/// column per group. Every input row lands in exactly one group; tuples
/// that never occur are simply absent (no zero-filling). Output rows are
/// sorted by value tuple for deterministic downstream ordering.
pub fn aggregate(table: &Table, dimensions: &[String], count_column: &str) -> Result<AggregatedTable> {
    if dimensions.is_empty() {
        return Err(ChartError::NoDimensions);
    }

    let mut dim_indices = Vec::with_capacity(dimensions.len());
    for dim in dimensions {
        let idx = table
            .column_index(dim)
            .ok_or_else(|| ChartError::InvalidDimension(dim.clone()))?;
        dim_indices.push(idx);
    }

    let count_idx = table
        .column_index(count_column)
        .ok_or_else(|| ChartError::InvalidDimension(count_column.to_string()))?;

    let mut groups: HashMap<Vec<String>, f64> = HashMap::new();
    for row in &table.rows {
        let key: Vec<String> = dim_indices.iter().map(|&i| row[i].clone()).collect();
        let count = row[count_idx]
            .parse::<f64>()
            .map_err(|_| ChartError::BadCount {
                column: count_column.to_string(),
                value: row[count_idx].clone(),
            })?;
        *groups.entry(key).or_insert(0.0) += count;
    }

    let mut rows: Vec<AggRow> = groups
        .into_iter()
        .map(|(values, count)| AggRow { values, count })
        .collect();
    rows.sort_by(|a, b| a.values.cmp(&b.values));

    Ok(AggregatedTable {
        dimensions: dimensions.to_vec(),
        rows,
    })
}

/// Sorted distinct labels for every column except the count column
pub fn category_orders(table: &Table, count_column: &str) -> CategoryOrders {
    let mut orders = CategoryOrders::new();
    for (idx, header) in table.headers.iter().enumerate() {
        if header.eq_ignore_ascii_case(count_column) {
            continue;
        }
        let labels: BTreeSet<String> = table.rows.iter().map(|r| r[idx].clone()).collect();
        orders.insert(header.clone(), labels.into_iter().collect());
    }
    orders
}
