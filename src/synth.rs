// Synthetic profile table generator (upstream data source for the CLI)

use crate::data::Table;
use rand::distributions::WeightedIndex;
use rand::prelude::*;

/// Name of the per-record count column (constant 1 per synthetic row)
pub const COUNT_COLUMN: &str = "Profiles";

/// Categorical columns with their label domains and sampling weights.
/// Deliberately skewed so aggregated bubble sizes vary visibly.
const PROFILE_COLUMNS: &[(&str, &[(&str, f64)])] = &[
    ("Category1", &[("A", 0.8), ("B", 0.15), ("C", 0.05)]),
    ("Category2", &[("X", 0.1), ("Y", 0.2), ("Z", 0.7)]),
    ("Category3", &[("M", 0.9), ("N", 0.1)]),
    ("Category4", &[("P", 0.4), ("Q", 0.3), ("R", 0.2), ("S", 0.1)]),
    ("Category5", &[("Alpha", 0.6), ("Beta", 0.3), ("Gamma", 0.1)]),
];

/// Generate a table of `rows` synthetic records. The same seed always
/// yields the same table.
pub fn profile_table(rows: usize, seed: u64) -> Table {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut headers: Vec<String> = PROFILE_COLUMNS.iter().map(|(name, _)| name.to_string()).collect();
    headers.push(COUNT_COLUMN.to_string());

    let samplers: Vec<WeightedIndex<f64>> = PROFILE_COLUMNS
        .iter()
        .map(|(_, choices)| {
            // Weights are compile-time constants, all positive
            WeightedIndex::new(choices.iter().map(|(_, w)| *w)).unwrap()
        })
        .collect();

    let mut table_rows = Vec::with_capacity(rows);
    for _ in 0..rows {
        let mut row: Vec<String> = PROFILE_COLUMNS
            .iter()
            .zip(&samplers)
            .map(|((_, choices), sampler)| choices[sampler.sample(&mut rng)].0.to_string())
            .collect();
        row.push("1".to_string());
        table_rows.push(row);
    }

    Table::new(headers, table_rows)
}

/// Column names selectable as chart dimensions
pub fn dimension_names() -> Vec<String> {
    PROFILE_COLUMNS.iter().map(|(name, _)| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_table_shape() {
        let table = profile_table(1000, 42);
        assert_eq!(table.rows.len(), 1000);
        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.headers.last().map(String::as_str), Some(COUNT_COLUMN));
    }

    #[test]
    fn test_labels_within_domain() {
        let table = profile_table(200, 7);
        let c1 = table.column_index("Category1").unwrap();
        let c3 = table.column_index("Category3").unwrap();
        let count = table.column_index(COUNT_COLUMN).unwrap();
        for row in &table.rows {
            assert!(["A", "B", "C"].contains(&row[c1].as_str()));
            assert!(["M", "N"].contains(&row[c3].as_str()));
            assert_eq!(row[count], "1");
        }
    }

    #[test]
    fn test_same_seed_same_table() {
        assert_eq!(profile_table(100, 42), profile_table(100, 42));
    }

    #[test]
    fn test_different_seed_different_table() {
        assert_ne!(profile_table(100, 1), profile_table(100, 2));
    }
}
