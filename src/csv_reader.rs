// CSV ingestion for the CLI (headered CSV on stdin)

use anyhow::{anyhow, Context, Result};
use std::io::Read;

#[derive(Debug, Clone)]
pub struct CsvData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn read_csv_from_stdin() -> Result<CsvData> {
    read_csv(std::io::stdin().lock())
}

pub fn read_csv<R: Read>(input: R) -> Result<CsvData> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to read CSV record")?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    if rows.is_empty() {
        return Err(anyhow!("CSV input must contain at least one data row"));
    }

    Ok(CsvData { headers, rows })
}
