use crate::selection::Role;
use thiserror::Error;

/// Errors surfaced by the aggregation and chart-spec pipeline.
///
/// Ingestion and rendering edges use `anyhow`; these variants cover the
/// contract violations the core checks for itself.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A selection or grouping list referenced a column that does not exist.
    #[error("unknown dimension '{0}'")]
    InvalidDimension(String),

    /// The grouping dimension list was empty.
    #[error("at least one grouping dimension is required")]
    NoDimensions,

    /// An attempt to clear a role that must always carry a dimension.
    #[error("role '{0}' requires a dimension")]
    RoleRequired(Role),

    /// The count column held a value that does not parse as a number.
    #[error("count column '{column}' holds non-numeric value '{value}'")]
    BadCount { column: String, value: String },
}

pub type Result<T> = std::result::Result<T, ChartError>;
