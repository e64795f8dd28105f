use crate::data::Table;
use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chart function a dimension can be assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    X,
    Y,
    Color,
    FacetCol,
    FacetRow,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::X => "x",
            Role::Y => "y",
            Role::Color => "color",
            Role::FacetCol => "facet_col",
            Role::FacetRow => "facet_row",
        };
        write!(f, "{}", name)
    }
}

/// Snapshot of the user's role assignments.
///
/// x and y are always set; the remaining roles are genuinely optional.
/// The parser translates the dropdown-style "none" sentinel into `None`
/// before a Selection is ever constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub x: String,
    pub y: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub facet_col: Option<String>,
    #[serde(default)]
    pub facet_row: Option<String>,
}

impl Selection {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            color: None,
            facet_col: None,
            facet_row: None,
        }
    }

    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::X => Some(&self.x),
            Role::Y => Some(&self.y),
            Role::Color => self.color.as_deref(),
            Role::FacetCol => self.facet_col.as_deref(),
            Role::FacetRow => self.facet_row.as_deref(),
        }
    }

    /// Reassign one role. Clearing x or y is rejected: a bubble chart
    /// always has both axes.
    pub fn assign(&mut self, role: Role, column: Option<String>) -> Result<()> {
        match (role, column) {
            (Role::X, Some(col)) => self.x = col,
            (Role::Y, Some(col)) => self.y = col,
            (Role::X, None) | (Role::Y, None) => {
                return Err(ChartError::RoleRequired(role));
            }
            (Role::Color, col) => self.color = col,
            (Role::FacetCol, col) => self.facet_col = col,
            (Role::FacetRow, col) => self.facet_row = col,
        }
        Ok(())
    }

    /// Ordered grouping dimensions: x, y, then each optional role that is
    /// set, with duplicates removed. This is the list the aggregator
    /// groups by; color participates so the aggregated rows carry the
    /// color labels the legend needs.
    pub fn dimensions(&self) -> Vec<String> {
        let mut dims: Vec<String> = Vec::with_capacity(5);
        let candidates = [
            Some(self.x.as_str()),
            Some(self.y.as_str()),
            self.color.as_deref(),
            self.facet_col.as_deref(),
            self.facet_row.as_deref(),
        ];
        for col in candidates.into_iter().flatten() {
            if !dims.iter().any(|d| d.eq_ignore_ascii_case(col)) {
                dims.push(col.to_string());
            }
        }
        dims
    }

    /// Check that every assigned role names a real column
    pub fn validate(&self, table: &Table) -> Result<()> {
        for role in [Role::X, Role::Y, Role::Color, Role::FacetCol, Role::FacetRow] {
            if let Some(col) = self.get(role) {
                if table.column_index(col).is_none() {
                    return Err(ChartError::InvalidDimension(col.to_string()));
                }
            }
        }
        Ok(())
    }
}
