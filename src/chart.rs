use crate::aggregate::{AggregatedTable, CategoryOrders};
use crate::error::{ChartError, Result};
use crate::selection::Selection;
use serde::Serialize;

/// Marker diameter (px-equivalent) the largest bubble should reach
const MAX_BUBBLE_SIZE: f64 = 40.0;

/// Floor on rendered marker size so near-zero counts stay visible
pub const SIZE_MIN: f64 = 4.0;

/// Declarative bubble chart specification. Derived, never mutated after
/// construction; the rendering surface consumes it blindly.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x: AxisSpec,
    pub y: AxisSpec,
    pub color: Option<EncodingSpec>,
    pub facet_col: Option<EncodingSpec>,
    pub facet_row: Option<EncodingSpec>,
    pub sizing: MarkerSizing,
    pub show_legend: bool,
    pub points: Vec<BubblePoint>,
}

/// Axis binding: field name plus its full category order.
/// The axis type is always categorical, regardless of label content.
#[derive(Debug, Clone, Serialize)]
pub struct AxisSpec {
    pub field: String,
    #[serde(rename = "type")]
    pub axis_type: AxisType,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxisType {
    #[serde(rename = "category")]
    Category,
}

/// Non-axis encoding (color or facet): field plus its category order
#[derive(Debug, Clone, Serialize)]
pub struct EncodingSpec {
    pub field: String,
    pub categories: Vec<String>,
}

/// Area-proportional marker sizing, normalized by a single global maximum
/// so bubble areas compare across all facet panels of one figure.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerSizing {
    pub mode: SizeMode,
    pub sizeref: f64,
    pub sizemin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SizeMode {
    #[serde(rename = "area")]
    Area,
}

/// One aggregated combination with its role values resolved
#[derive(Debug, Clone, Serialize)]
pub struct BubblePoint {
    pub x: String,
    pub y: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_col: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_row: Option<String>,
    pub count: f64,
}

/// Build the chart specification for an aggregated table and a selection.
///
/// Category orders are read verbatim from the precomputed order table;
/// they are never recomputed from the aggregated subset, so toggling
/// facets or color does not reshuffle axes or legends. An empty
/// aggregation produces a valid spec with no points and sizeref 0.
pub fn build_spec(
    agg: &AggregatedTable,
    selection: &Selection,
    orders: &CategoryOrders,
) -> Result<ChartSpec> {
    let x = axis_spec(&selection.x, orders)?;
    let y = axis_spec(&selection.y, orders)?;

    let color = selection
        .color
        .as_deref()
        .map(|col| encoding_spec(col, orders))
        .transpose()?;
    let facet_col = selection
        .facet_col
        .as_deref()
        .map(|col| encoding_spec(col, orders))
        .transpose()?;
    let facet_row = selection
        .facet_row
        .as_deref()
        .map(|col| encoding_spec(col, orders))
        .transpose()?;

    let points = resolve_points(agg, selection)?;

    let sizing = MarkerSizing {
        mode: SizeMode::Area,
        sizeref: 2.0 * agg.max_count() / (MAX_BUBBLE_SIZE * MAX_BUBBLE_SIZE),
        sizemin: SIZE_MIN,
    };

    Ok(ChartSpec {
        title: "Interactive Bubble Chart - Size shows record count".to_string(),
        x,
        y,
        show_legend: color.is_some(),
        color,
        facet_col,
        facet_row,
        sizing,
        points,
    })
}

fn axis_spec(column: &str, orders: &CategoryOrders) -> Result<AxisSpec> {
    Ok(AxisSpec {
        field: column.to_string(),
        axis_type: AxisType::Category,
        categories: lookup_order(column, orders)?,
    })
}

fn encoding_spec(column: &str, orders: &CategoryOrders) -> Result<EncodingSpec> {
    Ok(EncodingSpec {
        field: column.to_string(),
        categories: lookup_order(column, orders)?,
    })
}

fn lookup_order(column: &str, orders: &CategoryOrders) -> Result<Vec<String>> {
    orders
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(column))
        .map(|(_, labels)| labels.clone())
        .ok_or_else(|| ChartError::InvalidDimension(column.to_string()))
}

/// Flatten aggregated rows into per-point role values
fn resolve_points(agg: &AggregatedTable, selection: &Selection) -> Result<Vec<BubblePoint>> {
    let dim_index = |col: &str| {
        agg.dimension_index(col)
            .ok_or_else(|| ChartError::InvalidDimension(col.to_string()))
    };

    let x_idx = dim_index(&selection.x)?;
    let y_idx = dim_index(&selection.y)?;
    let color_idx = selection.color.as_deref().map(&dim_index).transpose()?;
    let facet_col_idx = selection.facet_col.as_deref().map(&dim_index).transpose()?;
    let facet_row_idx = selection.facet_row.as_deref().map(&dim_index).transpose()?;

    let points = agg
        .rows
        .iter()
        .map(|row| BubblePoint {
            x: row.values[x_idx].clone(),
            y: row.values[y_idx].clone(),
            color: color_idx.map(|i| row.values[i].clone()),
            facet_col: facet_col_idx.map(|i| row.values[i].clone()),
            facet_row: facet_row_idx.map(|i| row.values[i].clone()),
            count: row.count,
        })
        .collect();

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, category_orders};
    use crate::data::Table;

    fn make_table() -> Table {
        Table::new(
            vec![
                "Category1".to_string(),
                "Category2".to_string(),
                "Category3".to_string(),
                "Profiles".to_string(),
            ],
            vec![
                vec!["A".to_string(), "X".to_string(), "M".to_string(), "1".to_string()],
                vec!["A".to_string(), "X".to_string(), "N".to_string(), "1".to_string()],
                vec!["A".to_string(), "Y".to_string(), "M".to_string(), "1".to_string()],
                vec!["B".to_string(), "X".to_string(), "M".to_string(), "1".to_string()],
            ],
        )
    }

    fn spec_for(selection: &Selection) -> ChartSpec {
        let table = make_table();
        let orders = category_orders(&table, "Profiles");
        let agg = aggregate(&table, &selection.dimensions(), "Profiles").unwrap();
        build_spec(&agg, selection, &orders).unwrap()
    }

    #[test]
    fn test_axes_forced_categorical_with_full_order() {
        let spec = spec_for(&Selection::new("Category1", "Category2"));
        assert_eq!(spec.x.axis_type, AxisType::Category);
        assert_eq!(spec.x.categories, vec!["A", "B"]);
        assert_eq!(spec.y.categories, vec!["X", "Y"]);
    }

    #[test]
    fn test_color_none_disables_legend() {
        let spec = spec_for(&Selection::new("Category1", "Category2"));
        assert!(spec.color.is_none());
        assert!(!spec.show_legend);
    }

    #[test]
    fn test_color_set_enables_legend() {
        let mut selection = Selection::new("Category1", "Category2");
        selection.color = Some("Category3".to_string());
        let spec = spec_for(&selection);
        let color = spec.color.expect("color encoding");
        assert_eq!(color.field, "Category3");
        assert_eq!(color.categories, vec!["M", "N"]);
        assert!(spec.show_legend);
    }

    #[test]
    fn test_facets_resolved_per_point() {
        let mut selection = Selection::new("Category1", "Category2");
        selection.facet_col = Some("Category3".to_string());
        let spec = spec_for(&selection);
        assert_eq!(spec.facet_col.as_ref().unwrap().field, "Category3");
        assert!(spec.facet_row.is_none());
        assert!(spec.points.iter().all(|p| p.facet_col.is_some()));
        assert!(spec.points.iter().all(|p| p.facet_row.is_none()));
    }

    #[test]
    fn test_sizeref_formula() {
        // Max combination count in make_table is 1 per (C1, C2, C3) tuple;
        // group only on Category1 so A sums to 3
        let selection = Selection::new("Category1", "Category1");
        let spec = spec_for(&selection);
        assert_eq!(spec.sizing.sizeref, 2.0 * 3.0 / 1600.0);
        assert_eq!(spec.sizing.sizemin, SIZE_MIN);
        assert_eq!(spec.sizing.mode, SizeMode::Area);
    }

    #[test]
    fn test_empty_aggregation_yields_valid_spec() {
        let empty = Table::new(
            vec!["Category1".to_string(), "Category2".to_string(), "Profiles".to_string()],
            vec![],
        );
        // Orders from a populated sibling table keep the axes meaningful
        let mut orders = CategoryOrders::new();
        orders.insert("Category1".to_string(), vec!["A".to_string()]);
        orders.insert("Category2".to_string(), vec!["X".to_string()]);

        let selection = Selection::new("Category1", "Category2");
        let agg = aggregate(&empty, &selection.dimensions(), "Profiles").unwrap();
        let spec = build_spec(&agg, &selection, &orders).unwrap();
        assert!(spec.points.is_empty());
        assert_eq!(spec.sizing.sizeref, 0.0);
    }

    #[test]
    fn test_unknown_role_column() {
        let table = make_table();
        let orders = category_orders(&table, "Profiles");
        let selection = Selection::new("Category1", "Category2");
        let agg = aggregate(&table, &selection.dimensions(), "Profiles").unwrap();

        let mut bad = selection.clone();
        bad.color = Some("Category9".to_string());
        let err = build_spec(&agg, &bad, &orders).unwrap_err();
        assert!(matches!(err, ChartError::InvalidDimension(_)));
    }

    #[test]
    fn test_spec_serializes() {
        let mut selection = Selection::new("Category1", "Category2");
        selection.color = Some("Category3".to_string());
        let spec = spec_for(&selection);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["x"]["type"], "category");
        assert_eq!(json["sizing"]["mode"], "area");
        assert_eq!(json["show_legend"], true);
        assert!(json["points"].as_array().unwrap().len() > 0);
    }
}
