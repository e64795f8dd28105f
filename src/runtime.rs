// Reactive session: recompute the full pipeline on every control change

use crate::aggregate::{aggregate, category_orders, CategoryOrders};
use crate::chart::{build_spec, ChartSpec};
use crate::data::Table;
use crate::error::{ChartError, Result};
use crate::selection::{Role, Selection};

/// Callback receiving each freshly built chart spec
pub type SpecObserver = Box<dyn FnMut(&ChartSpec)>;

/// Pure pipeline: aggregate on the selection's dimensions, then derive
/// the chart specification.
pub fn run_pipeline(
    table: &Table,
    count_column: &str,
    selection: &Selection,
    orders: &CategoryOrders,
) -> Result<ChartSpec> {
    let agg = aggregate(table, &selection.dimensions(), count_column)?;
    build_spec(&agg, selection, orders)
}

/// One interactive chart over one read-only table.
///
/// Holds the current selection snapshot and the spec derived from it.
/// Each `assign` re-runs the pipeline start-to-finish; there is no
/// incremental update and no caching across selections. Category orders
/// are computed once at construction: the table cannot change underneath
/// the session, so this is observationally the same as recomputing them
/// per render.
pub struct Session {
    table: Table,
    count_column: String,
    orders: CategoryOrders,
    selection: Selection,
    current: ChartSpec,
    observers: Vec<SpecObserver>,
}

impl Session {
    pub fn new(table: Table, count_column: &str, selection: Selection) -> Result<Self> {
        selection.validate(&table)?;
        if table.column_index(count_column).is_none() {
            return Err(ChartError::InvalidDimension(count_column.to_string()));
        }

        let orders = category_orders(&table, count_column);
        let current = run_pipeline(&table, count_column, &selection, &orders)?;

        Ok(Self {
            table,
            count_column: count_column.to_string(),
            orders,
            selection,
            current,
            observers: Vec::new(),
        })
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.current
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn orders(&self) -> &CategoryOrders {
        &self.orders
    }

    /// Register an observer; it immediately receives the current spec
    pub fn observe(&mut self, mut observer: impl FnMut(&ChartSpec) + 'static) {
        observer(&self.current);
        self.observers.push(Box::new(observer));
    }

    /// Reassign one role and recompute. Commits atomically: on any error
    /// the previous selection and spec stay in place.
    pub fn assign(&mut self, role: Role, column: Option<String>) -> Result<&ChartSpec> {
        let mut next = self.selection.clone();
        next.assign(role, column)?;
        next.validate(&self.table)?;

        let spec = run_pipeline(&self.table, &self.count_column, &next, &self.orders)?;
        self.selection = next;
        self.current = spec;

        for observer in &mut self.observers {
            observer(&self.current);
        }
        Ok(&self.current)
    }
}
