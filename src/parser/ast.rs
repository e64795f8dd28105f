// Commands recognized by the control-string DSL

/// One pipe-separated control command.
///
/// The dropdown-style `none` sentinel is translated to `None` here, at
/// the parse boundary; it never reaches the Selection type.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// bubble(x: col, y: col) — required axes
    Bubble { x: String, y: String },
    /// color(col) or color(none)
    Color(Option<String>),
    /// facet(col: a), facet(row: b), or facet(col: a, row: b)
    Facet {
        col: Option<String>,
        row: Option<String>,
    },
}
