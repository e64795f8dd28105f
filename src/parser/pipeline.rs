// Pipeline parser: fold pipe-separated commands into a Selection

use super::ast::Command;
use super::command::parse_command;
use super::lexer::ws;
use crate::selection::Selection;
use nom::{
    bytes::complete::tag,
    error::{Error, ErrorKind},
    multi::separated_list0,
    IResult,
};

/// Parse a control string
/// Format: bubble(x: .., y: ..) | color(..) | facet(col: .., row: ..)
///
/// Unconsumed trailing input is returned to the caller rather than
/// rejected; the CLI warns about it.
pub fn parse_controls(input: &str) -> IResult<&str, Selection> {
    let (input, commands) = separated_list0(ws(tag("|")), parse_command)(input)?;

    // Fold commands into a Selection; later commands override earlier ones
    let mut selection: Option<Selection> = None;
    let mut color = None;
    let mut facet_col = None;
    let mut facet_row = None;

    for command in commands {
        match command {
            Command::Bubble { x, y } => selection = Some(Selection::new(x, y)),
            Command::Color(col) => color = col,
            Command::Facet { col, row } => {
                if col.is_some() {
                    facet_col = col;
                }
                if row.is_some() {
                    facet_row = row;
                }
            }
        }
    }

    // Validation: the axes command is mandatory
    let Some(mut selection) = selection else {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    };
    selection.color = color;
    selection.facet_col = facet_col;
    selection.facet_row = facet_row;

    Ok((input, selection))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_axes_only() {
        let (_, sel) = parse_controls("bubble(x: Category1, y: Category2)").unwrap();
        assert_eq!(sel.x, "Category1");
        assert_eq!(sel.y, "Category2");
        assert_eq!(sel.color, None);
        assert_eq!(sel.facet_col, None);
        assert_eq!(sel.facet_row, None);
    }

    #[test]
    fn test_parse_full_pipeline() {
        let input = "bubble(x: Category1, y: Category2) | color(Category3) | facet(col: Category4, row: Category5)";
        let (_, sel) = parse_controls(input).unwrap();
        assert_eq!(sel.color.as_deref(), Some("Category3"));
        assert_eq!(sel.facet_col.as_deref(), Some("Category4"));
        assert_eq!(sel.facet_row.as_deref(), Some("Category5"));
    }

    #[test]
    fn test_parse_color_none() {
        let (_, sel) = parse_controls("bubble(x: a, y: b) | color(none)").unwrap();
        assert_eq!(sel.color, None);
    }

    #[test]
    fn test_parse_separate_facet_commands() {
        let input = "bubble(x: a, y: b) | facet(col: c) | facet(row: d)";
        let (_, sel) = parse_controls(input).unwrap();
        assert_eq!(sel.facet_col.as_deref(), Some("c"));
        assert_eq!(sel.facet_row.as_deref(), Some("d"));
    }

    #[test]
    fn test_parse_later_command_overrides() {
        let input = "bubble(x: a, y: b) | color(c) | color(d)";
        let (_, sel) = parse_controls(input).unwrap();
        assert_eq!(sel.color.as_deref(), Some("d"));
    }

    #[test]
    fn test_parse_missing_bubble_fails() {
        assert!(parse_controls("color(Category3)").is_err());
    }

    #[test]
    fn test_parse_empty_input_fails() {
        assert!(parse_controls("").is_err());
    }

    #[test]
    fn test_parse_trailing_input_returned() {
        let (rest, sel) = parse_controls("bubble(x: a, y: b) trailing").unwrap();
        assert_eq!(sel.x, "a");
        assert_eq!(rest.trim(), "trailing");
    }

    #[test]
    fn test_parse_trailing_pipe_left_unconsumed() {
        let (rest, _) = parse_controls("bubble(x: a, y: b) |").unwrap();
        assert_eq!(rest.trim(), "|");
    }
}
