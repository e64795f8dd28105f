// Command parser for the control-string DSL

use super::ast::Command;
use super::lexer::{identifier, ws};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::opt,
    error::{Error, ErrorKind},
    sequence::preceded,
    IResult,
};

/// Parse the bubble command
/// Format: bubble(x: col, y: col)
pub fn parse_bubble(input: &str) -> IResult<&str, Command> {
    let (input, _) = ws(tag("bubble"))(input)?;
    let (input, _) = ws(char('('))(input)?;

    // Parse x: column
    let (input, _) = ws(tag("x:"))(input)?;
    let (input, x_col) = ws(identifier)(input)?;
    let (input, _) = ws(char(','))(input)?;

    // Parse y: column
    let (input, _) = ws(tag("y:"))(input)?;
    let (input, y_col) = ws(identifier)(input)?;

    let (input, _) = ws(char(')'))(input)?;

    Ok((input, Command::Bubble { x: x_col, y: y_col }))
}

/// Parse the color command
/// Format: color(col) or color(none)
pub fn parse_color(input: &str) -> IResult<&str, Command> {
    let (input, _) = ws(tag("color"))(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, col) = ws(identifier)(input)?;
    let (input, _) = ws(char(')'))(input)?;

    let col = if col.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(col)
    };

    Ok((input, Command::Color(col)))
}

/// Parse the facet command
/// Format: facet(col: a), facet(row: b), or facet(col: a, row: b)
pub fn parse_facet(input: &str) -> IResult<&str, Command> {
    let (input, _) = ws(tag("facet"))(input)?;
    let (input, _) = ws(char('('))(input)?;

    let (input, col) = opt(preceded(ws(tag("col:")), ws(identifier)))(input)?;
    let (input, row) = if col.is_some() {
        opt(preceded(
            ws(char(',')),
            preceded(ws(tag("row:")), ws(identifier)),
        ))(input)?
    } else {
        opt(preceded(ws(tag("row:")), ws(identifier)))(input)?
    };

    let (input, _) = ws(char(')'))(input)?;

    // An empty facet() carries no information
    if col.is_none() && row.is_none() {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    }

    let none_to_absent = |v: Option<String>| v.filter(|c| !c.eq_ignore_ascii_case("none"));

    Ok((
        input,
        Command::Facet {
            col: none_to_absent(col),
            row: none_to_absent(row),
        },
    ))
}

/// Parse any command
pub fn parse_command(input: &str) -> IResult<&str, Command> {
    alt((parse_bubble, parse_color, parse_facet))(input)
}
