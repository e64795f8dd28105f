// Shared lexing combinators for the control-string DSL

use nom::{
    bytes::complete::take_while1,
    character::complete::multispace0,
    combinator::map,
    error::ParseError,
    sequence::delimited,
    IResult,
};

/// Wrap a parser so it eats surrounding whitespace
pub fn ws<'a, F, O, E>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    F: FnMut(&'a str) -> IResult<&'a str, O, E>,
    E: ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

/// Column-name identifier: alphanumerics and underscores
pub fn identifier(input: &str) -> IResult<&str, String> {
    map(
        take_while1(|c: char| c.is_alphanumeric() || c == '_'),
        |s: &str| s.to_string(),
    )(input)
}
