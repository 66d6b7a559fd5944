//! Glue between [`combine`] parsers and the crate's [`ParseError`].

use std::fmt;
use std::str::FromStr;

use combine::{easy, EasyParser, Parser, Stream};
use itertools::Itertools;
use num_traits::{Signed, Unsigned};

use crate::{ParseError, SyntaxErrors};

mod c {
    pub use combine::{parser::char::digit, *};
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Runs `parser` over all of `s`. Trailing input is an error.
pub fn from_str<'a, P>(s: &'a str, parser: P) -> Result<P::Output>
where
    P: Parser<easy::Stream<&'a str>>,
{
    (parser, c::eof())
        .map(|(output, _)| output)
        .easy_parse(s)
        .map(|(output, rest)| {
            debug_assert_eq!(rest, "");
            output
        })
        .map_err(|err| {
            let errors: SyntaxErrors = err
                .map_position(|position| position.translate_position(s))
                .map_range(|range: &str| range.to_owned());
            let line = 1 + s
                .get(..errors.position)
                .map_or(0, |before| before.matches('\n').count());
            ParseError::Syntax { line, errors }
        })
}

/// Parses every non-empty line of `input` with a fresh parser from
/// `make_parser`. Errors carry the line number within `input`.
pub fn lines<'a, P>(input: &'a str, mut make_parser: impl FnMut() -> P) -> Result<Vec<P::Output>>
where
    P: Parser<easy::Stream<&'a str>>,
{
    let parsed = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(index, line)| from_str(line, make_parser()).map_err(|err| err.offset_lines(index)))
        .collect::<Result<Vec<_>>>()?;

    if parsed.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(parsed)
}

/// A run of consecutive non-blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// 0-based index of the block's first line within the whole input.
    pub first_line: usize,
    pub lines: Vec<&'a str>,
}

/// Splits `input` into blocks separated by one or more blank lines.
pub fn blocks(input: &str) -> Vec<Block<'_>> {
    let groups = input
        .lines()
        .enumerate()
        .group_by(|(_, line)| line.trim().is_empty());

    let blocks = (&groups)
        .into_iter()
        .filter(|(blank, _)| !blank)
        .filter_map(|(_, group)| {
            let numbered: Vec<(usize, &str)> = group.collect();
            let first_line = numbered.first()?.0;
            Some(Block {
                first_line,
                lines: numbered.into_iter().map(|(_, line)| line).collect(),
            })
        })
        .collect();
    blocks
}

/// An unsigned decimal integer: `"42"`.
pub fn decimal_integer<T, Input>() -> impl Parser<Input, Output = T>
where
    T: FromStr + Unsigned,
    T::Err: fmt::Display,
    Input: Stream<Token = char>,
    Input::Error: c::ParseError<Input::Token, Input::Range, Input::Position>,
{
    c::from_str(c::many1::<String, _, _>(c::digit()))
}

/// A decimal integer with an optional minus sign: `"-17"`.
pub fn signed_integer<T, Input>() -> impl Parser<Input, Output = T>
where
    T: FromStr + Signed,
    T::Err: fmt::Display,
    Input: Stream<Token = char>,
    Input::Error: c::ParseError<Input::Token, Input::Range, Input::Position>,
{
    let digits = c::many1::<String, _, _>(c::digit());
    let text = (c::optional(c::token('-')), digits).map(
        |(sign, digits): (Option<char>, String)| match sign {
            Some(minus) => format!("{minus}{digits}"),
            None => digits,
        },
    );
    c::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(from_str("1234", decimal_integer::<u32, _>()).unwrap(), 1234);
        assert_eq!(from_str("-17", signed_integer::<i32, _>()).unwrap(), -17);
        assert_eq!(from_str("8", signed_integer::<i64, _>()).unwrap(), 8);
    }

    #[test]
    fn rejects_trailing_input() {
        let err = from_str("12x", decimal_integer::<u8, _>()).unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 1, .. }), "{err}");
    }

    #[test]
    fn rejects_overflow() {
        assert!(from_str("256", decimal_integer::<u8, _>()).is_err());
    }

    #[test]
    fn blocks_split_on_blank_lines() {
        let input = "\na\nb\n\n\nc\n  \nd\ne\n";
        assert_eq!(
            blocks(input),
            vec![
                Block {
                    first_line: 1,
                    lines: vec!["a", "b"],
                },
                Block {
                    first_line: 5,
                    lines: vec!["c"],
                },
                Block {
                    first_line: 7,
                    lines: vec!["d", "e"],
                },
            ]
        );
        assert!(blocks("").is_empty());
    }

    #[test]
    fn lines_reports_line_numbers() {
        let err = lines("1\n2\n\nthree\n", || decimal_integer::<u32, _>()).unwrap_err();
        assert_eq!(err.line(), Some(4));

        assert_eq!(
            lines("1\n2\n", || decimal_integer::<u32, _>()).unwrap(),
            vec![1, 2]
        );
        assert!(matches!(
            lines("\n\n", || decimal_integer::<u32, _>()),
            Err(ParseError::Empty)
        ));
    }
}
