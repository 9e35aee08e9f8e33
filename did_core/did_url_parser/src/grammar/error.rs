use std::{
    cmp::Ordering,
    fmt::{self, Display},
};

use nom::{
    error::{ErrorKind, ParseError as NomParseError},
    Offset,
};

use super::tree::Production;
use crate::ParseError;

/// Something the grammar could have matched at the failing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Production(Production),
    Literal(&'static str),
    Range(char, char),
    EndOfInput,
}

impl Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Production(production) => write!(f, "{}", production),
            Expected::Literal(literal) => write!(f, "\"{}\"", literal),
            Expected::Range(low, high) => write!(f, "%x{:02X}-{:02X}", *low as u32, *high as u32),
            Expected::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Grammar failure: `input` is the unmatched remainder at the furthest failing
/// position known so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarError<'a> {
    pub(crate) input: &'a str,
    pub(crate) expected: Vec<Expected>,
}

impl<'a> GrammarError<'a> {
    pub(crate) fn new(input: &'a str, expected: Vec<Expected>) -> Self {
        Self { input, expected }
    }

    pub(crate) fn expecting(input: &'a str, expected: Expected) -> nom::Err<Self> {
        nom::Err::Error(Self::new(input, vec![expected]))
    }

    /// A production that fails where it started is reported by its own name
    /// instead of the alternatives it tried.
    pub(crate) fn within(mut self, start: &'a str, production: Production) -> Self {
        if self.input.len() == start.len() {
            self.expected = vec![Expected::Production(production)];
        }
        self
    }

    /// Keeps the failure that got furthest into the input, merging the
    /// expectations of failures at the same position.
    pub(crate) fn merge(mut self, other: Self) -> Self {
        match self.input.len().cmp(&other.input.len()) {
            Ordering::Less => self,
            Ordering::Greater => other,
            Ordering::Equal => {
                for expected in other.expected {
                    if !self.expected.contains(&expected) {
                        self.expected.push(expected);
                    }
                }
                self
            }
        }
    }

    pub(crate) fn into_parse_error(self, source: &str) -> ParseError {
        ParseError::SyntaxError {
            position: source.offset(self.input),
            expected: self.expected.iter().map(ToString::to_string).collect(),
        }
    }
}

impl<'a> NomParseError<&'a str> for GrammarError<'a> {
    fn from_error_kind(input: &'a str, _kind: ErrorKind) -> Self {
        Self::new(input, Vec::new())
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn or(self, other: Self) -> Self {
        self.merge(other)
    }
}
