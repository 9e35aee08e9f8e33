// https://www.w3.org/TR/did-core/#did-url-syntax
//
// Each production returns a parse tree node tagged with its rule name. Quoted
// strings match case-insensitively, as in ABNF.
mod error;
mod tree;

use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    combinator::{map, opt},
    multi::{many0, many1},
    sequence::{pair, tuple},
    IResult, Offset,
};

pub use self::{
    error::{Expected, GrammarError},
    tree::{NodeKind, ParseNode, Production, Terminal},
};
use crate::ParseError;

type GrammarResult<'a, T> = IResult<&'a str, T, GrammarError<'a>>;

/// Recognizes the whole of `input` against the `entry` production and returns
/// the parse tree rooted at it.
///
/// Only `did-url` and `did` are entry productions.
pub fn parse_tree(input: &str, entry: Production) -> Result<ParseNode<'_>, ParseError> {
    log::trace!("grammar::parse_tree >> entry: {}, input: {:?}", entry, input);
    let result = match entry {
        Production::DidUrl => did_url(input),
        Production::Did => did(input),
        other => {
            return Err(ParseError::InternalInconsistency(format!(
                "{} is not an entry production",
                other
            )))
        }
    };

    match result {
        Ok(("", root)) => Ok(root),
        Ok((rest, root)) => Err(trailing_input(&root, rest).into_parse_error(input)),
        Err(nom::Err::Error(err) | nom::Err::Failure(err)) => {
            log::trace!("grammar::parse_tree >> failed: {:?}", err);
            Err(err.into_parse_error(input))
        }
        Err(nom::Err::Incomplete(_)) => Err(ParseError::InternalInconsistency(
            "grammar requested more input".to_string(),
        )),
    }
}

// The grammar is greedy, so leftover input means the character after the last
// component could not continue it. Retrying that component's element locates
// the furthest failure (e.g. a truncated pct-encoded triplet).
fn trailing_input<'a>(root: &ParseNode<'a>, rest: &'a str) -> GrammarError<'a> {
    let last = root
        .children
        .iter()
        .rev()
        .find_map(ParseNode::production);

    let (attempt, follow) = match last {
        Some(Production::Did) => (
            alt((idchar, string_value(":")))(rest),
            vec![
                Expected::Production(Production::PathAbempty),
                Expected::Literal("?"),
                Expected::Literal("#"),
            ],
        ),
        Some(Production::MethodSpecificId) => (alt((idchar, string_value(":")))(rest), vec![]),
        Some(Production::PathAbempty) => (
            alt((pchar, string_value("/")))(rest),
            vec![Expected::Literal("?"), Expected::Literal("#")],
        ),
        Some(Production::Query) => (query_char(rest), vec![Expected::Literal("#")]),
        Some(Production::Fragment) => (query_char(rest), vec![]),
        _ => return GrammarError::new(rest, vec![Expected::EndOfInput]),
    };

    let mut error = match attempt {
        Err(nom::Err::Error(err)) if err.input.len() < rest.len() => return err,
        Err(nom::Err::Error(err)) => err,
        _ => GrammarError::new(rest, Vec::new()),
    };
    error.expected.extend(follow);
    error.expected.push(Expected::EndOfInput);
    error
}

fn production<'a, F>(
    production: Production,
    mut body: F,
) -> impl FnMut(&'a str) -> GrammarResult<'a, ParseNode<'a>>
where
    F: FnMut(&'a str) -> GrammarResult<'a, Vec<ParseNode<'a>>>,
{
    move |input: &'a str| match body(input) {
        Ok((rest, children)) => {
            let spelling = &input[..input.offset(rest)];
            Ok((rest, ParseNode::rule(production, spelling, children)))
        }
        Err(nom::Err::Error(err)) => Err(nom::Err::Error(err.within(input, production))),
        Err(err) => Err(err),
    }
}

fn string_value<'a>(
    literal: &'static str,
) -> impl FnMut(&'a str) -> GrammarResult<'a, ParseNode<'a>> {
    move |input: &'a str| match tag_no_case::<_, _, GrammarError<'a>>(literal)(input) {
        Ok((rest, spelling)) => Ok((rest, ParseNode::terminal(Terminal::StringValue, spelling))),
        Err(_) => Err(GrammarError::expecting(input, Expected::Literal(literal))),
    }
}

fn numeric_value<'a>(
    low: char,
    high: char,
) -> impl FnMut(&'a str) -> GrammarResult<'a, ParseNode<'a>> {
    move |input: &'a str| match input.chars().next() {
        Some(c) if (low..=high).contains(&c) => {
            let (spelling, rest) = input.split_at(c.len_utf8());
            Ok((rest, ParseNode::terminal(Terminal::NumericValue, spelling)))
        }
        _ => Err(GrammarError::expecting(input, Expected::Range(low, high))),
    }
}

fn single(node: ParseNode<'_>) -> Vec<ParseNode<'_>> {
    vec![node]
}

// ALPHA = %x41-5A / %x61-7A
fn alpha(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(
        Production::Alpha,
        map(alt((numeric_value('A', 'Z'), numeric_value('a', 'z'))), single),
    )(input)
}

// DIGIT = %x30-39
fn digit(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(Production::Digit, map(numeric_value('0', '9'), single))(input)
}

// HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"
fn hexdig(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(
        Production::Hexdig,
        map(
            alt((
                digit,
                string_value("A"),
                string_value("B"),
                string_value("C"),
                string_value("D"),
                string_value("E"),
                string_value("F"),
            )),
            single,
        ),
    )(input)
}

// pct-encoded = "%" HEXDIG HEXDIG
fn pct_encoded(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(
        Production::PctEncoded,
        map(
            tuple((string_value("%"), hexdig, hexdig)),
            |(percent, high, low)| vec![percent, high, low],
        ),
    )(input)
}

// method-char = %x61-7A / DIGIT
fn method_char(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(
        Production::MethodChar,
        map(alt((numeric_value('a', 'z'), digit)), single),
    )(input)
}

// method-name = 1*method-char
fn method_name(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(Production::MethodName, many1(method_char))(input)
}

// idchar = ALPHA / DIGIT / "." / "-" / "_" / pct-encoded
fn idchar(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(
        Production::Idchar,
        map(
            alt((
                alpha,
                digit,
                string_value("."),
                string_value("-"),
                string_value("_"),
                pct_encoded,
            )),
            single,
        ),
    )(input)
}

// method-specific-id = *( *idchar ":" ) 1*idchar
fn method_specific_id(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(Production::MethodSpecificId, |input| {
        let (input, namespaces) = many0(pair(many0(idchar), string_value(":")))(input)?;
        let (input, tail) = many1(idchar)(input)?;

        let children = namespaces
            .into_iter()
            .flat_map(|(mut chars, separator)| {
                chars.push(separator);
                chars
            })
            .chain(tail)
            .collect();
        Ok((input, children))
    })(input)
}

// did = "did:" method-name ":" method-specific-id
fn did(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(Production::Did, |input| {
        let (input, prefix) = string_value("did:")(input)?;
        let (input, method_name) = method_name(input)?;
        let (input, separator) = string_value(":")(input)?;
        let (input, method_specific_id) = method_specific_id(input)?;
        Ok((input, vec![prefix, method_name, separator, method_specific_id]))
    })(input)
}

// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
fn unreserved(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(
        Production::Unreserved,
        map(
            alt((
                alpha,
                digit,
                string_value("-"),
                string_value("."),
                string_value("_"),
                string_value("~"),
            )),
            single,
        ),
    )(input)
}

// sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="
fn sub_delims(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(
        Production::SubDelims,
        map(
            alt((
                string_value("!"),
                string_value("$"),
                string_value("&"),
                string_value("'"),
                string_value("("),
                string_value(")"),
                string_value("*"),
                string_value("+"),
                string_value(","),
                string_value(";"),
                string_value("="),
            )),
            single,
        ),
    )(input)
}

// pchar = unreserved / pct-encoded / sub-delims / ":" / "@"
fn pchar(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(
        Production::Pchar,
        map(
            alt((
                unreserved,
                pct_encoded,
                sub_delims,
                string_value(":"),
                string_value("@"),
            )),
            single,
        ),
    )(input)
}

// segment = *pchar
fn segment(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(Production::Segment, many0(pchar))(input)
}

// path-abempty = *( "/" segment )
fn path_abempty(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(Production::PathAbempty, |input| {
        let (input, segments) = many0(pair(string_value("/"), segment))(input)?;
        let children = segments
            .into_iter()
            .flat_map(|(slash, segment)| [slash, segment])
            .collect();
        Ok((input, children))
    })(input)
}

// pchar / "/" / "?"
fn query_char(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    alt((pchar, string_value("/"), string_value("?")))(input)
}

// query = *( pchar / "/" / "?" )
fn query(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(Production::Query, many0(query_char))(input)
}

// fragment = *( pchar / "/" / "?" )
fn fragment(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(Production::Fragment, many0(query_char))(input)
}

// did-url = did path-abempty [ "?" query ] [ "#" fragment ]
fn did_url(input: &str) -> GrammarResult<'_, ParseNode<'_>> {
    production(Production::DidUrl, |input| {
        let (input, did) = did(input)?;
        let mut children = vec![did];

        let (input, path) = path_abempty(input)?;
        if !path.spelling.is_empty() {
            children.push(path);
        }

        let (input, query) = opt(pair(string_value("?"), query))(input)?;
        if let Some((delimiter, query)) = query {
            children.extend([delimiter, query]);
        }

        let (input, fragment) = opt(pair(string_value("#"), fragment))(input)?;
        if let Some((delimiter, fragment)) = fragment {
            children.extend([delimiter, fragment]);
        }

        Ok((input, children))
    })(input)
}
