use std::collections::HashMap;

use percent_encoding::percent_decode_str;

use crate::ParseError;

const UTF8_OCTETS: &str = "UTF-8 percent-encoded octets";

/// Decodes a raw query (without the leading `?`) into key/value pairs.
///
/// Pairs are separated by `&` and split on their first `=`; a pair without `=`
/// has an empty value. `+` decodes to a space. Pairs with an empty key are
/// skipped and a repeated key keeps its last value.
///
/// Error positions are byte offsets into `query`.
pub fn decode_query(query: &str) -> Result<HashMap<String, String>, ParseError> {
    let mut queries = HashMap::new();
    let mut offset = 0;

    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(key).ok_or_else(|| malformed(offset))?;
        let value = decode_component(value).ok_or_else(|| malformed(offset))?;

        if key.is_empty() {
            log::trace!("query::decode_query >> skipping pair without key: {:?}", pair);
        } else if let Some(previous) = queries.insert(key, value) {
            log::debug!(
                "Query parameter repeated in {:?}, discarding value {:?}",
                query,
                previous
            );
        }
        offset += pair.len() + 1;
    }

    Ok(queries)
}

fn decode_component(component: &str) -> Option<String> {
    if !is_well_formed(component) {
        return None;
    }
    let component = component.replace('+', " ");
    percent_decode_str(&component)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

// Every "%" must start a "%" HEXDIG HEXDIG triplet.
fn is_well_formed(component: &str) -> bool {
    let bytes = component.as_bytes();
    bytes.iter().enumerate().all(|(i, byte)| {
        *byte != b'%'
            || matches!(
                (bytes.get(i + 1), bytes.get(i + 2)),
                (Some(high), Some(low)) if high.is_ascii_hexdigit() && low.is_ascii_hexdigit()
            )
    })
}

fn malformed(position: usize) -> ParseError {
    ParseError::SyntaxError {
        position,
        expected: vec![UTF8_OCTETS.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(query: &str) -> Vec<(String, String)> {
        let mut pairs: Vec<_> = decode_query(query).unwrap().into_iter().collect();
        pairs.sort();
        pairs
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_decode_pairs() {
        assert_eq!(decoded("a=1&b=2"), vec![pair("a", "1"), pair("b", "2")]);
    }

    #[test]
    fn test_decode_last_value_wins() {
        assert_eq!(decoded("a=1&a=2"), vec![pair("a", "2")]);
    }

    #[test]
    fn test_decode_pair_without_value() {
        assert_eq!(decoded("flag&a="), vec![pair("a", ""), pair("flag", "")]);
    }

    #[test]
    fn test_decode_splits_on_first_equals() {
        assert_eq!(decoded("expr=a=b"), vec![pair("expr", "a=b")]);
    }

    #[test]
    fn test_decode_percent_and_plus() {
        assert_eq!(
            decoded("service=agent%20one&name=a+b&plus=%2B&caf%C3%A9=%E2%82%AC"),
            vec![
                pair("café", "€"),
                pair("name", "a b"),
                pair("plus", "+"),
                pair("service", "agent one"),
            ]
        );
    }

    #[test]
    fn test_decode_skips_empty_keys() {
        assert_eq!(decoded("a=1&&=x&b=2"), vec![pair("a", "1"), pair("b", "2")]);
        assert!(decode_query("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_malformed_triplet() {
        assert_eq!(
            decode_query("a=1&b=%"),
            Err(ParseError::SyntaxError {
                position: 4,
                expected: vec![UTF8_OCTETS.to_string()]
            })
        );
        assert!(decode_query("a=%G1").is_err());
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert_eq!(
            decode_query("key=%FF"),
            Err(ParseError::SyntaxError {
                position: 0,
                expected: vec![UTF8_OCTETS.to_string()]
            })
        );
    }
}
