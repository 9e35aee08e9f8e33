use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::{Did, DidUrl, ParseError};

// Everything but unreserved characters.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Composes a DID URL from its components. [`DidUrlBuilder::build`] parses the
/// composed string, so the result always agrees with its own string form.
#[derive(Debug, Clone)]
pub struct DidUrlBuilder {
    did: Did,
    path: Option<String>,
    query: Option<String>,
    fragment: Option<String>,
}

impl DidUrlBuilder {
    pub fn new(did: Did) -> Self {
        Self {
            did,
            path: None,
            query: None,
            fragment: None,
        }
    }

    pub fn did(mut self, did: Did) -> Self {
        self.did = did;
        self
    }

    /// Sets the raw path; it must be empty or start with `/`.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into()).filter(|path| !path.is_empty());
        self
    }

    /// Sets the raw query, without the leading `?`.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Appends a percent-encoded `key=value` pair to the query.
    pub fn query_pair(mut self, key: &str, value: &str) -> Self {
        let pair = format!(
            "{}={}",
            utf8_percent_encode(key, QUERY_COMPONENT),
            utf8_percent_encode(value, QUERY_COMPONENT)
        );
        self.query = Some(match self.query.take() {
            Some(query) if !query.is_empty() => format!("{}&{}", query, pair),
            _ => pair,
        });
        self
    }

    /// Sets the raw fragment, without the leading `#`.
    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    pub fn without_path(mut self) -> Self {
        self.path = None;
        self
    }

    pub fn without_query(mut self) -> Self {
        self.query = None;
        self
    }

    pub fn without_fragment(mut self) -> Self {
        self.fragment = None;
        self
    }

    pub fn build(self) -> Result<DidUrl, ParseError> {
        let mut did_url = self.did.did().to_string();
        let path_start = did_url.len();
        if let Some(path) = &self.path {
            if !path.starts_with('/') {
                return Err(ParseError::SyntaxError {
                    position: path_start,
                    expected: vec!["\"/\"".to_string()],
                });
            }
            did_url.push_str(path);
        }
        let query_start = did_url.len() + 1;
        if let Some(query) = &self.query {
            did_url.push('?');
            did_url.push_str(query);
        }
        let fragment_start = did_url.len() + 1;
        if let Some(fragment) = &self.fragment {
            did_url.push('#');
            did_url.push_str(fragment);
        }

        log::trace!("DidUrlBuilder::build >> composed: {:?}", did_url);
        let parsed = DidUrl::parse(did_url)?;

        // A delimiter inside a component re-splits the composed string.
        let mismatch = if parsed.did() != &self.did || parsed.path() != self.path.as_deref() {
            Some((path_start, "path-abempty"))
        } else if parsed.query() != self.query.as_deref() {
            Some((query_start, "query"))
        } else if parsed.fragment() != self.fragment.as_deref() {
            Some((fragment_start, "fragment"))
        } else {
            None
        };

        match mismatch {
            Some((position, production)) => Err(ParseError::SyntaxError {
                position,
                expected: vec![production.to_string()],
            }),
            None => Ok(parsed),
        }
    }
}
