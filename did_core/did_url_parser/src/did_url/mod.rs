mod builder;
mod parsing;

use std::{
    collections::HashMap,
    fmt::Display,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use url::Url;

pub use self::builder::DidUrlBuilder;
use self::parsing::parse_did_url;
use crate::{
    export::{ExportOptions, Exporter},
    Diagnostics, Did, DidRange, ExportError, ParseError,
};

/// A parsed DID URL: a DID with optional path, query and fragment.
///
/// The value is immutable; equality and hashing use the original string.
/// Use [`DidUrl::to_builder`] to derive a modified DID URL.
#[derive(Debug, Clone)]
pub struct DidUrl {
    pub(crate) did_url: String,
    pub(crate) did: Did,
    pub(crate) path: Option<DidRange>,
    pub(crate) query: Option<DidRange>,
    pub(crate) queries: HashMap<String, String>,
    pub(crate) fragment: Option<DidRange>,
    pub(crate) diagnostics: Option<Diagnostics>,
}

impl DidUrl {
    pub fn parse(did_url: String) -> Result<Self, ParseError> {
        parse_did_url(did_url, false)
    }

    /// Parses and keeps the parse trace, see [`DidUrl::diagnostics`].
    pub fn parse_with_diagnostics(did_url: String) -> Result<Self, ParseError> {
        parse_did_url(did_url, true)
    }

    pub fn from_uri(uri: &Url, with_diagnostics: bool) -> Result<Self, ParseError> {
        parse_did_url(uri.as_str().to_string(), with_diagnostics)
    }

    pub fn builder(did: Did) -> DidUrlBuilder {
        DidUrlBuilder::new(did)
    }

    pub fn to_builder(&self) -> DidUrlBuilder {
        let mut builder = DidUrlBuilder::new(self.did.clone());
        if let Some(path) = self.path() {
            builder = builder.path(path);
        }
        if let Some(query) = self.query() {
            builder = builder.query(query);
        }
        if let Some(fragment) = self.fragment() {
            builder = builder.fragment(fragment);
        }
        builder
    }

    pub fn did_url(&self) -> &str {
        self.did_url.as_ref()
    }

    pub fn as_str(&self) -> &str {
        self.did_url()
    }

    pub fn did(&self) -> &Did {
        &self.did
    }

    pub fn method(&self) -> &str {
        self.did.method()
    }

    pub fn id(&self) -> &str {
        self.did.id()
    }

    /// Raw `path-abempty`; `None` when the DID URL has no path.
    pub fn path(&self) -> Option<&str> {
        self.slice(&self.path)
    }

    /// Raw query without the leading `?`. `Some("")` for a bare `?`.
    pub fn query(&self) -> Option<&str> {
        self.slice(&self.query)
    }

    /// Decoded query parameters.
    pub fn queries(&self) -> &HashMap<String, String> {
        &self.queries
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.queries.get(key).map(String::as_str)
    }

    /// Raw fragment without the leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.slice(&self.fragment)
    }

    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        self.diagnostics.as_ref()
    }

    /// The same DID URL without its fragment. Diagnostics are not carried over.
    pub fn without_fragment(&self) -> Self {
        let end = self
            .fragment
            .as_ref()
            .map_or(self.did_url.len(), |fragment| fragment.start - 1);
        Self {
            did_url: self.did_url[..end].to_string(),
            did: Did {
                diagnostics: None,
                ..self.did.clone()
            },
            path: self.path.clone(),
            query: self.query.clone(),
            queries: self.queries.clone(),
            fragment: None,
            diagnostics: None,
        }
    }

    pub fn to_uri(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.did_url)
    }

    pub fn to_json_object(
        &self,
        include_diagnostics: bool,
    ) -> Result<Map<String, Value>, ExportError> {
        Exporter::default()
            .with_options(ExportOptions {
                include_diagnostics,
                ..Default::default()
            })
            .to_json_object(self)
    }

    pub fn to_map(&self, include_diagnostics: bool) -> Result<HashMap<String, Value>, ExportError> {
        Exporter::default()
            .with_options(ExportOptions {
                include_diagnostics,
                ..Default::default()
            })
            .to_map(self)
    }

    fn slice(&self, range: &Option<DidRange>) -> Option<&str> {
        range.as_ref().map(|range| &self.did_url[range.clone()])
    }
}

impl PartialEq for DidUrl {
    fn eq(&self, other: &Self) -> bool {
        self.did_url == other.did_url
    }
}

impl Eq for DidUrl {}

impl Hash for DidUrl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.did_url.hash(state);
    }
}

impl TryFrom<String> for DidUrl {
    type Error = ParseError;

    fn try_from(did_url: String) -> Result<Self, Self::Error> {
        Self::parse(did_url)
    }
}

impl TryFrom<&str> for DidUrl {
    type Error = ParseError;

    fn try_from(did_url: &str) -> Result<Self, Self::Error> {
        Self::parse(did_url.to_string())
    }
}

impl TryFrom<&Url> for DidUrl {
    type Error = ParseError;

    fn try_from(uri: &Url) -> Result<Self, Self::Error> {
        Self::from_uri(uri, false)
    }
}

impl TryFrom<Url> for DidUrl {
    type Error = ParseError;

    fn try_from(uri: Url) -> Result<Self, Self::Error> {
        Self::from_uri(&uri, false)
    }
}

impl FromStr for DidUrl {
    type Err = ParseError;

    fn from_str(did_url: &str) -> Result<Self, Self::Err> {
        Self::parse(did_url.to_string())
    }
}

impl Display for DidUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.did_url)
    }
}

impl AsRef<str> for DidUrl {
    fn as_ref(&self) -> &str {
        self.did_url()
    }
}

impl Serialize for DidUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.did_url)
    }
}

impl<'de> Deserialize<'de> for DidUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let did_url = String::deserialize(deserializer)?;
        DidUrl::parse(did_url).map_err(serde::de::Error::custom)
    }
}

impl From<Did> for DidUrl {
    fn from(did: Did) -> Self {
        Self {
            did_url: did.did().to_string(),
            did: Did {
                diagnostics: None,
                ..did
            },
            path: None,
            query: None,
            queries: HashMap::new(),
            fragment: None,
            diagnostics: None,
        }
    }
}
