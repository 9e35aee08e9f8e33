mod parsing;

use std::{
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use self::parsing::parse_did;
use crate::{Diagnostics, DidRange, DidUrl, ParseError};

/// A DID: `did:<method-name>:<method-specific-id>`.
///
/// Equality and hashing use the DID string only.
#[derive(Debug, Clone)]
pub struct Did {
    pub(crate) did: String,
    pub(crate) method: DidRange,
    pub(crate) id: DidRange,
    pub(crate) diagnostics: Option<Diagnostics>,
}

impl Did {
    pub fn parse(did: String) -> Result<Self, ParseError> {
        parse_did(did, false)
    }

    pub fn parse_with_diagnostics(did: String) -> Result<Self, ParseError> {
        parse_did(did, true)
    }

    pub(crate) fn parse_with(did: String, with_diagnostics: bool) -> Result<Self, ParseError> {
        parse_did(did, with_diagnostics)
    }

    pub fn did(&self) -> &str {
        self.did.as_ref()
    }

    pub fn method(&self) -> &str {
        &self.did[self.method.clone()]
    }

    /// The method-specific identifier, including any `:`-separated namespaces.
    pub fn id(&self) -> &str {
        &self.did[self.id.clone()]
    }

    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        self.diagnostics.as_ref()
    }
}

impl PartialEq for Did {
    fn eq(&self, other: &Self) -> bool {
        self.did == other.did
    }
}

impl Eq for Did {}

impl Hash for Did {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.did.hash(state);
    }
}

impl TryFrom<String> for Did {
    type Error = ParseError;

    fn try_from(did: String) -> Result<Self, Self::Error> {
        Self::parse(did)
    }
}

impl FromStr for Did {
    type Err = ParseError;

    fn from_str(did: &str) -> Result<Self, Self::Err> {
        Self::parse(did.to_string())
    }
}

impl Display for Did {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.did)
    }
}

impl AsRef<str> for Did {
    fn as_ref(&self) -> &str {
        self.did()
    }
}

impl Serialize for Did {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.did())
    }
}

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let did = String::deserialize(deserializer)?;
        Self::parse(did).map_err(serde::de::Error::custom)
    }
}

impl From<&DidUrl> for Did {
    fn from(did_url: &DidUrl) -> Self {
        did_url.did().clone()
    }
}
