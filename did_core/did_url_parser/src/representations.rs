//! Representation-specific entry names per DID document media type.
//!
//! Entries such as `@context` only have meaning in one representation. The
//! table is an immutable value; [`STANDARD_REPRESENTATION_ENTRIES`] is the
//! process-wide default, initialized on first use.
use std::{
    collections::HashMap,
    fmt::{self, Display},
    str::FromStr,
};

use once_cell::sync::Lazy;

pub const MEDIA_TYPE_JSONLD: &str = "application/did+ld+json";
pub const MEDIA_TYPE_JSON: &str = "application/did+json";
pub const MEDIA_TYPE_CBOR: &str = "application/did+cbor";

pub static STANDARD_REPRESENTATION_ENTRIES: Lazy<RepresentationSpecificEntries> =
    Lazy::new(RepresentationSpecificEntries::standard);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    JsonLd,
    Json,
    Cbor,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::JsonLd => MEDIA_TYPE_JSONLD,
            MediaType::Json => MEDIA_TYPE_JSON,
            MediaType::Cbor => MEDIA_TYPE_CBOR,
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            MEDIA_TYPE_JSONLD => Ok(MediaType::JsonLd),
            MEDIA_TYPE_JSON => Ok(MediaType::Json),
            MEDIA_TYPE_CBOR => Ok(MediaType::Cbor),
            other => Err(format!("Unsupported media type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepresentationSpecificEntries {
    entries: HashMap<MediaType, Vec<String>>,
}

impl RepresentationSpecificEntries {
    pub fn new(entries: HashMap<MediaType, Vec<String>>) -> Self {
        Self { entries }
    }

    /// `@context` for JSON-LD, nothing for plain JSON and CBOR.
    pub fn standard() -> Self {
        log::debug!("Initializing standard representation-specific entries");
        Self::new(HashMap::from([
            (MediaType::JsonLd, vec!["@context".to_string()]),
            (MediaType::Json, vec![]),
            (MediaType::Cbor, vec![]),
        ]))
    }

    pub fn entry_names(&self, media_type: MediaType) -> &[String] {
        self.entries
            .get(&media_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn all_entry_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .values()
            .flatten()
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn is_representation_specific(&self, media_type: MediaType, name: &str) -> bool {
        self.entry_names(media_type).iter().any(|entry| entry == name)
    }
}
