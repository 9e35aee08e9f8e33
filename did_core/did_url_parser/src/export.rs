//! Structured exports of a [`DidUrl`] as a JSON object or a string-keyed map.
//!
//! Every optional field is always present (as `null` when absent) so the
//! shape is the same for all DID URLs. `parseTree` and `parseRuleCount` are
//! only added when diagnostics are requested.
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    representations::{MediaType, RepresentationSpecificEntries, STANDARD_REPRESENTATION_ENTRIES},
    Diagnostics, Did, DidUrl, ExportError,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub include_diagnostics: bool,
    /// Target representation; query parameters named like one of its
    /// representation-specific entries are rejected.
    pub media_type: Option<MediaType>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DiagnosticsExport<'a> {
    parse_tree: Option<&'a str>,
    parse_rule_count: Option<&'a BTreeMap<String, usize>>,
}

impl<'a> DiagnosticsExport<'a> {
    fn new(diagnostics: Option<&'a Diagnostics>) -> Self {
        Self {
            parse_tree: diagnostics.map(Diagnostics::parse_tree),
            parse_rule_count: diagnostics.map(Diagnostics::rule_counts),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DidExport<'a> {
    raw_string: &'a str,
    method_name: &'a str,
    method_specific_id: &'a str,
    #[serde(flatten)]
    diagnostics: Option<DiagnosticsExport<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DidUrlExport<'a> {
    raw_string: &'a str,
    identifier: DidExport<'a>,
    query_parameters: BTreeMap<&'a str, &'a str>,
    path: Option<&'a str>,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
    #[serde(flatten)]
    diagnostics: Option<DiagnosticsExport<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct Exporter<'r> {
    entries: &'r RepresentationSpecificEntries,
    options: ExportOptions,
}

impl Default for Exporter<'static> {
    fn default() -> Self {
        Self::new(&STANDARD_REPRESENTATION_ENTRIES, ExportOptions::default())
    }
}

impl<'r> Exporter<'r> {
    pub fn new(entries: &'r RepresentationSpecificEntries, options: ExportOptions) -> Self {
        Self { entries, options }
    }

    pub fn with_options(self, options: ExportOptions) -> Self {
        Self { options, ..self }
    }

    pub fn entries(&self) -> &RepresentationSpecificEntries {
        self.entries
    }

    pub fn to_json_object(&self, did_url: &DidUrl) -> Result<Map<String, Value>, ExportError> {
        self.check_reserved_names(did_url)?;

        match serde_json::to_value(self.export(did_url))? {
            Value::Object(object) => Ok(object),
            other => Err(ExportError::JsonError(serde::ser::Error::custom(format!(
                "DID URL exported as a non-object value: {}",
                other
            )))),
        }
    }

    pub fn to_map(&self, did_url: &DidUrl) -> Result<HashMap<String, Value>, ExportError> {
        Ok(self.to_json_object(did_url)?.into_iter().collect())
    }

    fn export<'a>(&self, did_url: &'a DidUrl) -> DidUrlExport<'a> {
        let include_diagnostics = self.options.include_diagnostics;
        let did: &Did = did_url.did();

        DidUrlExport {
            raw_string: did_url.did_url(),
            identifier: DidExport {
                raw_string: did.did(),
                method_name: did.method(),
                method_specific_id: did.id(),
                diagnostics: include_diagnostics.then(|| DiagnosticsExport::new(did.diagnostics())),
            },
            query_parameters: did_url
                .queries()
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str()))
                .collect(),
            path: did_url.path(),
            query: did_url.query(),
            fragment: did_url.fragment(),
            diagnostics: include_diagnostics.then(|| DiagnosticsExport::new(did_url.diagnostics())),
        }
    }

    fn check_reserved_names(&self, did_url: &DidUrl) -> Result<(), ExportError> {
        let Some(media_type) = self.options.media_type else {
            return Ok(());
        };

        match did_url
            .queries()
            .keys()
            .find(|name| self.entries.is_representation_specific(media_type, name))
        {
            Some(name) => Err(ExportError::ReservedEntryName {
                name: name.clone(),
                media_type,
            }),
            None => Ok(()),
        }
    }
}
