mod diagnostics;
mod did;
mod did_url;
mod error;
pub mod export;
pub mod grammar;
mod query;
pub mod representations;
mod walker;

use std::ops::Range;

type DidRange = Range<usize>;

pub use diagnostics::Diagnostics;
pub use did::Did;
pub use did_url::{DidUrl, DidUrlBuilder};
pub use error::{ExportError, ParseError};
pub use query::decode_query;

/// Parses a DID URL, optionally keeping its parse trace.
pub fn parse(did_url: &str, with_diagnostics: bool) -> Result<DidUrl, ParseError> {
    if with_diagnostics {
        DidUrl::parse_with_diagnostics(did_url.to_string())
    } else {
        DidUrl::parse(did_url.to_string())
    }
}
