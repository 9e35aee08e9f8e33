use crate::{
    grammar::{parse_tree, Production},
    walker::build_did_url,
    DidUrl, ParseError,
};

// did-url = did path-abempty [ "?" query ] [ "#" fragment ]
pub(crate) fn parse_did_url(did_url: String, with_diagnostics: bool) -> Result<DidUrl, ParseError> {
    log::debug!(
        "Parsing DID URL {:?}, diagnostics: {}",
        did_url,
        with_diagnostics
    );

    let parts = {
        let root = parse_tree(&did_url, Production::DidUrl)?;
        build_did_url(&did_url, &root, with_diagnostics)?
    };

    Ok(DidUrl {
        did_url,
        did: parts.did,
        path: parts.path,
        query: parts.query,
        queries: parts.queries,
        fragment: parts.fragment,
        diagnostics: parts.diagnostics,
    })
}
