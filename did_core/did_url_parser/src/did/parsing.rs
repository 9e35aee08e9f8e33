use crate::{
    grammar::{parse_tree, Production},
    walker::build_did,
    Did, ParseError,
};

// did = "did:" method-name ":" method-specific-id
pub(crate) fn parse_did(did: String, with_diagnostics: bool) -> Result<Did, ParseError> {
    log::debug!("Parsing DID {:?}", did);

    let parts = {
        let root = parse_tree(&did, Production::Did)?;
        build_did(&did, &root, with_diagnostics)?
    };

    Ok(Did {
        did,
        method: parts.method,
        id: parts.id,
        diagnostics: parts.diagnostics,
    })
}
