use std::collections::HashMap;

use nom::Offset;

use crate::{
    diagnostics::{DiagnosticRecorder, Diagnostics},
    grammar::{NodeKind, ParseNode, Production},
    query::decode_query,
    Did, DidRange, ParseError,
};

trait ProductionVisitor<'a> {
    fn visit(&mut self, production: Production, node: &ParseNode<'a>) -> Result<(), ParseError>;
}

// Pre-order, children left to right. Terminals carry nothing for the model;
// they are counted in the diagnostics but not dumped.
fn walk<'a, V: ProductionVisitor<'a>>(
    node: &ParseNode<'a>,
    depth: usize,
    visitor: &mut V,
    recorder: &mut Option<DiagnosticRecorder>,
) -> Result<(), ParseError> {
    let production = match node.kind {
        NodeKind::Rule(production) => production,
        NodeKind::Terminal(terminal) => {
            if let Some(recorder) = recorder.as_mut() {
                recorder.record_terminal(terminal);
            }
            return Ok(());
        }
    };

    if let Some(recorder) = recorder.as_mut() {
        recorder.record(production, node.spelling, depth);
    }
    visitor.visit(production, node)?;

    for child in &node.children {
        walk(child, depth + 1, visitor, recorder)?;
    }
    Ok(())
}

fn walk_root<'a, V: ProductionVisitor<'a>>(
    root: &ParseNode<'a>,
    entry: Production,
    visitor: &mut V,
    with_diagnostics: bool,
) -> Result<Option<Diagnostics>, ParseError> {
    if root.production() != Some(entry) {
        return Err(ParseError::InternalInconsistency(format!(
            "expected a {} parse tree, found {:?}",
            entry, root.kind
        )));
    }

    let mut recorder = with_diagnostics.then(DiagnosticRecorder::default);
    walk(root, 0, visitor, &mut recorder)?;
    Ok(recorder.map(DiagnosticRecorder::finish))
}

fn range_of(source: &str, node: &ParseNode<'_>) -> DidRange {
    let start = source.offset(node.spelling);
    start..start + node.spelling.len()
}

fn unexpected(production: Production, within: Production) -> ParseError {
    ParseError::InternalInconsistency(format!(
        "unexpected {} production within {}",
        production, within
    ))
}

#[derive(Debug)]
pub(crate) struct DidUrlParts {
    pub(crate) did: Did,
    pub(crate) path: Option<DidRange>,
    pub(crate) query: Option<DidRange>,
    pub(crate) queries: HashMap<String, String>,
    pub(crate) fragment: Option<DidRange>,
    pub(crate) diagnostics: Option<Diagnostics>,
}

struct DidUrlVisitor<'a> {
    source: &'a str,
    with_diagnostics: bool,
    roots: usize,
    did: Option<Did>,
    path: Option<DidRange>,
    query: Option<DidRange>,
    queries: HashMap<String, String>,
    fragment: Option<DidRange>,
}

impl<'a> ProductionVisitor<'a> for DidUrlVisitor<'a> {
    fn visit(&mut self, production: Production, node: &ParseNode<'a>) -> Result<(), ParseError> {
        match production {
            Production::DidUrl => {
                self.roots += 1;
                if self.roots > 1 {
                    return Err(unexpected(production, Production::DidUrl));
                }
            }
            Production::Did => {
                if self.did.is_some() {
                    return Err(unexpected(production, Production::DidUrl));
                }
                let offset = range_of(self.source, node).start;
                let did = Did::parse_with(node.spelling.to_string(), self.with_diagnostics)
                    .map_err(|err| err.shifted(offset))?;
                self.did = Some(did);
            }
            Production::PathAbempty => {
                if self.path.is_some() {
                    return Err(unexpected(production, Production::DidUrl));
                }
                self.path = Some(range_of(self.source, node));
            }
            Production::Query => {
                if self.query.is_some() {
                    return Err(unexpected(production, Production::DidUrl));
                }
                let range = range_of(self.source, node);
                self.queries = decode_query(node.spelling).map_err(|err| err.shifted(range.start))?;
                self.query = Some(range);
            }
            Production::Fragment => {
                if self.fragment.is_some() {
                    return Err(unexpected(production, Production::DidUrl));
                }
                self.fragment = Some(range_of(self.source, node));
            }
            Production::MethodName
            | Production::MethodChar
            | Production::MethodSpecificId
            | Production::Idchar
            | Production::PctEncoded
            | Production::Segment
            | Production::Pchar
            | Production::Unreserved
            | Production::SubDelims
            | Production::Alpha
            | Production::Digit
            | Production::Hexdig => {}
        }
        Ok(())
    }
}

/// Builds the DID URL components from a `did-url` parse tree over `source`.
pub(crate) fn build_did_url(
    source: &str,
    root: &ParseNode<'_>,
    with_diagnostics: bool,
) -> Result<DidUrlParts, ParseError> {
    let mut visitor = DidUrlVisitor {
        source,
        with_diagnostics,
        roots: 0,
        did: None,
        path: None,
        query: None,
        queries: HashMap::new(),
        fragment: None,
    };
    let diagnostics = walk_root(root, Production::DidUrl, &mut visitor, with_diagnostics)?;
    log::trace!(
        "walker::build_did_url >> path: {:?}, query: {:?}, fragment: {:?}",
        visitor.path,
        visitor.query,
        visitor.fragment
    );

    let did = visitor.did.ok_or_else(|| {
        ParseError::InternalInconsistency("did-url parse tree without a did".to_string())
    })?;

    Ok(DidUrlParts {
        did,
        path: visitor.path,
        query: visitor.query,
        queries: visitor.queries,
        fragment: visitor.fragment,
        diagnostics,
    })
}

#[derive(Debug)]
pub(crate) struct DidParts {
    pub(crate) method: DidRange,
    pub(crate) id: DidRange,
    pub(crate) diagnostics: Option<Diagnostics>,
}

struct DidVisitor<'a> {
    source: &'a str,
    method: Option<DidRange>,
    id: Option<DidRange>,
}

impl<'a> ProductionVisitor<'a> for DidVisitor<'a> {
    fn visit(&mut self, production: Production, node: &ParseNode<'a>) -> Result<(), ParseError> {
        match production {
            Production::MethodName if self.method.is_none() => {
                self.method = Some(range_of(self.source, node));
            }
            Production::MethodSpecificId if self.id.is_none() => {
                self.id = Some(range_of(self.source, node));
            }
            Production::Did
            | Production::MethodChar
            | Production::Idchar
            | Production::PctEncoded
            | Production::Alpha
            | Production::Digit
            | Production::Hexdig => {}
            Production::MethodName
            | Production::MethodSpecificId
            | Production::DidUrl
            | Production::PathAbempty
            | Production::Segment
            | Production::Pchar
            | Production::Unreserved
            | Production::SubDelims
            | Production::Query
            | Production::Fragment => return Err(unexpected(production, Production::Did)),
        }
        Ok(())
    }
}

/// Builds the identifier components from a `did` parse tree over `source`.
pub(crate) fn build_did(
    source: &str,
    root: &ParseNode<'_>,
    with_diagnostics: bool,
) -> Result<DidParts, ParseError> {
    let mut visitor = DidVisitor {
        source,
        method: None,
        id: None,
    };
    let diagnostics = walk_root(root, Production::Did, &mut visitor, with_diagnostics)?;

    match (visitor.method, visitor.id) {
        (Some(method), Some(id)) => Ok(DidParts {
            method,
            id,
            diagnostics,
        }),
        _ => Err(ParseError::InternalInconsistency(
            "did parse tree without method-name or method-specific-id".to_string(),
        )),
    }
}
