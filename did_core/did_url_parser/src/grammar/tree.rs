use std::fmt::{self, Display};

/// Named productions of the DID URL grammar.
///
/// Every production is a non-terminal of the parse tree. Quoted literals and
/// character ranges of the grammar become [`Terminal`] nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Production {
    DidUrl,
    Did,
    MethodName,
    MethodChar,
    MethodSpecificId,
    Idchar,
    PctEncoded,
    PathAbempty,
    Segment,
    Pchar,
    Unreserved,
    SubDelims,
    Query,
    Fragment,
    Alpha,
    Digit,
    Hexdig,
}

impl Production {
    /// The rule name as written in the ABNF.
    pub fn name(&self) -> &'static str {
        match self {
            Production::DidUrl => "did-url",
            Production::Did => "did",
            Production::MethodName => "method-name",
            Production::MethodChar => "method-char",
            Production::MethodSpecificId => "method-specific-id",
            Production::Idchar => "idchar",
            Production::PctEncoded => "pct-encoded",
            Production::PathAbempty => "path-abempty",
            Production::Segment => "segment",
            Production::Pchar => "pchar",
            Production::Unreserved => "unreserved",
            Production::SubDelims => "sub-delims",
            Production::Query => "query",
            Production::Fragment => "fragment",
            Production::Alpha => "ALPHA",
            Production::Digit => "DIGIT",
            Production::Hexdig => "HEXDIG",
        }
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Leaf matches: quoted strings (`"did:"`, `"%"`, ...) and numeric ranges (`%x61-7A`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    StringValue,
    NumericValue,
}

impl Terminal {
    pub fn name(&self) -> &'static str {
        match self {
            Terminal::StringValue => "StringValue",
            Terminal::NumericValue => "NumericValue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Rule(Production),
    Terminal(Terminal),
}

/// A node of the parse tree. `spelling` is the exact text the node matched,
/// borrowed from the parsed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode<'a> {
    pub kind: NodeKind,
    pub spelling: &'a str,
    pub children: Vec<ParseNode<'a>>,
}

impl<'a> ParseNode<'a> {
    pub(crate) fn rule(production: Production, spelling: &'a str, children: Vec<Self>) -> Self {
        Self {
            kind: NodeKind::Rule(production),
            spelling,
            children,
        }
    }

    pub(crate) fn terminal(terminal: Terminal, spelling: &'a str) -> Self {
        Self {
            kind: NodeKind::Terminal(terminal),
            spelling,
            children: Vec::new(),
        }
    }

    /// The production this node was built by, `None` for terminals.
    pub fn production(&self) -> Option<Production> {
        match self.kind {
            NodeKind::Rule(production) => Some(production),
            NodeKind::Terminal(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, NodeKind::Terminal(_))
    }

    /// Depth-first search for the first node built by `production`.
    pub fn find(&self, production: Production) -> Option<&ParseNode<'a>> {
        if self.production() == Some(production) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(production))
    }
}
