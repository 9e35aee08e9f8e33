use std::collections::BTreeMap;

use crate::grammar::{Production, Terminal};

/// Parse trace captured when diagnostics are requested at parse time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    parse_tree: String,
    rule_counts: BTreeMap<String, usize>,
}

impl Diagnostics {
    /// One line per production visited, indented two spaces per nesting level:
    /// `<production>: "<matched text>"`.
    pub fn parse_tree(&self) -> &str {
        self.parse_tree.as_ref()
    }

    pub fn rule_counts(&self) -> &BTreeMap<String, usize> {
        &self.rule_counts
    }

    /// Number of times `rule` matched, zero if it never did.
    pub fn rule_count(&self, rule: &str) -> usize {
        self.rule_counts.get(rule).copied().unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub(crate) struct DiagnosticRecorder {
    lines: Vec<String>,
    rule_counts: BTreeMap<String, usize>,
}

impl DiagnosticRecorder {
    pub(crate) fn record(&mut self, production: Production, spelling: &str, depth: usize) {
        self.lines.push(format!(
            "{}{}: \"{}\"",
            "  ".repeat(depth),
            production.name(),
            spelling
        ));
        self.count(production.name());
    }

    /// Terminals are counted but never dumped.
    pub(crate) fn record_terminal(&mut self, terminal: Terminal) {
        self.count(terminal.name());
    }

    fn count(&mut self, name: &str) {
        *self.rule_counts.entry(name.to_string()).or_default() += 1;
    }

    pub(crate) fn finish(self) -> Diagnostics {
        Diagnostics {
            parse_tree: self.lines.join("\n"),
            rule_counts: self.rule_counts,
        }
    }
}
