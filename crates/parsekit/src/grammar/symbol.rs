use compact_str::CompactString;
use std::fmt;

/// Name of the end-of-input marker terminal.
pub(crate) const EOF_NAME: &str = "$";

/// Name of the empty-string marker.
pub(crate) const EPSILON_NAME: &str = "ε";

/// Classification of a grammar symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
}

/// A named grammar symbol.
///
/// Equality and hashing are structural over the name and the kind, so two
/// symbols with the same name but different kinds are distinct. Symbols are
/// immutable after construction.
///
/// Two terminals are distinguished by convention: the end marker `$`
/// ([`Symbol::eof`]) appended by the parsing driver, and the empty string
/// `ε` ([`Symbol::epsilon`]) accepted in production bodies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    name: CompactString,
    kind: SymbolKind,
}

impl Symbol {
    /// Create a terminal symbol.
    #[must_use]
    pub fn terminal(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Terminal,
        }
    }

    /// Create a non-terminal symbol.
    #[must_use]
    pub fn non_terminal(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::NonTerminal,
        }
    }

    /// The end-of-input marker `$`.
    #[must_use]
    pub fn eof() -> Self {
        Self::terminal(EOF_NAME)
    }

    /// The empty-string marker `ε`.
    #[must_use]
    pub fn epsilon() -> Self {
        Self::terminal(EPSILON_NAME)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> SymbolKind {
        self.kind
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.kind == SymbolKind::Terminal
    }

    #[must_use]
    pub fn is_non_terminal(&self) -> bool {
        self.kind == SymbolKind::NonTerminal
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == SymbolKind::Terminal && self.name == EOF_NAME
    }

    #[must_use]
    pub fn is_epsilon(&self) -> bool {
        self.kind == SymbolKind::Terminal && self.name == EPSILON_NAME
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
