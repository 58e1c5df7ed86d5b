use compact_str::CompactString;
use hashbrown::HashSet;
use std::fmt;

use super::symbol::{Symbol, SymbolKind, EPSILON_NAME};
use crate::error::GrammarError;

/// A production rule: a non-terminal head and an ordered body of symbols.
///
/// Equality is structural. The empty body represents an ε production;
/// [`GrammarBuilder`] normalizes explicit `ε` bodies into this form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
}

impl Production {
    #[must_use]
    pub fn new(lhs: Symbol, rhs: Vec<Symbol>) -> Self {
        Self { lhs, rhs }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        if self.rhs.is_empty() {
            return write!(f, " {EPSILON_NAME}");
        }
        for symbol in &self.rhs {
            write!(f, " {symbol}")?;
        }
        Ok(())
    }
}

/// An immutable context-free grammar.
///
/// Productions iterate in declaration order; downstream state numbering and
/// conflict reporting depend on that order staying stable. The terminal and
/// non-terminal partitions are kept both as ordered lists (for deterministic
/// iteration) and as hashed sets (for membership checks).
#[derive(Debug, Clone)]
pub struct Grammar {
    productions: Vec<Production>,
    start: Symbol,
    terminals: Vec<Symbol>,
    non_terminals: Vec<Symbol>,
    terminal_set: HashSet<Symbol, ahash::RandomState>,
    non_terminal_set: HashSet<Symbol, ahash::RandomState>,
}

impl Grammar {
    /// All productions, in declaration order.
    #[must_use]
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    #[must_use]
    pub const fn start_symbol(&self) -> &Symbol {
        &self.start
    }

    /// Declared terminals, in declaration order.
    #[must_use]
    pub fn terminals(&self) -> &[Symbol] {
        &self.terminals
    }

    /// Declared non-terminals, in declaration order.
    #[must_use]
    pub fn non_terminals(&self) -> &[Symbol] {
        &self.non_terminals
    }

    #[must_use]
    pub fn is_terminal(&self, symbol: &Symbol) -> bool {
        self.terminal_set.contains(symbol)
    }

    #[must_use]
    pub fn is_non_terminal(&self, symbol: &Symbol) -> bool {
        self.non_terminal_set.contains(symbol)
    }
}

/// Builder for constructing grammars.
///
/// Symbols are referred to by name; the builder resolves each name against
/// the declared partitions when [`build`](Self::build) runs.
///
/// # Example
///
/// ```rust
/// use parsekit::GrammarBuilder;
///
/// let grammar = GrammarBuilder::new()
///     .terminals(["+", "id"])
///     .non_terminals(["E"])
///     .start_symbol("E")
///     .production("E", ["E", "+", "id"])
///     .production("E", ["id"])
///     .build()?;
/// assert_eq!(grammar.productions().len(), 2);
/// # Ok::<(), parsekit::GrammarError>(())
/// ```
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    terminals: Vec<CompactString>,
    non_terminals: Vec<CompactString>,
    productions: Vec<(CompactString, Vec<CompactString>)>,
    start: Option<CompactString>,
}

impl GrammarBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a terminal symbol. Duplicate declarations are ignored.
    #[must_use]
    pub fn terminal(mut self, name: &str) -> Self {
        self.terminals.push(name.into());
        self
    }

    /// Declare several terminal symbols at once.
    #[must_use]
    pub fn terminals<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.terminals.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declare a non-terminal symbol. Duplicate declarations are ignored.
    #[must_use]
    pub fn non_terminal(mut self, name: &str) -> Self {
        self.non_terminals.push(name.into());
        self
    }

    /// Declare several non-terminal symbols at once.
    #[must_use]
    pub fn non_terminals<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.non_terminals.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the start symbol. Must name a declared non-terminal.
    #[must_use]
    pub fn start_symbol(mut self, name: &str) -> Self {
        self.start = Some(name.into());
        self
    }

    /// Add a production. The body may name `ε` for an empty production.
    #[must_use]
    pub fn production<'a>(mut self, lhs: &str, rhs: impl IntoIterator<Item = &'a str>) -> Self {
        self.productions
            .push((lhs.into(), rhs.into_iter().map(Into::into).collect()));
        self
    }

    /// Build the grammar from the declared symbols and productions.
    ///
    /// Every production-body name must resolve to a declared symbol (or be
    /// `ε`, which is stripped: it is the identity of concatenation, so a body
    /// of `[ε]` becomes the empty body). The start symbol must name a
    /// declared non-terminal.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] if the start symbol is missing or not a
    /// non-terminal, a production head is not a non-terminal, or a body
    /// references an undeclared symbol.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let terminals = dedup_preserving_order(self.terminals, SymbolKind::Terminal);
        let non_terminals = dedup_preserving_order(self.non_terminals, SymbolKind::NonTerminal);

        let terminal_set: HashSet<Symbol, ahash::RandomState> =
            terminals.iter().cloned().collect();
        let non_terminal_set: HashSet<Symbol, ahash::RandomState> =
            non_terminals.iter().cloned().collect();

        let start_name = self.start.ok_or(GrammarError::MissingStartSymbol)?;
        let start = Symbol::non_terminal(start_name.clone());
        if !non_terminal_set.contains(&start) {
            return Err(GrammarError::StartNotNonTerminal {
                name: start_name.into(),
            });
        }

        let resolve = |name: &CompactString| -> Option<Symbol> {
            let as_non_terminal = Symbol::non_terminal(name.clone());
            if non_terminal_set.contains(&as_non_terminal) {
                return Some(as_non_terminal);
            }
            let as_terminal = Symbol::terminal(name.clone());
            if terminal_set.contains(&as_terminal) {
                return Some(as_terminal);
            }
            if name.as_str() == EPSILON_NAME {
                return Some(Symbol::epsilon());
            }
            None
        };

        let mut productions = Vec::with_capacity(self.productions.len());
        for (lhs_name, rhs_names) in self.productions {
            let lhs = Symbol::non_terminal(lhs_name.clone());
            if !non_terminal_set.contains(&lhs) {
                return Err(GrammarError::InvalidProductionHead {
                    name: lhs_name.into(),
                });
            }

            let mut rhs = Vec::with_capacity(rhs_names.len());
            for name in &rhs_names {
                let Some(symbol) = resolve(name) else {
                    return Err(GrammarError::UndeclaredSymbol {
                        name: name.to_string(),
                        production: display_raw(&lhs_name, &rhs_names),
                    });
                };
                // ε is the identity of concatenation; an all-ε body becomes empty.
                if !symbol.is_epsilon() {
                    rhs.push(symbol);
                }
            }
            productions.push(Production::new(lhs, rhs));
        }

        Ok(Grammar {
            productions,
            start,
            terminals,
            non_terminals,
            terminal_set,
            non_terminal_set,
        })
    }
}

fn display_raw(lhs: &str, rhs: &[CompactString]) -> String {
    let body: Vec<&str> = rhs.iter().map(CompactString::as_str).collect();
    format!("{lhs} -> {}", body.join(" "))
}

fn dedup_preserving_order(names: Vec<CompactString>, kind: SymbolKind) -> Vec<Symbol> {
    let mut seen: HashSet<CompactString, ahash::RandomState> = HashSet::default();
    let mut symbols = Vec::with_capacity(names.len());
    for name in names {
        if seen.insert(name.clone()) {
            symbols.push(match kind {
                SymbolKind::Terminal => Symbol::terminal(name),
                SymbolKind::NonTerminal => Symbol::non_terminal(name),
            });
        }
    }
    symbols
}
