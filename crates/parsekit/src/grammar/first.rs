//! FIRST-set computation.
//!
//! FIRST(X) is the set of terminals that can begin a string derived from X.
//! Nullability ("ε ∈ FIRST") is carried as a dedicated flag on
//! [`FirstSet`] rather than as a sentinel set element, so no consumer ever
//! has to filter ε back out of a lookahead set.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use super::{Grammar, Symbol};

/// The FIRST set of a symbol or sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstSet {
    /// Terminals that can begin a derivation.
    pub terminals: HashSet<Symbol, ahash::RandomState>,
    /// Whether the symbol or sequence can derive the empty string.
    pub nullable: bool,
}

/// Precomputed FIRST sets for every declared grammar symbol.
#[derive(Debug, Clone)]
pub struct FirstSets {
    table: HashMap<Symbol, FirstSet, ahash::RandomState>,
}

impl FirstSets {
    /// Compute FIRST for every declared symbol by fixed-point iteration.
    ///
    /// Terminals seed their own singleton sets. For each production
    /// `A -> X1 X2 .. Xn`, FIRST(X1) flows into FIRST(A); FIRST(X2) follows
    /// if X1 is nullable, and so on. A is nullable when every body symbol is
    /// (including the empty body).
    #[must_use]
    pub fn compute(grammar: &Grammar) -> Self {
        let mut table: HashMap<Symbol, FirstSet, ahash::RandomState> = HashMap::default();

        for terminal in grammar.terminals() {
            let mut first = FirstSet::default();
            first.terminals.insert(terminal.clone());
            table.insert(terminal.clone(), first);
        }
        for non_terminal in grammar.non_terminals() {
            table.insert(non_terminal.clone(), FirstSet::default());
        }

        let mut changed = true;
        while changed {
            changed = false;
            for production in grammar.productions() {
                let mut gathered: SmallVec<[Symbol; 8]> = SmallVec::new();
                let mut all_nullable = true;
                for symbol in &production.rhs {
                    match table.get(symbol) {
                        Some(first) => {
                            gathered.extend(first.terminals.iter().cloned());
                            if !first.nullable {
                                all_nullable = false;
                                break;
                            }
                        }
                        None => {
                            all_nullable = false;
                            break;
                        }
                    }
                }

                let Some(entry) = table.get_mut(&production.lhs) else {
                    continue;
                };
                for symbol in gathered {
                    if entry.terminals.insert(symbol) {
                        changed = true;
                    }
                }
                if all_nullable && !entry.nullable {
                    entry.nullable = true;
                    changed = true;
                }
            }
        }

        Self { table }
    }

    /// FIRST of a single symbol, if it was declared in the grammar.
    #[must_use]
    pub fn first(&self, symbol: &Symbol) -> Option<&FirstSet> {
        self.table.get(symbol)
    }

    /// FIRST of a symbol sequence.
    ///
    /// The empty sequence is nullable. A symbol absent from the table is an
    /// external terminal (such as the end marker `$`): it contributes itself
    /// and terminates the walk without a nullable continuation.
    #[must_use]
    pub fn of_sequence(&self, symbols: &[Symbol]) -> FirstSet {
        let mut result = FirstSet::default();
        for symbol in symbols {
            match self.table.get(symbol) {
                Some(first) => {
                    result.terminals.extend(first.terminals.iter().cloned());
                    if !first.nullable {
                        return result;
                    }
                }
                None => {
                    if symbol.is_terminal() {
                        result.terminals.insert(symbol.clone());
                    }
                    return result;
                }
            }
        }
        result.nullable = true;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarBuilder;

    fn expression_grammar() -> Grammar {
        GrammarBuilder::new()
            .terminals(["+", "*", "(", ")", "id"])
            .non_terminals(["S", "T", "F"])
            .start_symbol("S")
            .production("S", ["S", "+", "T"])
            .production("S", ["T"])
            .production("T", ["T", "*", "F"])
            .production("T", ["F"])
            .production("F", ["(", "S", ")"])
            .production("F", ["id"])
            .build()
            .unwrap()
    }

    fn contains(first: &FirstSet, name: &str) -> bool {
        first.terminals.contains(&Symbol::terminal(name))
    }

    #[test]
    fn terminal_first_is_itself() {
        let grammar = expression_grammar();
        let firsts = FirstSets::compute(&grammar);
        let first = firsts.first(&Symbol::terminal("id")).unwrap();
        assert_eq!(first.terminals.len(), 1);
        assert!(contains(first, "id"));
        assert!(!first.nullable);
    }

    #[test]
    fn first_propagates_through_unit_productions() {
        let grammar = expression_grammar();
        let firsts = FirstSets::compute(&grammar);
        let first = firsts.first(&Symbol::non_terminal("S")).unwrap();
        assert!(contains(first, "("));
        assert!(contains(first, "id"));
        assert!(!contains(first, "+"));
        assert!(!first.nullable);
    }

    #[test]
    fn nullable_flag_flows_through_epsilon_productions() {
        let grammar = GrammarBuilder::new()
            .terminals(["a", "b"])
            .non_terminals(["S", "A", "B"])
            .start_symbol("S")
            .production("S", ["A", "B"])
            .production("A", ["a"])
            .production("A", ["ε"])
            .production("B", ["b"])
            .build()
            .unwrap();
        let firsts = FirstSets::compute(&grammar);

        let a = firsts.first(&Symbol::non_terminal("A")).unwrap();
        assert!(a.nullable);
        assert!(contains(a, "a"));

        // S -> A B with A nullable: FIRST(S) sees through A into B.
        let s = firsts.first(&Symbol::non_terminal("S")).unwrap();
        assert!(contains(s, "a"));
        assert!(contains(s, "b"));
        assert!(!s.nullable);
    }

    #[test]
    fn sequence_of_nothing_is_nullable() {
        let grammar = expression_grammar();
        let firsts = FirstSets::compute(&grammar);
        let first = firsts.of_sequence(&[]);
        assert!(first.nullable);
        assert!(first.terminals.is_empty());
    }

    #[test]
    fn external_terminal_ends_the_sequence_walk() {
        let grammar = GrammarBuilder::new()
            .terminals(["a"])
            .non_terminals(["S", "A"])
            .start_symbol("S")
            .production("S", ["A"])
            .production("A", ["a"])
            .production("A", ["ε"])
            .build()
            .unwrap();
        let firsts = FirstSets::compute(&grammar);

        // A is nullable, so the walk reaches `$`; `$` is undeclared and
        // contributes itself with no nullable continuation.
        let sequence = [Symbol::non_terminal("A"), Symbol::eof()];
        let first = firsts.of_sequence(&sequence);
        assert!(contains(&first, "a"));
        assert!(first.terminals.contains(&Symbol::eof()));
        assert!(!first.nullable);
    }
}
