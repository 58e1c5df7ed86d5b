//! LALR(1) table construction from the canonical LR(1) collection.

use hashbrown::HashMap;

use super::automaton::{ItemSet, Lr1Automaton, AUGMENTED};
use super::config::LalrConfig;
use crate::error::TableError;
use crate::grammar::{Grammar, Production, Symbol};

/// A parse action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Push the given state and advance the input.
    Shift(usize),
    /// Reduce by the production at the given index.
    Reduce(usize),
    /// The input is a sentence of the grammar.
    Accept,
}

type ActionTable = HashMap<(usize, Symbol), Action, ahash::RandomState>;
type GotoTable = HashMap<(usize, Symbol), usize, ahash::RandomState>;

/// LALR(1) ACTION/GOTO tables with accumulated conflict diagnostics.
///
/// LR(1) states sharing a kernel are merged into a single LALR state whose
/// item set is the union of the group (lookaheads simply union, since the
/// kernels match). Conflicting ACTION writes keep the first-written entry
/// and record a diagnostic; [`LalrConfig::strict`] turns any recorded
/// conflict into a construction failure instead.
#[derive(Debug, Clone)]
pub struct LalrTable {
    productions: Vec<Production>,
    states: Vec<ItemSet>,
    merge_map: Vec<usize>,
    action: ActionTable,
    goto_table: GotoTable,
    conflicts: Vec<String>,
    initial_state: usize,
}

impl LalrTable {
    /// Build a table for `grammar` with the default configuration.
    ///
    /// # Errors
    ///
    /// Never fails with the default configuration; the `Result` is shared
    /// with [`build_with`](Self::build_with).
    pub fn build(grammar: &Grammar) -> Result<Self, TableError> {
        Self::build_with(grammar, LalrConfig::default())
    }

    /// Build a table for `grammar`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Conflicts`] when `config.strict` is set and any
    /// shift/reduce or reduce/reduce conflict was recorded.
    pub fn build_with(grammar: &Grammar, config: LalrConfig) -> Result<Self, TableError> {
        Self::from_automaton(Lr1Automaton::build(grammar), config)
    }

    /// Build a table from an already-constructed canonical collection.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Conflicts`] when `config.strict` is set and any
    /// conflict was recorded.
    pub fn from_automaton(
        automaton: Lr1Automaton,
        config: LalrConfig,
    ) -> Result<Self, TableError> {
        let (productions, lr1_states, lr1_transitions) = automaton.into_parts();

        // Merge LR(1) states by kernel. Merged indices are assigned in
        // first-discovery order over the LR(1) numbering so the result is
        // reproducible.
        let mut kernel_index: HashMap<Vec<(usize, usize)>, usize, ahash::RandomState> =
            HashMap::default();
        let mut merge_map = Vec::with_capacity(lr1_states.len());
        let mut groups: Vec<Vec<super::automaton::LrItem>> = Vec::new();
        for state in &lr1_states {
            let merged = match kernel_index.get(&state.kernel()) {
                Some(&existing) => existing,
                None => {
                    let fresh = groups.len();
                    kernel_index.insert(state.kernel(), fresh);
                    groups.push(Vec::new());
                    fresh
                }
            };
            groups[merged].extend(state.items().iter().cloned());
            merge_map.push(merged);
        }
        let states: Vec<ItemSet> = groups.into_iter().map(ItemSet::from_items).collect();

        // Rewrite transitions through the merge map.
        let mut transitions: HashMap<(usize, Symbol), usize, ahash::RandomState> =
            HashMap::default();
        for ((from, symbol), to) in &lr1_transitions {
            transitions.insert((merge_map[*from], symbol.clone()), merge_map[*to]);
        }
        let initial_state = merge_map[0];

        // GOTO entries come from the non-terminal transitions.
        let mut goto_table: GotoTable = GotoTable::default();
        for ((state, symbol), target) in &transitions {
            if symbol.is_non_terminal() {
                goto_table.insert((*state, symbol.clone()), *target);
            }
        }

        // ACTION entries: shifts from terminal transitions, reduces and
        // accept from dot-at-end items. Items iterate in canonical order,
        // so the first-writer-wins policy is deterministic.
        let mut action: ActionTable = ActionTable::default();
        let mut conflicts: Vec<String> = Vec::new();

        for (state_index, state) in states.iter().enumerate() {
            for item in state.items() {
                let production = &productions[item.production];
                match production.rhs.get(item.dot) {
                    Some(symbol) if symbol.is_terminal() => {
                        let Some(&target) = transitions.get(&(state_index, symbol.clone()))
                        else {
                            continue;
                        };
                        let key = (state_index, symbol.clone());
                        match action.get(&key) {
                            None => {
                                action.insert(key, Action::Shift(target));
                            }
                            Some(Action::Reduce(existing)) => {
                                conflicts.push(format!(
                                    "Shift/Reduce conflict in state {state_index} on {symbol}: \
                                     SHIFT {target} vs REDUCE {}",
                                    productions[*existing]
                                ));
                            }
                            Some(_) => {}
                        }
                    }
                    Some(_) => {}
                    None => {
                        let entry = if item.production == AUGMENTED {
                            // Only [S' -> S ·, $] accepts; the augmented item
                            // with any other lookahead is ignored.
                            if item.lookahead.is_eof() {
                                Action::Accept
                            } else {
                                continue;
                            }
                        } else {
                            Action::Reduce(item.production)
                        };

                        let key = (state_index, item.lookahead.clone());
                        match action.get(&key) {
                            None => {
                                action.insert(key, entry);
                            }
                            Some(Action::Shift(target)) => {
                                conflicts.push(format!(
                                    "Shift/Reduce conflict in state {state_index} on {}: \
                                     REDUCE {} vs SHIFT {target}",
                                    item.lookahead, productions[item.production]
                                ));
                            }
                            Some(Action::Reduce(existing)) => {
                                if *existing != item.production {
                                    conflicts.push(format!(
                                        "Reduce/Reduce conflict in state {state_index} on {}: \
                                         REDUCE {} vs REDUCE {}",
                                        item.lookahead,
                                        productions[item.production],
                                        productions[*existing]
                                    ));
                                }
                            }
                            Some(Action::Accept) => {}
                        }
                    }
                }
            }
        }

        if config.strict && !conflicts.is_empty() {
            return Err(TableError::Conflicts { conflicts });
        }

        Ok(Self {
            productions,
            states,
            merge_map,
            action,
            goto_table,
            conflicts,
            initial_state,
        })
    }

    /// The ACTION entry for `state` on `terminal`, if any.
    #[must_use]
    pub fn action(&self, state: usize, terminal: &Symbol) -> Option<&Action> {
        self.action.get(&(state, terminal.clone()))
    }

    /// The GOTO target for `state` on `non_terminal`, if any.
    #[must_use]
    pub fn goto_state(&self, state: usize, non_terminal: &Symbol) -> Option<usize> {
        self.goto_table.get(&(state, non_terminal.clone())).copied()
    }

    /// Conflict diagnostics, in the order they were detected.
    #[must_use]
    pub fn conflicts(&self) -> &[String] {
        &self.conflicts
    }

    /// The merged state containing LR(1) state 0.
    #[must_use]
    pub const fn initial_state(&self) -> usize {
        self.initial_state
    }

    #[must_use]
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// The merged LALR item sets, indexed by state.
    #[must_use]
    pub fn states(&self) -> &[ItemSet] {
        &self.states
    }

    /// The augmented production list; index 0 is `S' -> S`.
    #[must_use]
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    #[must_use]
    pub fn production(&self, index: usize) -> Option<&Production> {
        self.productions.get(index)
    }

    /// The LALR state an LR(1) state was merged into.
    #[must_use]
    pub fn merged_state(&self, lr1_state: usize) -> Option<usize> {
        self.merge_map.get(lr1_state).copied()
    }

    /// Terminal names with a defined ACTION in `state`, sorted for
    /// reproducible error messages.
    #[must_use]
    pub fn expected_terminals(&self, state: usize) -> Vec<String> {
        let mut expected: Vec<String> = self
            .action
            .keys()
            .filter(|(entry_state, _)| *entry_state == state)
            .map(|(_, symbol)| symbol.name().to_string())
            .collect();
        expected.sort();
        expected.dedup();
        expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarBuilder;

    fn tiny_grammar() -> Grammar {
        GrammarBuilder::new()
            .terminal("a")
            .non_terminal("S")
            .start_symbol("S")
            .production("S", ["a"])
            .build()
            .unwrap()
    }

    #[test]
    fn single_production_table_shape() {
        let table = LalrTable::build(&tiny_grammar()).unwrap();
        assert!(table.conflicts().is_empty());

        let initial = table.initial_state();
        let shift = table.action(initial, &Symbol::terminal("a"));
        let Some(Action::Shift(shifted)) = shift else {
            panic!("expected shift on 'a', got {shift:?}");
        };

        // After shifting 'a' the only move is reducing S -> a on `$`.
        match table.action(*shifted, &Symbol::eof()) {
            Some(Action::Reduce(index)) => {
                assert_eq!(table.production(*index).unwrap().to_string(), "S -> a");
            }
            other => panic!("expected reduce on '$', got {other:?}"),
        }

        // GOTO on S from the initial state, then accept on `$`.
        let after_goto = table
            .goto_state(initial, &Symbol::non_terminal("S"))
            .unwrap();
        assert_eq!(table.action(after_goto, &Symbol::eof()), Some(&Action::Accept));
    }

    #[test]
    fn merged_states_never_outnumber_lr1_states() {
        let grammar = GrammarBuilder::new()
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
            .unwrap();
        let automaton = Lr1Automaton::build(&grammar);
        let lr1_count = automaton.states().len();
        let lr1_transitions = automaton.transitions().clone();

        let table = LalrTable::from_automaton(automaton, LalrConfig::default()).unwrap();
        assert!(table.num_states() <= lr1_count);
        assert!(table.conflicts().is_empty());

        // Every LR(1) transition survives the merge.
        for ((from, symbol), to) in &lr1_transitions {
            let merged_from = table.merged_state(*from).unwrap();
            let merged_to = table.merged_state(*to).unwrap();
            if symbol.is_non_terminal() {
                assert_eq!(table.goto_state(merged_from, symbol), Some(merged_to));
            } else {
                assert_eq!(
                    table.action(merged_from, symbol),
                    Some(&Action::Shift(merged_to))
                );
            }
        }
    }

    #[test]
    fn strict_mode_rejects_conflicted_grammars() {
        let grammar = GrammarBuilder::new()
            .terminal("x")
            .non_terminals(["S", "A", "B"])
            .start_symbol("S")
            .production("S", ["A"])
            .production("S", ["B"])
            .production("A", ["x"])
            .production("B", ["x"])
            .build()
            .unwrap();

        let result = LalrTable::build_with(&grammar, LalrConfig { strict: true });
        match result {
            Err(TableError::Conflicts { conflicts }) => {
                assert_eq!(conflicts.len(), 1);
                assert!(conflicts[0].contains("Reduce/Reduce conflict"));
            }
            Ok(_) => panic!("expected strict mode to fail"),
        }
    }

    #[test]
    fn identical_rewrites_are_not_conflicts() {
        // S -> a S | a  puts two shift items for 'a' in the same state;
        // re-writing the identical shift must not count as a conflict.
        let grammar = GrammarBuilder::new()
            .terminal("a")
            .non_terminal("S")
            .start_symbol("S")
            .production("S", ["a", "S"])
            .production("S", ["a"])
            .build()
            .unwrap();
        let table = LalrTable::build(&grammar).unwrap();
        assert!(table.conflicts().is_empty());
    }

    #[test]
    fn expected_terminals_are_sorted() {
        let grammar = GrammarBuilder::new()
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
            .unwrap();
        let table = LalrTable::build(&grammar).unwrap();
        let expected = table.expected_terminals(table.initial_state());
        let mut sorted = expected.clone();
        sorted.sort();
        assert_eq!(expected, sorted);
        assert!(expected.contains(&"id".to_string()));
        assert!(expected.contains(&"(".to_string()));
    }
}
