//! Canonical LR(1) collection construction.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;
use std::collections::VecDeque;

use crate::grammar::first::FirstSets;
use crate::grammar::{Grammar, Production, Symbol};

/// Index of the augmented start production in the automaton's production
/// list. Accept detection keys on this index rather than on the `'`-suffixed
/// symbol name.
pub(crate) const AUGMENTED: usize = 0;

/// An LR(1) item: a production, a dot position within its body, and a
/// single-terminal lookahead.
///
/// Equality, hashing, and ordering are structural over all three fields;
/// item sets are identified by set equality, so this must hold exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LrItem {
    /// Index into the automaton's production list.
    pub production: usize,
    /// Dot position, `0..=rhs.len()`.
    pub dot: usize,
    /// Terminal expected after the production is reduced.
    pub lookahead: Symbol,
}

impl LrItem {
    #[must_use]
    pub const fn new(production: usize, dot: usize, lookahead: Symbol) -> Self {
        Self {
            production,
            dot,
            lookahead,
        }
    }
}

/// A canonical set of LR(1) items.
///
/// Items are kept sorted and deduplicated, so equality and hashing are
/// independent of insertion order and the set is usable as a map key
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemSet {
    items: Vec<LrItem>,
}

impl ItemSet {
    pub(crate) fn from_items(mut items: Vec<LrItem>) -> Self {
        items.sort();
        items.dedup();
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[LrItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, item: &LrItem) -> bool {
        self.items.binary_search(item).is_ok()
    }

    /// The kernel: dot positions with lookaheads stripped. Two LR(1) states
    /// merge into one LALR(1) state exactly when their kernels are equal.
    pub(crate) fn kernel(&self) -> Vec<(usize, usize)> {
        let mut kernel: Vec<(usize, usize)> = self
            .items
            .iter()
            .map(|item| (item.production, item.dot))
            .collect();
        kernel.dedup();
        kernel
    }
}

/// The canonical collection of LR(1) item sets for an augmented grammar.
///
/// Production 0 is the augmentation `S' -> S`; the original grammar's
/// productions follow in declaration order. States are numbered in
/// discovery order from the initial state (index 0), and the discovery walk
/// visits grammar symbols in declaration order, so the numbering is
/// reproducible.
#[derive(Debug, Clone)]
pub struct Lr1Automaton {
    productions: Vec<Production>,
    states: Vec<ItemSet>,
    transitions: HashMap<(usize, Symbol), usize, ahash::RandomState>,
}

impl Lr1Automaton {
    /// Build the canonical collection for `grammar`.
    #[must_use]
    pub fn build(grammar: &Grammar) -> Self {
        let start = grammar.start_symbol().clone();
        let augmented = Symbol::non_terminal(format!("{}'", start.name()));

        let mut productions = Vec::with_capacity(grammar.productions().len() + 1);
        productions.push(Production::new(augmented, vec![start]));
        productions.extend(grammar.productions().iter().cloned());

        let firsts = FirstSets::compute(grammar);

        let initial = closure(
            &productions,
            &firsts,
            vec![LrItem::new(AUGMENTED, 0, Symbol::eof())],
        );

        let mut states = vec![initial.clone()];
        let mut index_of: HashMap<ItemSet, usize, ahash::RandomState> = HashMap::default();
        index_of.insert(initial, 0);
        let mut transitions: HashMap<(usize, Symbol), usize, ahash::RandomState> =
            HashMap::default();
        let mut worklist: VecDeque<usize> = VecDeque::from([0]);

        let symbols: Vec<Symbol> = grammar
            .terminals()
            .iter()
            .chain(grammar.non_terminals())
            .cloned()
            .collect();

        while let Some(current) = worklist.pop_front() {
            for symbol in &symbols {
                let target_set = goto(&productions, &firsts, &states[current], symbol);
                if target_set.is_empty() {
                    continue;
                }
                let target = match index_of.get(&target_set) {
                    Some(&existing) => existing,
                    None => {
                        let fresh = states.len();
                        states.push(target_set.clone());
                        index_of.insert(target_set, fresh);
                        worklist.push_back(fresh);
                        fresh
                    }
                };
                transitions.insert((current, symbol.clone()), target);
            }
        }

        Self {
            productions,
            states,
            transitions,
        }
    }

    /// The augmented production list; index 0 is `S' -> S`.
    #[must_use]
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    #[must_use]
    pub fn states(&self) -> &[ItemSet] {
        &self.states
    }

    #[must_use]
    pub fn transitions(&self) -> &HashMap<(usize, Symbol), usize, ahash::RandomState> {
        &self.transitions
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Vec<Production>,
        Vec<ItemSet>,
        HashMap<(usize, Symbol), usize, ahash::RandomState>,
    ) {
        (self.productions, self.states, self.transitions)
    }
}

/// CLOSURE: for every item `[A -> α · B β, a]` with `B` a non-terminal and
/// every production `B -> γ`, add `[B -> · γ, b]` for each terminal
/// `b ∈ FIRST(β a)`.
fn closure(productions: &[Production], firsts: &FirstSets, seed: Vec<LrItem>) -> ItemSet {
    let mut items: HashSet<LrItem, ahash::RandomState> = HashSet::default();
    let mut worklist: VecDeque<LrItem> = VecDeque::new();
    for item in seed {
        if items.insert(item.clone()) {
            worklist.push_back(item);
        }
    }

    while let Some(item) = worklist.pop_front() {
        let production = &productions[item.production];
        let Some(next) = production.rhs.get(item.dot) else {
            continue;
        };
        if !next.is_non_terminal() {
            continue;
        }

        let mut sequence: SmallVec<[Symbol; 8]> =
            production.rhs[item.dot + 1..].iter().cloned().collect();
        sequence.push(item.lookahead.clone());
        let first = firsts.of_sequence(&sequence);

        for (index, candidate) in productions.iter().enumerate() {
            if candidate.lhs != *next {
                continue;
            }
            for lookahead in &first.terminals {
                let new_item = LrItem::new(index, 0, lookahead.clone());
                if items.insert(new_item.clone()) {
                    worklist.push_back(new_item);
                }
            }
        }
    }

    ItemSet::from_items(items.into_iter().collect())
}

/// GOTO: advance the dot over `symbol` in every item that allows it, then
/// close the result.
fn goto(
    productions: &[Production],
    firsts: &FirstSets,
    state: &ItemSet,
    symbol: &Symbol,
) -> ItemSet {
    let mut moved = Vec::new();
    for item in state.items() {
        if productions[item.production].rhs.get(item.dot) == Some(symbol) {
            moved.push(LrItem::new(
                item.production,
                item.dot + 1,
                item.lookahead.clone(),
            ));
        }
    }
    if moved.is_empty() {
        return ItemSet::from_items(moved);
    }
    closure(productions, firsts, moved)
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
    fn initial_state_holds_the_augmented_item() {
        let automaton = Lr1Automaton::build(&tiny_grammar());
        let initial = &automaton.states()[0];
        assert!(initial.contains(&LrItem::new(AUGMENTED, 0, Symbol::eof())));
        // Closure pulls in [S -> · a, $].
        assert!(initial.contains(&LrItem::new(1, 0, Symbol::eof())));
    }

    #[test]
    fn transitions_cover_every_viable_symbol() {
        let automaton = Lr1Automaton::build(&tiny_grammar());
        let shift = automaton
            .transitions()
            .get(&(0, Symbol::terminal("a")))
            .copied();
        let goto = automaton
            .transitions()
            .get(&(0, Symbol::non_terminal("S")))
            .copied();
        assert!(shift.is_some());
        assert!(goto.is_some());
        assert_ne!(shift, goto);
    }

    #[test]
    fn every_state_is_closed() {
        let grammar = GrammarBuilder::new()
            .terminals(["+", "id"])
            .non_terminals(["E", "T"])
            .start_symbol("E")
            .production("E", ["E", "+", "T"])
            .production("E", ["T"])
            .production("T", ["id"])
            .build()
            .unwrap();
        let automaton = Lr1Automaton::build(&grammar);
        let firsts = FirstSets::compute(&grammar);
        let productions = automaton.productions();

        for state in automaton.states() {
            for item in state.items() {
                let production = &productions[item.production];
                let Some(next) = production.rhs.get(item.dot) else {
                    continue;
                };
                if !next.is_non_terminal() {
                    continue;
                }
                let mut sequence: Vec<Symbol> = production.rhs[item.dot + 1..].to_vec();
                sequence.push(item.lookahead.clone());
                let first = firsts.of_sequence(&sequence);
                for (index, candidate) in productions.iter().enumerate() {
                    if candidate.lhs != *next {
                        continue;
                    }
                    for lookahead in &first.terminals {
                        let expected = LrItem::new(index, 0, lookahead.clone());
                        assert!(state.contains(&expected), "missing {expected:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn item_set_identity_ignores_insertion_order() {
        let a = LrItem::new(1, 0, Symbol::terminal("x"));
        let b = LrItem::new(0, 1, Symbol::eof());
        let forward = ItemSet::from_items(vec![a.clone(), b.clone()]);
        let backward = ItemSet::from_items(vec![b, a]);
        assert_eq!(forward, backward);
    }
}
