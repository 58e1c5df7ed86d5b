//! Subset construction: NFA to DFA conversion.

use hashbrown::HashMap;
use std::collections::{BTreeSet, VecDeque};

use super::nfa::{Nfa, StateId};

type SymbolMap = HashMap<char, usize, ahash::RandomState>;

/// A DFA state: the set of NFA states it represents, its accepting flag,
/// and at most one outgoing transition per input symbol.
#[derive(Debug, Clone)]
pub struct DfaState {
    nfa_states: BTreeSet<StateId>,
    is_final: bool,
    transitions: SymbolMap,
}

impl DfaState {
    /// The NFA states this DFA state stands for.
    #[must_use]
    pub const fn nfa_states(&self) -> &BTreeSet<StateId> {
        &self.nfa_states
    }

    /// Whether any represented NFA state is accepting.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        self.is_final
    }

    /// The transition target on `symbol`, if any.
    #[must_use]
    pub fn transition(&self, symbol: char) -> Option<usize> {
        self.transitions.get(&symbol).copied()
    }

    /// All outgoing transitions, in no particular order.
    pub fn transitions(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.transitions.iter().map(|(&symbol, &target)| (symbol, target))
    }
}

/// A deterministic automaton produced by subset construction.
///
/// States are numbered in discovery order from the start state, which is
/// always index 0. Every transition target is a valid index into
/// [`states`](Self::states).
#[derive(Debug, Clone)]
pub struct Dfa {
    states: Vec<DfaState>,
    start: usize,
}

impl Dfa {
    /// Convert `nfa` into a DFA over the given alphabet.
    ///
    /// Only symbols in `alphabet` are considered: a character that appears
    /// in the source pattern but not in the alphabet simply never gets a
    /// transition, making the strings that need it unrecognizable.
    #[must_use]
    pub fn from_nfa(nfa: &Nfa, alphabet: &[char]) -> Self {
        let mut states: Vec<DfaState> = Vec::new();
        let mut index_of: HashMap<BTreeSet<StateId>, usize, ahash::RandomState> =
            HashMap::default();
        let mut worklist: VecDeque<usize> = VecDeque::new();

        let initial = nfa.epsilon_closure([nfa.start()]);
        let is_final = initial.iter().any(|&id| nfa.state(id).is_final);
        index_of.insert(initial.clone(), 0);
        states.push(DfaState {
            nfa_states: initial,
            is_final,
            transitions: SymbolMap::default(),
        });
        worklist.push_back(0);

        while let Some(current) = worklist.pop_front() {
            for &symbol in alphabet {
                let moved = nfa.move_on(states[current].nfa_states(), symbol);
                let closure = nfa.epsilon_closure(moved);
                if closure.is_empty() {
                    continue;
                }
                let target = match index_of.get(&closure) {
                    Some(&existing) => existing,
                    None => {
                        let fresh = states.len();
                        let is_final = closure.iter().any(|&id| nfa.state(id).is_final);
                        index_of.insert(closure.clone(), fresh);
                        states.push(DfaState {
                            nfa_states: closure,
                            is_final,
                            transitions: SymbolMap::default(),
                        });
                        worklist.push_back(fresh);
                        fresh
                    }
                };
                states[current].transitions.insert(symbol, target);
            }
        }

        Self { states, start: 0 }
    }

    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    /// Run the automaton over `input`. A missing transition (including any
    /// character outside the construction alphabet) rejects.
    #[must_use]
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = self.start;
        for symbol in input.chars() {
            match self.states[current].transition(symbol) {
                Some(next) => current = next,
                None => return false,
            }
        }
        self.states[current].is_final
    }
}
