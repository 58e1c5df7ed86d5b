//! Thompson construction of nondeterministic finite automata.
//!
//! States live in an arena owned by the [`Nfa`]; transitions reference their
//! targets by index, which gives identity semantics for free and lets `*`
//! and `+` introduce cycles without any reference-counting ceremony.

use smallvec::SmallVec;
use std::collections::BTreeSet;

use super::shunting_yard::{self, is_operand, CONCAT};
use crate::error::RegexError;

/// Index of a state in the owning automaton's arena.
pub type StateId = usize;

/// A labelled edge. A `None` label is an ε transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub label: Option<char>,
    pub target: StateId,
}

/// A single NFA state.
#[derive(Debug, Clone, Default)]
pub struct NfaState {
    pub is_final: bool,
    pub transitions: SmallVec<[Transition; 2]>,
}

/// A Thompson-constructed automaton with designated start and end states.
///
/// After construction the end state is the unique accepting state: each
/// composition step clears the accepting flag of the fragments it absorbs
/// and marks its own fresh end state instead.
#[derive(Debug, Clone)]
pub struct Nfa {
    states: Vec<NfaState>,
    start: StateId,
    end: StateId,
}

#[derive(Clone, Copy)]
struct Fragment {
    start: StateId,
    end: StateId,
}

#[derive(Default)]
struct ThompsonBuilder {
    states: Vec<NfaState>,
}

impl ThompsonBuilder {
    fn state(&mut self) -> StateId {
        self.states.push(NfaState::default());
        self.states.len() - 1
    }

    fn link(&mut self, from: StateId, label: Option<char>, to: StateId) {
        self.states[from].transitions.push(Transition { label, target: to });
    }

    fn literal(&mut self, symbol: char) -> Fragment {
        let start = self.state();
        let end = self.state();
        self.states[end].is_final = true;
        self.link(start, Some(symbol), end);
        Fragment { start, end }
    }

    fn concatenate(&mut self, left: Fragment, right: Fragment) -> Fragment {
        self.link(left.end, None, right.start);
        self.states[left.end].is_final = false;
        Fragment {
            start: left.start,
            end: right.end,
        }
    }

    fn alternate(&mut self, left: Fragment, right: Fragment) -> Fragment {
        let start = self.state();
        let end = self.state();
        self.link(start, None, left.start);
        self.link(start, None, right.start);
        self.link(left.end, None, end);
        self.link(right.end, None, end);
        self.states[left.end].is_final = false;
        self.states[right.end].is_final = false;
        self.states[end].is_final = true;
        Fragment { start, end }
    }

    fn zero_or_more(&mut self, inner: Fragment) -> Fragment {
        let start = self.state();
        let end = self.state();
        self.link(start, None, end);
        self.link(start, None, inner.start);
        self.link(inner.end, None, inner.start);
        self.link(inner.end, None, end);
        self.states[inner.end].is_final = false;
        self.states[end].is_final = true;
        Fragment { start, end }
    }

    fn one_or_more(&mut self, inner: Fragment) -> Fragment {
        let start = self.state();
        let end = self.state();
        self.link(start, None, inner.start);
        self.link(inner.end, None, inner.start);
        self.link(inner.end, None, end);
        self.states[inner.end].is_final = false;
        self.states[end].is_final = true;
        Fragment { start, end }
    }

    fn zero_or_one(&mut self, inner: Fragment) -> Fragment {
        let start = self.state();
        let end = self.state();
        self.link(start, None, end);
        self.link(start, None, inner.start);
        self.link(inner.end, None, end);
        self.states[inner.end].is_final = false;
        self.states[end].is_final = true;
        Fragment { start, end }
    }
}

fn pop_one(stack: &mut Vec<Fragment>, operator: char) -> Result<Fragment, RegexError> {
    stack.pop().ok_or(RegexError::MissingOperand { operator })
}

fn pop_two(stack: &mut Vec<Fragment>, operator: char) -> Result<(Fragment, Fragment), RegexError> {
    let right = pop_one(stack, operator)?;
    let left = pop_one(stack, operator)?;
    Ok((left, right))
}

impl Nfa {
    /// Compile an infix pattern into an NFA.
    ///
    /// # Errors
    ///
    /// Returns a [`RegexError`] if the pattern is empty, has mismatched
    /// parentheses, or applies an operator to missing operands.
    pub fn compile(pattern: &str) -> Result<Self, RegexError> {
        let postfix = shunting_yard::to_postfix(pattern)?;
        Self::from_postfix(&postfix)
    }

    /// Build an NFA from a postfix expression.
    ///
    /// # Errors
    ///
    /// Returns a [`RegexError`] if an operator lacks operands, an operator
    /// character is not recognized, or the expression does not reduce to a
    /// single fragment.
    pub fn from_postfix(postfix: &str) -> Result<Self, RegexError> {
        if postfix.is_empty() {
            return Err(RegexError::EmptyPattern);
        }

        let mut builder = ThompsonBuilder::default();
        let mut stack: Vec<Fragment> = Vec::new();

        for token in postfix.chars() {
            if is_operand(token) {
                stack.push(builder.literal(token));
                continue;
            }
            let fragment = match token {
                CONCAT => {
                    let (left, right) = pop_two(&mut stack, token)?;
                    builder.concatenate(left, right)
                }
                '|' => {
                    let (left, right) = pop_two(&mut stack, token)?;
                    builder.alternate(left, right)
                }
                '*' => {
                    let inner = pop_one(&mut stack, token)?;
                    builder.zero_or_more(inner)
                }
                '+' => {
                    let inner = pop_one(&mut stack, token)?;
                    builder.one_or_more(inner)
                }
                '?' => {
                    let inner = pop_one(&mut stack, token)?;
                    builder.zero_or_one(inner)
                }
                _ => return Err(RegexError::UnknownOperator { operator: token }),
            };
            stack.push(fragment);
        }

        if stack.len() != 1 {
            return Err(RegexError::DanglingFragments { count: stack.len() });
        }
        let fragment = stack[0];
        Ok(Self {
            states: builder.states,
            start: fragment.start,
            end: fragment.end,
        })
    }

    #[must_use]
    pub const fn start(&self) -> StateId {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> StateId {
        self.end
    }

    #[must_use]
    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    #[must_use]
    pub fn state(&self, id: StateId) -> &NfaState {
        &self.states[id]
    }

    /// Simulate the automaton over `input`.
    #[must_use]
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = self.epsilon_closure([self.start]);
        for symbol in input.chars() {
            let moved = self.move_on(&current, symbol);
            current = self.epsilon_closure(moved);
            if current.is_empty() {
                return false;
            }
        }
        current.iter().any(|&id| self.states[id].is_final)
    }

    /// The smallest superset of `seed` closed under ε transitions.
    pub(crate) fn epsilon_closure(
        &self,
        seed: impl IntoIterator<Item = StateId>,
    ) -> BTreeSet<StateId> {
        let mut closure = BTreeSet::new();
        let mut worklist: Vec<StateId> = seed.into_iter().collect();
        while let Some(id) = worklist.pop() {
            if closure.insert(id) {
                for transition in &self.states[id].transitions {
                    if transition.label.is_none() {
                        worklist.push(transition.target);
                    }
                }
            }
        }
        closure
    }

    /// States reachable from `set` over a single `symbol` transition.
    pub(crate) fn move_on(&self, set: &BTreeSet<StateId>, symbol: char) -> BTreeSet<StateId> {
        let mut result = BTreeSet::new();
        for &id in set {
            for transition in &self.states[id].transitions {
                if transition.label == Some(symbol) {
                    result.insert(transition.target);
                }
            }
        }
        result
    }
}
