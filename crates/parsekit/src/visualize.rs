//! DOT/Graphviz rendering of the constructed automata.
//!
//! Node and edge ordering is deterministic so the output is diffable across
//! runs of the same build.

use std::fmt::Write;

use crate::lr::Lr1Automaton;
use crate::regex::Dfa;

/// Render a DFA as a Graphviz digraph.
///
/// Accepting states are drawn as double circles; the start state gets an
/// incoming arrow from a hidden node.
#[must_use]
pub fn dfa_dot(dfa: &Dfa) -> String {
    let mut output = String::new();

    writeln!(output, "digraph Dfa {{").unwrap();
    writeln!(output, "  rankdir=LR;").unwrap();
    writeln!(output, "  node [shape=circle];").unwrap();
    writeln!(output, "  start [shape=point];").unwrap();
    writeln!(output, "  start -> s{};", dfa.start()).unwrap();

    for (index, state) in dfa.states().iter().enumerate() {
        if state.is_final() {
            writeln!(output, "  s{index} [shape=doublecircle];").unwrap();
        }
    }

    for (index, state) in dfa.states().iter().enumerate() {
        let mut edges: Vec<(char, usize)> = state.transitions().collect();
        edges.sort_unstable();
        for (symbol, target) in edges {
            writeln!(output, "  s{index} -> s{target} [label=\"{symbol}\"];").unwrap();
        }
    }

    writeln!(output, "}}").unwrap();
    output
}

/// Render the LR(1) canonical collection as a Graphviz digraph.
///
/// States are labelled with their index and item count; edges carry the
/// grammar symbol of the transition.
#[must_use]
pub fn automaton_dot(automaton: &Lr1Automaton) -> String {
    let mut output = String::new();

    writeln!(output, "digraph Lr1 {{").unwrap();
    writeln!(output, "  rankdir=LR;").unwrap();
    writeln!(output, "  node [shape=box];").unwrap();

    for (index, state) in automaton.states().iter().enumerate() {
        writeln!(
            output,
            "  i{index} [label=\"I{index}\\n{} items\"];",
            state.len()
        )
        .unwrap();
    }

    let mut edges: Vec<(usize, &str, usize)> = automaton
        .transitions()
        .iter()
        .map(|((from, symbol), to)| (*from, symbol.name(), *to))
        .collect();
    edges.sort_unstable();
    for (from, symbol, to) in edges {
        writeln!(output, "  i{from} -> i{to} [label=\"{symbol}\"];").unwrap();
    }

    writeln!(output, "}}").unwrap();
    output
}
