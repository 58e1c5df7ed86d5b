//! Property-based tests for the automata pipeline.
//!
//! These generate random patterns over a three-letter alphabet and random
//! candidate words, then check the laws the construction promises.

use proptest::prelude::*;

use parsekit::regex::{insert_concatenation, to_postfix};
use parsekit::{Dfa, Nfa};

const ALPHABET: [char; 3] = ['a', 'b', 'c'];

/// Random well-formed patterns: single letters composed with concatenation,
/// alternation, and the three postfix operators.
fn pattern_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("a".to_string()),
        Just("b".to_string()),
        Just("c".to_string()),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| format!("{lhs}{rhs}")),
            (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| format!("({lhs}|{rhs})")),
            inner.clone().prop_map(|body| format!("({body})*")),
            inner.clone().prop_map(|body| format!("({body})+")),
            inner.prop_map(|body| format!("({body})?")),
        ]
    })
}

proptest! {
    #[test]
    fn nfa_and_dfa_agree_on_acceptance(
        pattern in pattern_strategy(),
        word in "[abc]{0,6}",
    ) {
        let nfa = Nfa::compile(&pattern).expect("generated pattern is well formed");
        let dfa = Dfa::from_nfa(&nfa, &ALPHABET);
        prop_assert_eq!(
            nfa.accepts(&word),
            dfa.accepts(&word),
            "pattern {:?}, word {:?}", pattern, word
        );
    }

    #[test]
    fn concatenation_insertion_is_idempotent(raw in "[abc()|*+?·]{0,12}") {
        let once = insert_concatenation(&raw);
        prop_assert_eq!(insert_concatenation(&once), once);
    }

    #[test]
    fn postfix_conversion_is_stable(pattern in pattern_strategy()) {
        let first = to_postfix(&pattern).expect("generated pattern is well formed");
        let second = to_postfix(&pattern).expect("generated pattern is well formed");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn dfa_finality_matches_its_nfa_state_set(pattern in pattern_strategy()) {
        let nfa = Nfa::compile(&pattern).expect("generated pattern is well formed");
        let dfa = Dfa::from_nfa(&nfa, &ALPHABET);
        for state in dfa.states() {
            let expected = state.nfa_states().iter().any(|&id| nfa.state(id).is_final);
            prop_assert_eq!(state.is_final(), expected);
        }
    }

    #[test]
    fn dfa_transitions_stay_inside_the_collection(pattern in pattern_strategy()) {
        let nfa = Nfa::compile(&pattern).expect("generated pattern is well formed");
        let dfa = Dfa::from_nfa(&nfa, &ALPHABET);
        for state in dfa.states() {
            for (symbol, target) in state.transitions() {
                prop_assert!(ALPHABET.contains(&symbol));
                prop_assert!(target < dfa.states().len());
            }
        }
    }

    #[test]
    fn accepted_words_stay_accepted_after_a_star_wrap(word in "[abc]{1,5}") {
        // (w)* accepts w, ww, and the empty string.
        let pattern = format!("({word})*");
        let nfa = Nfa::compile(&pattern).expect("pattern is well formed");
        let dfa = Dfa::from_nfa(&nfa, &ALPHABET);
        prop_assert!(dfa.accepts(""));
        prop_assert!(dfa.accepts(&word));
        let doubled = format!("{word}{word}");
        prop_assert!(dfa.accepts(&doubled));
    }
}
