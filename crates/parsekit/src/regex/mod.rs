//! # Regex Module
//!
//! Regular expression compilation for lexical recognition.
//!
//! ## Overview
//!
//! The pipeline has three stages:
//!
//! 1. [`to_postfix`]: shunting-yard conversion of the infix pattern (with
//!    implicit concatenation made explicit) to postfix notation
//! 2. [`Nfa::from_postfix`]: Thompson construction over the postfix stream
//! 3. [`Dfa::from_nfa`]: subset construction over a caller-supplied alphabet
//!
//! Metacharacters are `| * + ? ( )` plus the internal concatenation marker
//! `·`; every other character is an operand. There are no character classes:
//! the alphabet is whatever set of characters the caller supplies to the
//! subset construction.
//!
//! ## Usage
//!
//! ```rust
//! use parsekit::{Dfa, Nfa};
//!
//! let nfa = Nfa::compile("a(b|c)*")?;
//! let dfa = Dfa::from_nfa(&nfa, &['a', 'b', 'c']);
//! assert!(dfa.accepts("acbbc"));
//! assert!(!dfa.accepts("cb"));
//! # Ok::<(), parsekit::RegexError>(())
//! ```

mod dfa;
mod nfa;
mod shunting_yard;

pub use dfa::{Dfa, DfaState};
pub use nfa::{Nfa, NfaState, StateId, Transition};
pub use shunting_yard::{insert_concatenation, to_postfix};
