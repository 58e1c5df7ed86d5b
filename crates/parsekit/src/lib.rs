//! # parsekit
//!
//! Table-driven front-end machinery for compilers: regular expressions
//! compile into deterministic finite automata for lexical recognition, and
//! context-free grammars compile into LALR(1) parse tables driving a
//! shift/reduce engine.
//!
//! ## Overview
//!
//! Two pipelines share a subset-construction philosophy:
//!
//! - **Lexical**: pattern → postfix (shunting-yard) → NFA (Thompson
//!   construction) → DFA (subset construction over a caller-supplied
//!   alphabet)
//! - **Syntactic**: grammar → canonical LR(1) collection (CLOSURE/GOTO with
//!   FIRST-set lookaheads) → LALR(1) ACTION/GOTO tables (kernel merging,
//!   conflict detection) → shift/reduce driver
//!
//! Everything is built in one synchronous call and is immutable afterwards,
//! so the produced automata and tables can be shared freely across threads
//! for read-only use.
//!
//! ## Quick Start
//!
//! Compiling a pattern down to a DFA:
//!
//! ```rust
//! use parsekit::{Dfa, Nfa};
//!
//! let nfa = Nfa::compile("a(b|c)*")?;
//! let dfa = Dfa::from_nfa(&nfa, &['a', 'b', 'c']);
//!
//! assert!(dfa.accepts("abc"));
//! assert!(!dfa.accepts("ba"));
//! # Ok::<(), parsekit::RegexError>(())
//! ```
//!
//! Building a parse table and recognizing a token stream:
//!
//! ```rust
//! use parsekit::{GrammarBuilder, LalrParser, LalrTable, Token};
//!
//! let grammar = GrammarBuilder::new()
//!     .terminals(["+", "id"])
//!     .non_terminal("E")
//!     .start_symbol("E")
//!     .production("E", ["E", "+", "id"])
//!     .production("E", ["id"])
//!     .build()?;
//!
//! let table = LalrTable::build(&grammar)?;
//! assert!(table.conflicts().is_empty());
//!
//! let parser = LalrParser::new(&table);
//! let input = [Token::new("id", "x"), Token::new("+", "+"), Token::new("id", "y")];
//! assert!(parser.parse(&input).is_ok());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`regex`] - Pattern compilation (shunting-yard, Thompson NFA, subset
//!   construction)
//! - [`grammar`] - Grammar definition and FIRST-set analysis
//! - [`lr`] - LR(1) automaton, LALR(1) tables, shift/reduce driver
//! - [`error`] - Error types for every stage
//! - [`visualize`] - DOT export of the constructed automata

pub mod error;
pub mod grammar;
pub mod lr;
pub mod regex;
pub mod visualize;

pub use error::{GrammarError, ParseError, RegexError, TableError};
pub use grammar::first::{FirstSet, FirstSets};
pub use grammar::{Grammar, GrammarBuilder, Production, Symbol, SymbolKind};
pub use lr::{Action, ItemSet, LalrConfig, LalrParser, LalrTable, Lr1Automaton, LrItem, Token};
pub use regex::{Dfa, Nfa};
