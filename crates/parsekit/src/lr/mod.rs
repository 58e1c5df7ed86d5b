//! # LR Module
//!
//! LALR(1) parse table construction and the shift/reduce engine.
//!
//! ## Overview
//!
//! The pipeline runs in three stages:
//!
//! 1. [`Lr1Automaton::build`]: augment the grammar with `S' -> S` and build
//!    the canonical collection of LR(1) item sets via CLOSURE/GOTO, with
//!    lookaheads drawn from FIRST sets
//! 2. [`LalrTable::build`]: merge states that share a kernel, rewrite the
//!    transitions, and fill the ACTION/GOTO tables with conflict detection
//! 3. [`LalrParser::parse`]: drive a state stack over a token sequence to
//!    acceptance or a syntax error
//!
//! Conflicts do not fail construction by default: the first-written action
//! wins and every conflict is recorded on the table as a diagnostic string,
//! so all of them can be inspected at once. [`LalrConfig`] offers a strict
//! mode that rejects conflicted grammars outright.
//!
//! ## Usage
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

mod automaton;
mod config;
mod driver;
mod table;

pub use automaton::{ItemSet, Lr1Automaton, LrItem};
pub use config::LalrConfig;
pub use driver::{LalrParser, Token};
pub use table::{Action, LalrTable};
