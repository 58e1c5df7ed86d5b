//! # Grammar Module
//!
//! Context-free grammar definition.
//!
//! ## Overview
//!
//! A [`Grammar`] is a finite set of [`Production`]s over [`Symbol`]s, split
//! into disjoint terminal and non-terminal partitions, with a designated
//! start non-terminal. Grammars are immutable once built; construct them
//! with [`GrammarBuilder`].
//!
//! ## Usage
//!
//! ```rust
//! use parsekit::GrammarBuilder;
//!
//! let grammar = GrammarBuilder::new()
//!     .terminals(["a", "b"])
//!     .non_terminals(["S"])
//!     .start_symbol("S")
//!     .production("S", ["a", "S", "b"])
//!     .production("S", ["ε"])
//!     .build()?;
//! assert_eq!(grammar.terminals().len(), 2);
//! # Ok::<(), parsekit::GrammarError>(())
//! ```
//!
//! Production lists iterate in declaration order. Parse-table state identity
//! depends only on item sets, but conflict messages are reproducible only
//! because this order (and therefore state discovery order) is stable.

pub mod first;

mod builder;
mod symbol;

pub use builder::{Grammar, GrammarBuilder, Production};
pub use symbol::{Symbol, SymbolKind};
