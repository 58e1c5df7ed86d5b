//! # Error Types
//!
//! Error types for every stage of the pipeline.
//!
//! ## Overview
//!
//! Each failure domain has its own enum:
//!
//! - [`RegexError`]: malformed regular expressions (pattern compilation)
//! - [`GrammarError`]: malformed grammar definitions (grammar construction)
//! - [`TableError`]: table construction failures in strict mode
//! - [`ParseError`]: syntax errors raised by the shift/reduce driver
//!
//! Construction-time errors ([`RegexError`], [`GrammarError`]) abort the
//! build. Table conflicts are accumulated on the table and only become a
//! [`TableError`] when strict mode is requested. A [`ParseError`] fails the
//! parse it was raised in; the driver makes no recovery attempt.
//!
//! ## Diagnostics Support
//!
//! When the `diagnostics` feature is enabled, errors integrate with
//! [`miette`] for rich error reporting.

use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// Errors raised while compiling a regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum RegexError {
    #[error("empty pattern")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(regex::empty_pattern)))]
    EmptyPattern,

    #[error("mismatched parenthesis in pattern")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(regex::unbalanced_paren)))]
    UnbalancedParenthesis,

    #[error("operator '{operator}' is missing an operand")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(regex::missing_operand)))]
    MissingOperand { operator: char },

    #[error("unknown operator '{operator}' in postfix expression")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(regex::unknown_operator)))]
    UnknownOperator { operator: char },

    #[error("malformed postfix expression: {count} fragments left after construction")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(regex::dangling_fragments)))]
    DanglingFragments { count: usize },
}

/// Errors raised while building a grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum GrammarError {
    #[error("missing start symbol")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::missing_start)))]
    MissingStartSymbol,

    #[error("start symbol '{name}' is not a declared non-terminal")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::start_not_non_terminal)))]
    StartNotNonTerminal { name: String },

    #[error("production head '{name}' is not a declared non-terminal")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::invalid_head)))]
    InvalidProductionHead { name: String },

    #[error("undeclared symbol '{name}' in production '{production}'")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::undeclared_symbol)))]
    UndeclaredSymbol { name: String, production: String },
}

/// Errors raised while building a parse table.
///
/// Conflicts are ordinarily collected on the table and exposed through
/// [`LalrTable::conflicts`](crate::lr::LalrTable::conflicts); this error
/// only fires when strict mode turns them fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum TableError {
    #[error("grammar is not LALR(1): {} conflict(s) recorded", .conflicts.len())]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(table::conflicts)))]
    Conflicts { conflicts: Vec<String> },
}

/// Errors raised by the shift/reduce driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum ParseError {
    #[error("syntax error in state {state}: expected one of [{}]; found '{found}'", .expected.join(", "))]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(parser::unexpected_token)))]
    UnexpectedToken {
        state: usize,
        found: String,
        expected: Vec<String>,
    },

    #[error("no goto entry in state {state} for non-terminal '{non_terminal}'")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(parser::missing_goto)))]
    MissingGoto { state: usize, non_terminal: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regex_error_messages() {
        let error = RegexError::MissingOperand { operator: '*' };
        assert_eq!(error.to_string(), "operator '*' is missing an operand");

        let error = RegexError::DanglingFragments { count: 2 };
        assert!(error.to_string().contains("2 fragments"));
    }

    #[test]
    fn parse_error_lists_expected_terminals() {
        let error = ParseError::UnexpectedToken {
            state: 4,
            found: "+".to_string(),
            expected: vec!["(".to_string(), "id".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "syntax error in state 4: expected one of [(, id]; found '+'"
        );
    }

    #[test]
    fn table_error_counts_conflicts() {
        let error = TableError::Conflicts {
            conflicts: vec!["Shift/Reduce conflict in state 7 on else".to_string()],
        };
        assert!(error.to_string().contains("1 conflict(s)"));
    }
}
