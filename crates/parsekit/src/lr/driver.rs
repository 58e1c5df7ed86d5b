//! Table-driven shift/reduce parsing engine.

use compact_str::CompactString;

use super::table::{Action, LalrTable};
use crate::error::ParseError;
use crate::grammar::Symbol;

/// A token produced by some lexical stage.
///
/// Only `kind` is consulted while parsing; it names a grammar terminal. The
/// lexeme rides along for the caller's diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: CompactString,
    pub text: CompactString,
}

impl Token {
    #[must_use]
    pub fn new(kind: impl Into<CompactString>, text: impl Into<CompactString>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
        }
    }
}

/// The shift/reduce driver for a built [`LalrTable`].
///
/// The engine keeps a stack of state indices, appends a virtual end-of-input
/// token of kind `$`, and loops over ACTION lookups until it accepts or
/// hits a syntax error. No recovery is attempted: the returned
/// [`ParseError`] carries the failing state, the offending token, and the
/// sorted set of terminals that would have been accepted.
#[derive(Debug, Clone, Copy)]
pub struct LalrParser<'a> {
    table: &'a LalrTable,
}

impl<'a> LalrParser<'a> {
    #[must_use]
    pub const fn new(table: &'a LalrTable) -> Self {
        Self { table }
    }

    /// Parse a token sequence to acceptance or the first syntax error.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedToken`] when no ACTION is defined for
    /// the current state and lookahead, and [`ParseError::MissingGoto`] when
    /// a reduce lands in a state with no GOTO for the reduced non-terminal.
    pub fn parse(&self, tokens: &[Token]) -> Result<(), ParseError> {
        let initial = self.table.initial_state();
        let mut stack: Vec<usize> = vec![initial];
        let mut position = 0;

        loop {
            let state = stack.last().map_or(initial, |&top| top);
            let lookahead = tokens
                .get(position)
                .map_or_else(Symbol::eof, |token| Symbol::terminal(token.kind.clone()));

            let Some(entry) = self.table.action(state, &lookahead) else {
                let found = tokens
                    .get(position)
                    .map_or_else(|| "$".to_string(), |token| token.kind.to_string());
                return Err(ParseError::UnexpectedToken {
                    state,
                    found,
                    expected: self.table.expected_terminals(state),
                });
            };

            match entry {
                Action::Shift(target) => {
                    stack.push(*target);
                    position += 1;
                }
                Action::Reduce(index) => {
                    let production = &self.table.productions()[*index];
                    let new_len = stack.len().saturating_sub(production.rhs.len());
                    stack.truncate(new_len);
                    let exposed = stack.last().map_or(initial, |&top| top);
                    match self.table.goto_state(exposed, &production.lhs) {
                        Some(target) => stack.push(target),
                        None => {
                            return Err(ParseError::MissingGoto {
                                state: exposed,
                                non_terminal: production.lhs.name().to_string(),
                            });
                        }
                    }
                }
                Action::Accept => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarBuilder;

    fn tokens(kinds: &[&str]) -> Vec<Token> {
        kinds.iter().map(|kind| Token::new(*kind, *kind)).collect()
    }

    fn list_table() -> LalrTable {
        let grammar = GrammarBuilder::new()
            .terminals([",", "id"])
            .non_terminal("L")
            .start_symbol("L")
            .production("L", ["L", ",", "id"])
            .production("L", ["id"])
            .build()
            .unwrap();
        LalrTable::build(&grammar).unwrap()
    }

    #[test]
    fn accepts_a_left_recursive_list() {
        let table = list_table();
        let parser = LalrParser::new(&table);
        assert!(parser.parse(&tokens(&["id"])).is_ok());
        assert!(parser.parse(&tokens(&["id", ",", "id", ",", "id"])).is_ok());
    }

    #[test]
    fn rejects_with_state_and_expected_set() {
        let table = list_table();
        let parser = LalrParser::new(&table);
        match parser.parse(&tokens(&["id", ",", ","])) {
            Err(ParseError::UnexpectedToken {
                found, expected, ..
            }) => {
                assert_eq!(found, ",");
                assert_eq!(expected, vec!["id".to_string()]);
            }
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_the_empty_input_when_the_grammar_demands_content() {
        let table = list_table();
        let parser = LalrParser::new(&table);
        match parser.parse(&[]) {
            Err(ParseError::UnexpectedToken { found, .. }) => assert_eq!(found, "$"),
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn lexeme_is_irrelevant_to_acceptance() {
        let table = list_table();
        let parser = LalrParser::new(&table);
        let input = [Token::new("id", "alpha"), Token::new(",", ","), Token::new("id", "β")];
        assert!(parser.parse(&input).is_ok());
    }
}
