use crate::ast::Position;

/// Represents all errors that can occur during lexing or parsing.
///
/// The lexer never fails on its own: it hands out error tokens, and the parser
/// turns the first one it meets into [`ParseError::UnrecognizedToken`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The lexer could not classify a run of characters.
    #[error("Error on {position}: Unrecognized input '{token}'.")]
    UnrecognizedToken {
        /// The offending text.
        token:    String,
        /// Where it starts.
        position: Position,
    },
    /// Found a token that does not fit the construct being parsed.
    #[error("Error on {position}: Expected {expected}, found '{found}'.")]
    UnexpectedToken {
        /// Description of what the grammar required.
        expected: String,
        /// Lexeme of the token actually found.
        found:    String,
        /// Where the token starts.
        position: Position,
    },
    /// Reached the end of input while a construct was still open.
    #[error("Error on {position}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// Position just past the last character.
        position: Position,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error on {position}: Expected closing parenthesis ')' but found '{found}'.")]
    ExpectedClosingParen {
        /// Lexeme of the token found instead.
        found:    String,
        /// Where that token starts.
        position: Position,
    },
    /// An expression is nested deeper than the parser accepts.
    #[error("Error on {position}: Expression is nested too deeply.")]
    NestingTooDeep {
        /// Where the limit was crossed.
        position: Position,
    },
}
