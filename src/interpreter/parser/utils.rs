use std::iter::Peekable;

use crate::{
    ast::Position,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{MAX_HEIGHT, ParseResult},
    },
};

/// Builds the error for a token that does not fit the grammar.
///
/// End of input and lexer error tokens get their dedicated variants, so an
/// unrecognized character is always reported as such.
pub(in crate::interpreter::parser) fn unexpected(token: &Token, expected: &str) -> ParseError {
    match token.kind {
        TokenKind::Eof => ParseError::UnexpectedEndOfInput { position: token.position },
        TokenKind::Error => ParseError::UnrecognizedToken { token:    token.lexeme.clone(),
                                                            position: token.position, },
        _ => ParseError::UnexpectedToken { expected: expected.to_string(),
                                           found:    token.lexeme.clone(),
                                           position: token.position, },
    }
}

/// Rejects a node that would make the tree higher than [`MAX_HEIGHT`].
pub(in crate::interpreter::parser) fn check_height(height: usize,
                                                   position: Position)
                                                   -> ParseResult<()> {
    if height > MAX_HEIGHT {
        return Err(ParseError::NestingTooDeep { position });
    }
    Ok(())
}

/// Kind of the next token, if any.
pub(in crate::interpreter::parser) fn peek_kind<I>(tokens: &mut Peekable<I>) -> Option<TokenKind>
    where I: Iterator<Item = Token>
{
    tokens.peek().map(|t| t.kind)
}

/// Consumes the next token if it has the given kind.
pub(in crate::interpreter::parser) fn eat<I>(tokens: &mut Peekable<I>,
                                             kind: TokenKind)
                                             -> Option<Token>
    where I: Iterator<Item = Token>
{
    tokens.next_if(|t| t.is(kind))
}

/// Consumes a token that must be present and of the given kind.
///
/// The `Eof` token is never consumed, so the program loop always sees it.
///
/// # Errors
/// Returns a `ParseError` describing `expected` if the next token differs.
pub(in crate::interpreter::parser) fn expect<I>(tokens: &mut Peekable<I>,
                                                kind: TokenKind,
                                                expected: &str)
                                                -> ParseResult<Token>
    where I: Iterator<Item = Token>
{
    if let Some(token) = tokens.next_if(|t| t.is(kind) && kind != TokenKind::Eof) {
        return Ok(token);
    }
    match tokens.peek() {
        Some(token) => Err(unexpected(token, expected)),
        None => Err(ParseError::UnexpectedEndOfInput { position: Position::default() }),
    }
}

/// Parses a plain identifier and returns its name and position.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier<I>(tokens: &mut Peekable<I>,
                                                          expected: &str)
                                                          -> ParseResult<(String, Position)>
    where I: Iterator<Item = Token>
{
    let token = expect(tokens, TokenKind::Identifier, expected)?;
    Ok((token.lexeme, token.position))
}

/// Parses a numeric literal with an optional leading `-`.
///
/// Parameter ranges accept only this form; general expressions are not
/// allowed there.
///
/// # Errors
/// Returns a `ParseError` if no number follows.
pub(in crate::interpreter::parser) fn parse_signed_literal<I>(tokens: &mut Peekable<I>,
                                                              expected: &str)
                                                              -> ParseResult<f64>
    where I: Iterator<Item = Token>
{
    let negative = eat(tokens, TokenKind::Minus).is_some();
    let token = expect(tokens, TokenKind::Number, expected)?;
    let value = token.value.unwrap_or_default();
    Ok(if negative { -value } else { value })
}
