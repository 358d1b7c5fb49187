use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{MAX_NESTING, ParseResult, parse_nested},
            utils::{check_height, eat, unexpected},
        },
    },
};

/// Parses prefix minus.
///
/// The operand is parsed by this same function, so `--x` is a double
/// negation.
///
/// The rule is: `unary := "-" unary | primary`
///
/// # Errors
/// `NestingTooDeep` once `depth` passes [`MAX_NESTING`].
pub fn parse_unary<I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = Token>
{
    if depth > MAX_NESTING {
        let position = tokens.peek().map(|t| t.position).unwrap_or_default();
        return Err(ParseError::NestingTooDeep { position });
    }
    if let Some(minus) = eat(tokens, TokenKind::Minus) {
        let expr = parse_unary(tokens, depth + 1)?;
        check_height(expr.height() + 1, minus.position)?;
        return Ok(Expr::Negate { expr: Box::new(expr) });
    }
    parse_primary(tokens, depth)
}

/// Parses a primary expression.
///
/// - A numeric literal becomes a constant.
/// - An identifier or builtin name directly followed by `(` becomes a call
///   with exactly one argument.
/// - Any other identifier or builtin name becomes a variable reference.
/// - A parenthesized expression is returned as is.
///
/// # Errors
/// - `UnexpectedEndOfInput` if the input ends where an expression is needed.
/// - `ExpectedClosingParen` if a call or group is not closed.
/// - `NestingTooDeep` if a call makes the tree too high.
/// - `UnrecognizedToken`/`UnexpectedToken` for anything else.
pub fn parse_primary<I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = Token>
{
    let Some(token) = tokens.peek() else {
        return Err(ParseError::UnexpectedEndOfInput { position: Default::default() });
    };

    match token.kind {
        TokenKind::Number => {
            let value = token.value.unwrap_or_default();
            tokens.next();
            Ok(Expr::constant(value))
        },
        TokenKind::Identifier | TokenKind::Function => {
            let name = token.lexeme.clone();
            let position = token.position;
            tokens.next();
            if eat(tokens, TokenKind::LParen).is_some() {
                let argument = parse_nested(tokens, depth + 1)?;
                expect_closing_paren(tokens)?;
                check_height(argument.height() + 1, position)?;
                return Ok(Expr::Call { name,
                                       argument: Box::new(argument),
                                       position });
            }
            Ok(Expr::Variable { name, position })
        },
        TokenKind::LParen => {
            tokens.next();
            let expr = parse_nested(tokens, depth + 1)?;
            expect_closing_paren(tokens)?;
            Ok(expr)
        },
        _ => Err(unexpected(token, "an expression")),
    }
}

fn expect_closing_paren<I>(tokens: &mut Peekable<I>) -> ParseResult<()>
    where I: Iterator<Item = Token>
{
    match tokens.peek() {
        Some(token) if token.is(TokenKind::RParen) => {
            tokens.next();
            Ok(())
        },
        Some(token) if token.is(TokenKind::Error) => Err(unexpected(token, "')'")),
        Some(token) => Err(ParseError::ExpectedClosingParen { found:    token.to_string(),
                                                              position: token.position, }),
        None => Err(ParseError::UnexpectedEndOfInput { position: Default::default() }),
    }
}
