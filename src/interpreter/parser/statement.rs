use std::iter::Peekable;

use crate::{
    ast::{Expr, Position, Shape, Statement},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{eat, expect, parse_identifier, parse_signed_literal, peek_kind, unexpected},
        },
    },
};

/// Parses a single statement, chosen by its leading token.
///
/// - `param` declares a swept parameter.
/// - An identifier starts an assignment.
/// - `let` declares a constant.
/// - `def`, or a builtin name used as a marker, declares a named formula.
/// - `draw`, `show` and `clear` are directives.
///
/// Any other leading token is consumed and ignored.
///
/// # Returns
/// - `Ok(Some(statement))` for a complete statement.
/// - `Ok(None)` when the leading token was skipped, or when an assignment or
///   declaration stopped matching its shape. Such attempts are dropped
///   silently; the tokens after the point of mismatch are parsed as the next
///   statement.
///
/// # Errors
/// A `ParseError` for malformed parameter declarations, malformed `draw`
/// statements, broken expressions, and lexer error tokens.
pub fn parse_statement<I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = Token>
{
    let Some(token) = tokens.peek() else {
        return Ok(None);
    };
    let position = token.position;

    match token.kind {
        TokenKind::Param => parse_param(tokens, position).map(Some),
        TokenKind::Identifier => parse_assignment(tokens, position),
        TokenKind::Let => parse_const_declaration(tokens, position),
        TokenKind::Def | TokenKind::Function => parse_formula_declaration(tokens, position),
        TokenKind::Draw => parse_draw(tokens, position).map(Some),
        TokenKind::Show => {
            tokens.next();
            Ok(Some(Statement::Show))
        },
        TokenKind::Clear => {
            tokens.next();
            Ok(Some(Statement::Clear))
        },
        TokenKind::Error => Err(unexpected(token, "a statement")),
        TokenKind::Eof => Ok(None),
        _ => {
            tokens.next();
            Ok(None)
        },
    }
}

/// Parses a parameter declaration in either of its two spellings:
///
/// ```text
/// param <name> from <min> to <max> step <step>
/// param <name> [ <min>, <max>, <step> ]
/// ```
///
/// Each bound is a numeric literal with an optional leading `-`.
fn parse_param<I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Statement>
    where I: Iterator<Item = Token>
{
    tokens.next();
    let (name, _) = parse_identifier(tokens, "a parameter name")?;

    let (min, max, step) = if eat(tokens, TokenKind::LBracket).is_some() {
        let min = parse_signed_literal(tokens, "the start of the range")?;
        expect(tokens, TokenKind::Comma, "','")?;
        let max = parse_signed_literal(tokens, "the end of the range")?;
        expect(tokens, TokenKind::Comma, "','")?;
        let step = parse_signed_literal(tokens, "the step of the range")?;
        expect(tokens, TokenKind::RBracket, "']'")?;
        (min, max, step)
    } else {
        expect(tokens, TokenKind::From, "'from' or '['")?;
        let min = parse_signed_literal(tokens, "the start of the range")?;
        expect(tokens, TokenKind::To, "'to'")?;
        let max = parse_signed_literal(tokens, "the end of the range")?;
        expect(tokens, TokenKind::Step, "'step'")?;
        let step = parse_signed_literal(tokens, "the step of the range")?;
        (min, max, step)
    };

    Ok(Statement::ParamDecl { name,
                              min,
                              max,
                              step,
                              position })
}

/// Parses `<name> = <expression>`.
///
/// Without the `=` only the name is consumed and no statement results.
fn parse_assignment<I>(tokens: &mut Peekable<I>,
                       position: Position)
                       -> ParseResult<Option<Statement>>
    where I: Iterator<Item = Token>
{
    let Some(Token { lexeme: name, .. }) = tokens.next() else {
        return Ok(None);
    };
    if eat(tokens, TokenKind::Assign).is_none() {
        return Ok(None);
    }
    let expr = parse_expression(tokens)?;
    Ok(Some(Statement::Assign { name, expr, position }))
}

/// Parses `let <name> = <expression>`.
fn parse_const_declaration<I>(tokens: &mut Peekable<I>,
                              position: Position)
                              -> ParseResult<Option<Statement>>
    where I: Iterator<Item = Token>
{
    tokens.next();
    Ok(parse_named_expression(tokens)?.map(|(name, expr)| Statement::ConstDecl { name,
                                                                                 expr,
                                                                                 position }))
}

/// Parses `def <name> = <expression>` or `<builtin> <name> = <expression>`.
///
/// The leading marker is discarded; only the identifier after it names the
/// formula.
fn parse_formula_declaration<I>(tokens: &mut Peekable<I>,
                                position: Position)
                                -> ParseResult<Option<Statement>>
    where I: Iterator<Item = Token>
{
    tokens.next();
    Ok(parse_named_expression(tokens)?.map(|(name, expr)| Statement::FormulaDecl { name,
                                                                                   expr,
                                                                                   position }))
}

/// Parses the `<name> = <expression>` tail shared by declarations.
///
/// Returns `Ok(None)`, consuming as little as possible, when the name or the
/// `=` is missing.
fn parse_named_expression<I>(tokens: &mut Peekable<I>) -> ParseResult<Option<(String, Expr)>>
    where I: Iterator<Item = Token>
{
    let Some(Token { lexeme: name, .. }) = eat(tokens, TokenKind::Identifier) else {
        return Ok(None);
    };
    if eat(tokens, TokenKind::Assign).is_none() {
        return Ok(None);
    }
    let expr = parse_expression(tokens)?;
    Ok(Some((name, expr)))
}

/// Parses `draw <expr> [, <expr>] [with color <name>]`.
///
/// A comma after the first expression is the only thing that makes the curve
/// parametric.
fn parse_draw<I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Statement>
    where I: Iterator<Item = Token>
{
    tokens.next();
    let first = parse_expression(tokens)?;

    let shape = if eat(tokens, TokenKind::Comma).is_some() {
        let second = parse_expression(tokens)?;
        Shape::Parametric { x: first,
                            y: second }
    } else {
        Shape::Function(first)
    };

    let color = if peek_kind(tokens) == Some(TokenKind::With) {
        tokens.next();
        expect(tokens, TokenKind::Color, "'color' after 'with'")?;
        let (name, _) = parse_identifier(tokens, "a color name")?;
        Some(name)
    } else {
        None
    };

    Ok(Statement::Draw { shape,
                         color,
                         position })
}
