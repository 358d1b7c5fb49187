use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{core::ParseResult, unary::parse_unary, utils::check_height},
    },
};

/// Parses the equality level.
///
/// No operator is bound here yet; the level only reserves a place in the
/// precedence hierarchy for comparisons. In particular `=` is never consumed.
///
/// The rule is: `equality := additive`
pub fn parse_equality<I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = Token>
{
    parse_additive(tokens, depth)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = Token>
{
    parse_left_associative(tokens,
                           depth,
                           &[BinaryOperator::Add, BinaryOperator::Sub],
                           parse_multiplicative)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators: `*` and `/`.
///
/// The rule is: `multiplicative := power (("*" | "/") power)*`
pub fn parse_multiplicative<I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = Token>
{
    parse_left_associative(tokens,
                           depth,
                           &[BinaryOperator::Mul, BinaryOperator::Div],
                           parse_power)
}

/// Parses exponentiation expressions.
///
/// Unlike the usual mathematical convention, `**` is left-associative here:
/// `a ** b ** c` parses as `(a ** b) ** c`.
///
/// The rule is: `power := unary ("**" unary)*`
pub fn parse_power<I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = Token>
{
    parse_left_associative(tokens, depth, &[BinaryOperator::Pow], parse_unary)
}

/// Folds `operand (op operand)*` into a left-leaning tree for the given
/// operators.
///
/// Every fold adds a level to the tree, so the height is checked per operator.
fn parse_left_associative<I>(tokens: &mut Peekable<I>,
                             depth: usize,
                             operators: &[BinaryOperator],
                             parse_operand: fn(&mut Peekable<I>, usize) -> ParseResult<Expr>)
                             -> ParseResult<Expr>
    where I: Iterator<Item = Token>
{
    let mut left = parse_operand(tokens, depth)?;
    let mut height = left.height();
    while let Some(token) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token.kind)
          && operators.contains(&op)
    {
        let position = token.position;
        tokens.next();
        let right = parse_operand(tokens, depth)?;
        height = height.max(right.height()) + 1;
        check_height(height, position)?;
        left = Expr::binary(op, left, right, position);
    }
    Ok(left)
}

/// Maps a token kind to its corresponding binary operator.
///
/// # Example
/// ```
/// use curvelang::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(TokenKind::Power), Some(BinaryOperator::Pow));
/// assert_eq!(token_to_binary_operator(TokenKind::Assign), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Power => Some(BinaryOperator::Pow),
        _ => None,
    }
}
