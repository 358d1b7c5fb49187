use std::iter::Peekable;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind, Tokenizer},
        parser::{binary::parse_equality, statement::parse_statement},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// How many parentheses, calls and prefix minus signs may enclose each other
/// inside one expression.
pub const MAX_NESTING: usize = 64;

/// Largest [`Expr::height`] of a parsed expression.
///
/// Long operator chains build deep trees without nesting, so the tree height
/// is bounded on its own.
pub const MAX_HEIGHT: usize = 256;

/// Parses a complete program.
///
/// Tokens are pulled from the tokenizer one at a time; nothing is re-read.
/// The first structural failure abandons the whole parse, so either every
/// statement is returned or none is.
///
/// # Errors
/// Returns the first [`ParseError`] met, including unrecognized characters.
///
/// # Example
/// ```
/// use curvelang::interpreter::parser::core::parse_program;
///
/// let statements = parse_program("param x from 0 to 1 step 0.5\ndraw x ** 2").unwrap();
/// assert_eq!(statements.len(), 2);
///
/// assert!(parse_program("draw (x + 1").is_err());
/// ```
pub fn parse_program(source: &str) -> ParseResult<Vec<Statement>> {
    let mut tokens = Tokenizer::new(source).peekable();
    parse_statements(&mut tokens)
}

/// Parses statements until the `Eof` token.
///
/// Statement attempts that do not complete their expected shape produce no
/// statement and are dropped without an error.
pub fn parse_statements<I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = Token>
{
    let mut statements = Vec::new();
    while let Some(token) = tokens.peek()
          && !token.is(TokenKind::Eof)
    {
        if let Some(statement) = parse_statement(tokens)? {
            statements.push(statement);
        }
    }
    Ok(statements)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the lowest
/// precedence level and recursively descends through the hierarchy:
///
/// ```text
/// expression     := equality
/// equality       := additive
/// additive       := multiplicative (("+" | "-") multiplicative)*
/// multiplicative := power (("*" | "/") power)*
/// power          := unary ("**" unary)*
/// unary          := "-" unary | primary
/// primary        := number | name "(" expression ")" | name | "(" expression ")"
/// ```
///
/// # Errors
/// Besides the grammar errors, `NestingTooDeep` once the expression passes
/// [`MAX_NESTING`] or [`MAX_HEIGHT`].
pub fn parse_expression<I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = Token>
{
    parse_nested(tokens, 0)
}

/// Parses an expression enclosed by `depth` parentheses, calls or minus
/// signs.
pub fn parse_nested<I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = Token>
{
    parse_equality(tokens, depth)
}
