/// Parsing errors.
///
/// Defines every failure detected before execution starts: unrecognized
/// characters reported by the lexer, unexpected tokens, and input that ends in
/// the middle of a construct. Any of them abandons the whole parse.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the errors raised while evaluating an expression, such as unbound
/// names, division by zero, or math-domain violations inside a builtin.
pub mod runtime_error;
/// Semantic errors.
///
/// Raised while executing statements whose shape was valid but whose meaning is
/// not, such as a parameter range with a non-positive step.
pub mod semantic_error;

pub use parse_error::ParseError;
pub use runtime_error::{MathError, RuntimeError};
pub use semantic_error::SemanticError;

/// Any failure that ends an interpretation run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The program could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A statement was rejected during execution.
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    /// An expression failed to evaluate outside of a draw sample.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// The renderer could not complete a request.
    #[error("Renderer failed: {0}")]
    Render(#[from] std::io::Error),
}
