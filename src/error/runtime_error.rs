use crate::ast::Position;

/// A numeric failure inside a builtin function or the power operator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    /// The argument lies outside the domain of the function.
    #[error("math domain error in {function}({argument})")]
    Domain {
        /// Function or operator that rejected the argument.
        function: &'static str,
        /// The rejected argument.
        argument: f64,
    },
    /// A finite argument produced a result too large to represent.
    #[error("math range error in {function}({argument})")]
    Range {
        /// Function or operator that overflowed.
        function: &'static str,
        /// The argument that overflowed.
        argument: f64,
    },
}

/// Represents all errors that can occur while evaluating an expression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    /// Referenced a name that is neither a formula, a variable nor a constant.
    #[error("Error on {position}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The unbound name.
        name:     String,
        /// Where it is referenced.
        position: Position,
    },
    /// Called a function that is not a builtin.
    #[error("Error on {position}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The called name.
        name:     String,
        /// Where the call appears.
        position: Position,
    },
    /// A builtin received a number of arguments it does not accept.
    #[error("Error on {position}: Function '{name}' expects {expected} argument(s), found {found}.")]
    ArgumentCount {
        /// The called builtin.
        name:     String,
        /// Accepted argument count, such as `1` or `at least 2`.
        expected: String,
        /// Number of arguments supplied.
        found:    usize,
        /// Where the call appears.
        position: Position,
    },
    /// The right operand of `/` evaluated to exactly zero.
    #[error("Error on {position}: Division by zero.")]
    DivisionByZero {
        /// Position of the `/` operator.
        position: Position,
    },
    /// A builtin or the power operator rejected its input.
    #[error("Error on {position}: {source}.")]
    Math {
        /// The underlying numeric failure.
        #[source]
        source:   MathError,
        /// Where the failing call or operator appears.
        position: Position,
    },
    /// Formula references were followed deeper than evaluation allows.
    #[error("Error on {position}: Formula '{name}' is nested too deeply.")]
    NestingTooDeep {
        /// The formula that would have been entered.
        name:     String,
        /// Where it is referenced.
        position: Position,
    },
    /// A formula referenced itself, directly or through other formulas.
    #[error("Error on {position}: Formula '{name}' refers to itself.")]
    RecursiveFormula {
        /// The formula that was re-entered.
        name:     String,
        /// Where the re-entering reference appears.
        position: Position,
    },
}

impl RuntimeError {
    /// Attaches a source position to a math failure.
    #[must_use]
    pub const fn math(source: MathError, position: Position) -> Self {
        Self::Math { source, position }
    }
}
