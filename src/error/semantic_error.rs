use crate::ast::Position;

/// Errors raised while executing a statement whose meaning is invalid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SemanticError {
    /// A range bound is not a finite number.
    #[error("Error on {position}: Range of parameter '{name}' must be numeric.")]
    NonNumericRange {
        /// The parameter being declared.
        name:     String,
        /// Position of the declaration.
        position: Position,
    },
    /// The step of a parameter range is zero or negative.
    #[error("Error on {position}: Step of parameter '{name}' must be greater than 0, found {step}.")]
    NonPositiveStep {
        /// The parameter being declared.
        name:     String,
        /// The rejected step.
        step:     f64,
        /// Position of the declaration.
        position: Position,
    },
    /// The start and end of a range disagree with the sign of the step.
    #[error("Error on {position}: Invalid range for parameter '{name}': {start} to {end} with step {step}.")]
    InvalidRange {
        /// The parameter being declared.
        name:     String,
        /// Declared start.
        start:    f64,
        /// Declared end.
        end:      f64,
        /// Declared step.
        step:     f64,
        /// Position of the declaration.
        position: Position,
    },
    /// A `draw` statement ran before any parameter was declared.
    #[error("Error on {position}: Nothing to sweep; declare a parameter with 'param' before 'draw'.")]
    NoParameter {
        /// Position of the `draw` statement.
        position: Position,
    },
}
