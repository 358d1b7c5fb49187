/// Core evaluation logic and the runtime environment.
///
/// Contains the `Environment` holding variables, constants, formulas and
/// parameter ranges, and the recursive evaluation of expression trees.
pub mod core;

/// Builtin functions.
///
/// Declares the static builtin table shared by the lexer and the evaluator,
/// with the arity and the domain-checked implementation of every builtin.
pub mod builtin;

/// Statement execution.
///
/// Applies declarations and assignments to the environment, validating
/// parameter ranges on the way.
pub mod statement;

/// The sampling loop behind `draw`.
pub mod sampler;
