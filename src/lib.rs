//! # curvelang
//!
//! curvelang is an interpreter for a small language that describes
//! mathematical curves. A program declares swept parameters, constants and
//! named formulas, then draws scalar or parametric curves by sampling them.
//! The sampled point sequences are handed to a [`render::Renderer`].

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums that represent a
/// program as a tree. The tree is built by the parser, never mutated
/// afterwards, and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source positions to the nodes that can fail.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during parsing, statement
/// execution, or expression evaluation. Every message starts with the line and
/// column the failure refers to.
///
/// # Responsibilities
/// - Defines one error enum per phase.
/// - Wraps them, together with renderer failures, in a single top-level
///   `Error`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together the character source, lexing, parsing and
/// evaluation, and exposes the `Interpreter` that executes a parsed program
/// against a renderer.
pub mod interpreter;
/// The renderer contract and the renderers shipped with the crate.
pub mod render;
/// General utilities for numeric comparison and conversion.
pub mod util;

pub use crate::{
    error::Error,
    interpreter::{
        Interpreter,
        evaluator::{core::Environment, sampler::SAMPLE_LIMIT},
        lexer::tokenize,
        parser::core::parse_program,
    },
};
use crate::render::Renderer;

/// Parses and executes a whole program.
///
/// The program is parsed completely before the first statement runs, so a
/// parse error means nothing was executed. Every call starts from a fresh
/// environment, which is returned once all statements have run.
///
/// # Errors
/// Returns the parse error, or the first error raised while executing.
///
/// # Examples
/// ```
/// use curvelang::{render::Recorder, run};
///
/// let mut recorder = Recorder::new();
/// let env = run("param x from -2 to 2 step 1\ndraw x ** 2", &mut recorder).unwrap();
/// assert_eq!(env.variables["x"], 2.0);
/// assert_eq!(recorder.curves()[0].points,
///            [(-2.0, 4.0), (-1.0, 1.0), (0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
///
/// // `y` is not defined.
/// assert!(run("x = y + 1", &mut recorder).is_err());
/// ```
pub fn run<R: Renderer>(source: &str, renderer: R) -> Result<Environment, Error> {
    let statements = parse_program(source)?;
    let mut interpreter = Interpreter::new(renderer);
    interpreter.execute(&statements)?;
    Ok(interpreter.into_environment())
}
