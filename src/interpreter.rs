/// The evaluator module executes statements and computes expression values.
///
/// The evaluator walks expression trees against the environment, applies
/// declarations and assignments, and runs the sampling loop of `draw`.
///
/// # Responsibilities
/// - Evaluates expression trees, including named formulas and builtin calls.
/// - Validates and records parameter ranges.
/// - Reports runtime errors such as division by zero or math-domain faults.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a keyword, a builtin name, an identifier, a number, or a
/// punctuation mark. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with their source
///   position.
/// - Resolves keywords and builtin names case-insensitively.
/// - Turns invalid input into error tokens instead of failing.
pub mod lexer;
/// The parser module builds the abstract syntax tree from tokens.
///
/// The parser consumes the token stream with a single token of lookahead and
/// produces the list of statements of a program, or the first parse error.
pub mod parser;
/// Character-level access to the source text with line and column tracking.
pub mod source;

use crate::{
    ast::{Shape, Statement},
    error::{Error, SemanticError},
    interpreter::evaluator::{
        core::{Environment, ParamRange},
        sampler::sample,
    },
    render::{Curve, Renderer},
};

/// Executes statements against one environment and one renderer.
///
/// ## Usage
///
/// An `Interpreter` owns the state of a single run. Statements are executed in
/// order with [`Interpreter::execute`]; the first error ends the run.
///
/// ```
/// use curvelang::{interpreter::{Interpreter, parser::core::parse_program}, render::Recorder};
///
/// let statements = parse_program("param x [0, 2, 1]\ndraw x * 10").unwrap();
/// let mut interpreter = Interpreter::new(Recorder::new());
/// interpreter.execute(&statements).unwrap();
/// assert_eq!(interpreter.plots()[0].points, [(0.0, 0.0), (1.0, 10.0), (2.0, 20.0)]);
/// ```
pub struct Interpreter<R: Renderer> {
    environment: Environment,
    plots:       Vec<Curve>,
    renderer:    R,
}

impl<R: Renderer> Interpreter<R> {
    /// Creates an interpreter with a fresh environment.
    pub fn new(renderer: R) -> Self {
        Self { environment: Environment::new(),
               plots: Vec::new(),
               renderer }
    }

    /// Executes statements strictly in order.
    ///
    /// # Errors
    /// The first semantic, runtime or renderer error. Statements after it are
    /// not executed.
    pub fn execute(&mut self, statements: &[Statement]) -> Result<(), Error> {
        statements.iter().try_for_each(|statement| self.execute_statement(statement))
    }

    /// Executes a single statement.
    ///
    /// # Errors
    /// See [`Interpreter::execute`].
    pub fn execute_statement(&mut self, statement: &Statement) -> Result<(), Error> {
        match statement {
            Statement::ParamDecl { name,
                                   min,
                                   max,
                                   step,
                                   position, } => {
                self.environment
                    .declare_param(name, ParamRange::new(*min, *max, *step), *position)?;
            },
            Statement::Assign { name, expr, .. } => {
                self.environment.assign(name, expr)?;
            },
            Statement::ConstDecl { name, expr, .. } => {
                self.environment.declare_const(name, expr)?;
            },
            Statement::FormulaDecl { name, expr, .. } => self.environment.declare_formula(name, expr),
            Statement::Draw { shape,
                              color,
                              position, } => {
                if self.environment.params().next().is_none() {
                    return Err(SemanticError::NoParameter { position: *position }.into());
                }
                self.draw(shape, color.as_deref())?;
            },
            Statement::Show => self.renderer.show(&self.plots)?,
            Statement::Clear => {
                self.plots.clear();
                self.renderer.clear()?;
            },
        }
        Ok(())
    }

    /// Samples `shape` once per declared parameter and hands every curve to
    /// the renderer.
    fn draw(&mut self, shape: &Shape, color: Option<&str>) -> Result<(), Error> {
        let params: Vec<(String, ParamRange)> =
            self.environment.params().map(|(name, range)| (name.to_string(), range)).collect();

        for (name, range) in params {
            let points = sample(&mut self.environment, shape, &name, range);
            let curve = Curve::new(points, color.map(str::to_string));
            self.renderer.draw_curve(&curve)?;
            self.plots.push(curve);
        }
        Ok(())
    }

    /// The environment as left by the statements executed so far.
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Curves drawn since the last `clear`.
    pub fn plots(&self) -> &[Curve] {
        &self.plots
    }

    /// Ends the run and gives back the renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Ends the run and gives back the environment.
    pub fn into_environment(self) -> Environment {
        self.environment
    }
}
