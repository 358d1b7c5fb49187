use std::collections::HashMap;

use crate::{
    ast::{BinaryOperator, Expr, Position},
    error::RuntimeError,
    interpreter::evaluator::builtin::{Builtin, power},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Deepest expression level, counted through formula references, at which a
/// further formula may still be entered.
pub const MAX_EVAL_DEPTH: usize = 512;

/// The inclusive range a swept parameter runs through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// First sampled value.
    pub start: f64,
    /// Last value that may be sampled.
    pub end:   f64,
    /// Distance between two consecutive samples.
    pub step:  f64,
}

impl ParamRange {
    #[must_use]
    pub const fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Tests whether `t` has not yet passed the end of the range in the
    /// direction of the step.
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        (self.step > 0.0 && t <= self.end) || (self.step < 0.0 && t >= self.end)
    }
}

/// Stores the state of one interpretation run.
///
/// ## Usage
///
/// An `Environment` is created once per run and mutated in program order by
/// the statements. Expressions are evaluated against it with
/// [`Environment::eval`].
#[derive(Debug, Clone)]
pub struct Environment {
    /// Values set by assignments, parameter declarations and the sampling
    /// loop.
    pub variables: HashMap<String, f64>,
    /// Values set by `let`, seeded with `pi` and `e`.
    pub constants: HashMap<String, f64>,
    /// Unevaluated formula bodies, keyed by formula name.
    pub formulas:  HashMap<String, Expr>,
    params:        Vec<(String, ParamRange)>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding only the predefined constants.
    #[must_use]
    pub fn new() -> Self {
        let constants = HashMap::from([("pi".to_string(), std::f64::consts::PI),
                                       ("e".to_string(), std::f64::consts::E)]);
        Self { variables: HashMap::new(),
               constants,
               formulas: HashMap::new(),
               params: Vec::new() }
    }

    /// Records the range of a swept parameter and seeds its variable with the
    /// start of the range.
    ///
    /// Redeclaring a parameter replaces its range but keeps its place in the
    /// declaration order.
    pub fn set_param(&mut self, name: &str, range: ParamRange) {
        if let Some(slot) = self.params.iter_mut().find(|(n, _)| n == name) {
            slot.1 = range;
        } else {
            self.params.push((name.to_string(), range));
        }
        self.variables.insert(name.to_string(), range.start);
    }

    /// Every declared parameter range, in declaration order.
    pub fn params(&self) -> impl Iterator<Item = (&str, ParamRange)> {
        self.params.iter().map(|(name, range)| (name.as_str(), *range))
    }

    /// The range of the named parameter, if it was declared.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<ParamRange> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, range)| *range)
    }

    /// Looks a name up in the merged variable and constant view.
    ///
    /// A constant hides a variable of the same name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<f64> {
        self.constants.get(name).or_else(|| self.variables.get(name)).copied()
    }

    /// Evaluates an expression against the current state.
    ///
    /// Named formulas are re-evaluated at every reference, so a formula that
    /// reads a swept parameter follows its current value.
    ///
    /// # Errors
    /// - `UnknownVariable` for a name that is neither a formula, a variable nor
    ///   a constant.
    /// - `RecursiveFormula` when a formula is referenced while it is already
    ///   being evaluated.
    /// - `NestingTooDeep` when formula references lead past
    ///   [`MAX_EVAL_DEPTH`].
    /// - `DivisionByZero` when the right side of `/` is exactly zero.
    /// - `UnknownFunction`, `ArgumentCount` and `Math` from calls and `**`.
    pub fn eval(&self, expr: &Expr) -> EvalResult<f64> {
        let mut active = Vec::new();
        self.eval_guarded(expr, 0, &mut active)
    }

    fn eval_guarded<'env>(&'env self,
                          expr: &Expr,
                          depth: usize,
                          active: &mut Vec<&'env str>)
                          -> EvalResult<f64> {
        match expr {
            Expr::Constant { value } => Ok(*value),
            Expr::Variable { name, position } => {
                self.eval_variable(name, *position, depth, active)
            },
            Expr::Binary { op,
                           left,
                           right,
                           position, } => {
                let left = self.eval_guarded(left, depth + 1, active)?;
                let right = self.eval_guarded(right, depth + 1, active)?;
                Self::eval_binary(*op, left, right, *position)
            },
            Expr::Negate { expr } => Ok(-self.eval_guarded(expr, depth + 1, active)?),
            Expr::Call { name,
                         argument,
                         position, } => {
                let builtin = Builtin::from_name(name).ok_or_else(|| {
                                  RuntimeError::UnknownFunction { name:     name.clone(),
                                                                  position: *position, }
                              })?;
                let argument = self.eval_guarded(argument, depth + 1, active)?;
                builtin.call(&[argument], *position)
            },
        }
    }

    fn eval_variable<'env>(&'env self,
                           name: &str,
                           position: Position,
                           depth: usize,
                           active: &mut Vec<&'env str>)
                           -> EvalResult<f64> {
        if let Some((formula, body)) = self.formulas.get_key_value(name) {
            if active.contains(&formula.as_str()) {
                return Err(RuntimeError::RecursiveFormula { name: formula.clone(),
                                                            position });
            }
            if depth > MAX_EVAL_DEPTH {
                return Err(RuntimeError::NestingTooDeep { name: formula.clone(),
                                                          position });
            }
            active.push(formula);
            let result = self.eval_guarded(body, depth + 1, active);
            active.pop();
            return result;
        }

        self.lookup(name)
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           position })
    }

    /// Applies a binary operator to two evaluated operands.
    ///
    /// # Errors
    /// - `DivisionByZero` if `op` is `/` and `right` is exactly zero.
    /// - `Math` if `op` is `**` and the power is undefined over the reals or
    ///   overflows.
    pub fn eval_binary(op: BinaryOperator,
                       left: f64,
                       right: f64,
                       position: Position)
                       -> EvalResult<f64> {
        match op {
            BinaryOperator::Add => Ok(left + right),
            BinaryOperator::Sub => Ok(left - right),
            BinaryOperator::Mul => Ok(left * right),
            BinaryOperator::Div => {
                if right == 0.0 {
                    return Err(RuntimeError::DivisionByZero { position });
                }
                Ok(left / right)
            },
            BinaryOperator::Pow => power(left, right).map_err(|e| RuntimeError::math(e, position)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::Statement,
        error::MathError,
        interpreter::{
            lexer::Tokenizer,
            parser::core::{parse_expression, parse_program},
        },
        util::num::is_close,
    };

    fn expr(text: &str) -> Expr {
        parse_expression(&mut Tokenizer::new(text).peekable()).unwrap()
    }

    fn eval(env: &Environment, text: &str) -> EvalResult<f64> {
        env.eval(&expr(text))
    }

    #[test]
    fn arithmetic_and_precedence() {
        let env = Environment::new();
        assert_eq!(eval(&env, "1 + 2 * 3").unwrap(), 7.0);
        assert_eq!(eval(&env, "(1 + 2) * 3").unwrap(), 9.0);
        assert_eq!(eval(&env, "10 - 4 - 3").unwrap(), 3.0);
        assert_eq!(eval(&env, "--2").unwrap(), 2.0);
        assert_eq!(eval(&env, "-2 ** 2").unwrap(), 4.0);
    }

    #[test]
    fn power_is_left_associative() {
        let env = Environment::new();
        assert_eq!(eval(&env, "2 ** 3 ** 2").unwrap(), 64.0);
    }

    #[test]
    fn predefined_constants() {
        let env = Environment::new();
        assert!(is_close(eval(&env, "pi").unwrap(), std::f64::consts::PI, 1e-15, 0.0));
        assert!(is_close(eval(&env, "E").unwrap(), std::f64::consts::E, 1e-15, 0.0));
    }

    #[test]
    fn constants_hide_variables() {
        let mut env = Environment::new();
        env.variables.insert("pi".to_string(), 3.0);
        assert_eq!(env.lookup("pi"), Some(std::f64::consts::PI));
    }

    #[test]
    fn division_by_exact_zero() {
        let env = Environment::new();
        assert!(matches!(eval(&env, "1 / (2 - 2)"),
                         Err(RuntimeError::DivisionByZero { position }) if position == Position::new(1, 3)));
        assert_eq!(eval(&env, "0 / 4").unwrap(), 0.0);
    }

    #[test]
    fn unbound_name() {
        let env = Environment::new();
        assert!(matches!(eval(&env, "x + 1"),
                         Err(RuntimeError::UnknownVariable { name, .. }) if name == "x"));
    }

    #[test]
    fn formulas_track_current_variables() {
        let mut env = Environment::new();
        env.formulas.insert("f".to_string(), expr("x + 1"));
        env.variables.insert("x".to_string(), 1.0);
        assert_eq!(eval(&env, "f").unwrap(), 2.0);
        env.variables.insert("x".to_string(), 5.0);
        assert_eq!(eval(&env, "f * 2").unwrap(), 12.0);
    }

    #[test]
    fn formulas_shadow_variables() {
        let mut env = Environment::new();
        env.variables.insert("f".to_string(), 100.0);
        env.formulas.insert("f".to_string(), expr("1"));
        assert_eq!(eval(&env, "f").unwrap(), 1.0);
    }

    #[test]
    fn recursive_formulas_are_detected() {
        let mut env = Environment::new();
        env.formulas.insert("f".to_string(), expr("g + 1"));
        env.formulas.insert("g".to_string(), expr("f * 2"));
        assert!(matches!(eval(&env, "f"), Err(RuntimeError::RecursiveFormula { .. })));
        env.formulas.insert("h".to_string(), expr("h"));
        assert!(matches!(eval(&env, "h"),
                         Err(RuntimeError::RecursiveFormula { name, .. }) if name == "h"));
    }

    #[test]
    fn formula_used_twice_is_not_recursion() {
        let mut env = Environment::new();
        env.formulas.insert("f".to_string(), expr("2"));
        env.formulas.insert("g".to_string(), expr("f * f"));
        assert_eq!(eval(&env, "g + f").unwrap(), 6.0);
    }

    fn formula_chain(env: &mut Environment, length: usize) {
        env.formulas.insert("f0".to_string(), expr("x"));
        for i in 1..length {
            env.formulas.insert(format!("f{i}"), expr(&format!("f{} + 1", i - 1)));
        }
    }

    #[test]
    fn long_formula_chains_are_cut_off() {
        let mut env = Environment::new();
        env.variables.insert("x".to_string(), 0.5);
        formula_chain(&mut env, 200);
        assert_eq!(eval(&env, "f199").unwrap(), 199.5);

        formula_chain(&mut env, 1000);
        assert!(matches!(eval(&env, "f999"),
                         Err(RuntimeError::NestingTooDeep { name, .. }) if name == "f742"));
    }

    #[test]
    fn builtin_calls() {
        let env = Environment::new();
        assert!(is_close(eval(&env, "sin(pi / 2)").unwrap(), 1.0, 1e-12, 0.0));
        assert!(matches!(eval(&env, "sqrt(-1)"),
                         Err(RuntimeError::Math { source: MathError::Domain { .. }, .. })));
        assert!(matches!(eval(&env, "max(3)"), Err(RuntimeError::ArgumentCount { .. })));
    }

    #[test]
    fn calling_a_non_builtin() {
        let env = Environment::new();
        assert!(matches!(eval(&env, "foo(1)"),
                         Err(RuntimeError::UnknownFunction { name, .. }) if name == "foo"));
    }

    #[test]
    fn negative_base_with_fractional_exponent() {
        let env = Environment::new();
        assert!(matches!(eval(&env, "(-8) ** 0.5"), Err(RuntimeError::Math { .. })));
    }

    #[test]
    fn params_keep_declaration_order() {
        let mut env = Environment::new();
        env.set_param("t", ParamRange::new(0.0, 1.0, 0.5));
        env.set_param("s", ParamRange::new(-1.0, 1.0, 1.0));
        env.set_param("t", ParamRange::new(2.0, 3.0, 0.5));
        let names: Vec<_> = env.params().map(|(name, _)| name).collect();
        assert_eq!(names, ["t", "s"]);
        assert_eq!(env.param("t"), Some(ParamRange::new(2.0, 3.0, 0.5)));
        assert_eq!(env.variables["t"], 2.0);
    }

    #[test]
    fn parsed_statements_evaluate() {
        let statements = parse_program("y = 2 ** 10").unwrap();
        let Statement::Assign { expr, .. } = &statements[0] else {
            panic!("expected an assignment");
        };
        assert_eq!(Environment::new().eval(expr).unwrap(), 1024.0);
    }
}
