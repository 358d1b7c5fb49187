use crate::{
    ast::{Expr, Position},
    error::{Error, SemanticError},
    interpreter::evaluator::core::{Environment, ParamRange},
};

impl Environment {
    /// Executes a parameter declaration.
    ///
    /// The range is validated, recorded, and the variable of the same name is
    /// set to the start of the range.
    ///
    /// # Errors
    /// - `NonNumericRange` if a bound or the step is not finite.
    /// - `NonPositiveStep` if the step is zero or negative.
    /// - `InvalidRange` if the start lies beyond the end in the direction of
    ///   the step.
    pub fn declare_param(&mut self,
                         name: &str,
                         range: ParamRange,
                         position: Position)
                         -> Result<(), SemanticError> {
        let ParamRange { start, end, step } = range;
        if !(start.is_finite() && end.is_finite() && step.is_finite()) {
            return Err(SemanticError::NonNumericRange { name: name.to_string(),
                                                        position });
        }
        if step <= 0.0 {
            return Err(SemanticError::NonPositiveStep { name: name.to_string(),
                                                        step,
                                                        position });
        }
        // Only the first condition can hold once the step is known to be positive.
        if (start > end && step > 0.0) || (start < end && step < 0.0) {
            return Err(SemanticError::InvalidRange { name: name.to_string(),
                                                     start,
                                                     end,
                                                     step,
                                                     position });
        }

        self.set_param(name, range);
        Ok(())
    }

    /// Evaluates `expr` once and stores the result as a variable.
    ///
    /// # Errors
    /// Any `RuntimeError` raised by the expression.
    pub fn assign(&mut self, name: &str, expr: &Expr) -> Result<f64, Error> {
        let value = self.eval(expr)?;
        self.variables.insert(name.to_string(), value);
        Ok(value)
    }

    /// Evaluates `expr` once and stores the result as a constant.
    ///
    /// # Errors
    /// Any `RuntimeError` raised by the expression.
    pub fn declare_const(&mut self, name: &str, expr: &Expr) -> Result<f64, Error> {
        let value = self.eval(expr)?;
        self.constants.insert(name.to_string(), value);
        Ok(value)
    }

    /// Stores the expression tree itself under `name`, unevaluated.
    ///
    /// A later declaration with the same name replaces the earlier one.
    pub fn declare_formula(&mut self, name: &str, expr: &Expr) {
        self.formulas.insert(name.to_string(), expr.clone());
    }
}
