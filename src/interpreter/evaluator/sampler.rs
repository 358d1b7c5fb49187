use crate::{
    ast::Shape,
    interpreter::evaluator::core::{Environment, EvalResult, ParamRange},
};

/// Maximum number of samples taken for one parameter of one `draw` statement.
///
/// Reaching the limit silently truncates the curve.
pub const SAMPLE_LIMIT: usize = 10_000;

/// Sweeps the parameter `name` through `range` and collects the points of
/// `shape`.
///
/// At every step the variable `name` is set to the current value `t`. A
/// function shape yields the point `(t, f)`, a parametric shape yields
/// `(x, y)`. Points with a non-finite coordinate are left out, and so are
/// samples whose evaluation fails; neither stops the sweep.
///
/// After the sweep the variable keeps the last sampled value.
pub fn sample(env: &mut Environment, shape: &Shape, name: &str, range: ParamRange) -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    let mut t = range.start;
    let mut count = 0;

    while range.contains(t) && count < SAMPLE_LIMIT {
        env.variables.insert(name.to_string(), t);
        if let Ok((x, y)) = point(env, shape, t)
           && x.is_finite()
           && y.is_finite()
        {
            points.push((x, y));
        }
        t += range.step;
        count += 1;
    }

    points
}

fn point(env: &Environment, shape: &Shape, t: f64) -> EvalResult<(f64, f64)> {
    match shape {
        Shape::Function(expr) => Ok((t, env.eval(expr)?)),
        Shape::Parametric { x, y } => Ok((env.eval(x)?, env.eval(y)?)),
    }
}
