use std::fmt;

use crate::{
    ast::Position,
    error::{MathError, RuntimeError},
    interpreter::evaluator::core::EvalResult,
    util::num::{is_integral, usize_to_f64},
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluated arguments and either produces a number or
/// reports why the arguments are outside its domain.
type BuiltinFn = fn(&[f64]) -> Result<f64, MathError>;

/// Specifies the allowed number of arguments for a builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` arguments.
    Exact(usize),
    /// `n` or more arguments.
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity.
    #[must_use]
    pub const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::AtLeast(m) => n >= m,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Defines builtin functions by generating the `Builtin` enum and a static
/// lookup table.
///
/// Each entry provides:
/// - the enum variant,
/// - the lower-case name used in source text,
/// - an arity specification,
/// - a function pointer implementing the builtin.
macro_rules! builtin_functions {
    (
        $(
            $variant:ident => $name:literal {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// A function known to the lexer and callable with `name(argument)`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Builtin {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        struct BuiltinDef {
            builtin: Builtin,
            name:    &'static str,
            arity:   Arity,
            func:    BuiltinFn,
        }

        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { builtin: Builtin::$variant, name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    Sin   => "sin"   { arity: Arity::Exact(1), func: |args| unary("sin", args[0], f64::sin) },
    Cos   => "cos"   { arity: Arity::Exact(1), func: |args| unary("cos", args[0], f64::cos) },
    Tan   => "tan"   { arity: Arity::Exact(1), func: |args| unary("tan", args[0], f64::tan) },
    Asin  => "asin"  { arity: Arity::Exact(1), func: |args| unit_interval("asin", args[0], f64::asin) },
    Acos  => "acos"  { arity: Arity::Exact(1), func: |args| unit_interval("acos", args[0], f64::acos) },
    Atan  => "atan"  { arity: Arity::Exact(1), func: |args| unary("atan", args[0], f64::atan) },
    Ln    => "ln"    { arity: Arity::Exact(1), func: |args| positive("ln", args[0], f64::ln) },
    Log   => "log"   { arity: Arity::Exact(1), func: |args| positive("log", args[0], f64::ln) },
    Log10 => "log10" { arity: Arity::Exact(1), func: |args| positive("log10", args[0], f64::log10) },
    Exp   => "exp"   { arity: Arity::Exact(1), func: |args| unary("exp", args[0], f64::exp) },
    Sqrt  => "sqrt"  { arity: Arity::Exact(1), func: sqrt },
    Abs   => "abs"   { arity: Arity::Exact(1), func: |args| Ok(args[0].abs()) },
    Max   => "max"   { arity: Arity::AtLeast(2), func: |args| Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max)) },
    Min   => "min"   { arity: Arity::AtLeast(2), func: |args| Ok(args.iter().copied().fold(f64::INFINITY, f64::min)) },
    Aver  => "aver"  { arity: Arity::AtLeast(2), func: average },
}

impl Builtin {
    /// Looks a builtin up by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        BUILTIN_TABLE.iter()
                     .find(|def| def.name.eq_ignore_ascii_case(name))
                     .map(|def| def.builtin)
    }

    /// The lower-case source spelling of the builtin.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.def().name
    }

    /// How many arguments the builtin accepts.
    #[must_use]
    pub fn arity(self) -> Arity {
        self.def().arity
    }

    /// Applies the builtin to already evaluated arguments.
    ///
    /// # Errors
    /// - `ArgumentCount` if the builtin does not accept `args.len()` arguments.
    /// - `Math` if an argument lies outside the function's domain or the
    ///   result overflows.
    pub fn call(self, args: &[f64], position: Position) -> EvalResult<f64> {
        let arity = self.arity();
        if !arity.check(args.len()) {
            return Err(RuntimeError::ArgumentCount { name: self.name().to_string(),
                                                     expected: arity.to_string(),
                                                     found: args.len(),
                                                     position });
        }
        (self.def().func)(args).map_err(|e| RuntimeError::math(e, position))
    }

    fn def(self) -> &'static BuiltinDef {
        // Every variant has exactly one table entry, generated by the same macro.
        &BUILTIN_TABLE[self as usize]
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raises `base` to `exponent` over the reals.
///
/// # Errors
/// - `Domain` for a zero base with a negative exponent, or a negative base with
///   a fractional exponent.
/// - `Range` if finite operands overflow.
pub fn power(base: f64, exponent: f64) -> Result<f64, MathError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(MathError::Domain { function: "pow",
                                       argument: base });
    }
    if base < 0.0 && exponent.is_finite() && !is_integral(exponent) {
        return Err(MathError::Domain { function: "pow",
                                       argument: base });
    }
    let result = base.powf(exponent);
    if result.is_infinite() && base.is_finite() && exponent.is_finite() {
        return Err(MathError::Range { function: "pow",
                                      argument: base });
    }
    Ok(result)
}

/// Applies `f` and rejects results that a finite argument should not produce.
fn unary(function: &'static str, argument: f64, f: fn(f64) -> f64) -> Result<f64, MathError> {
    let result = f(argument);
    if result.is_nan() && !argument.is_nan() {
        return Err(MathError::Domain { function, argument });
    }
    if result.is_infinite() && argument.is_finite() {
        return Err(MathError::Range { function, argument });
    }
    Ok(result)
}

fn unit_interval(function: &'static str,
                 argument: f64,
                 f: fn(f64) -> f64)
                 -> Result<f64, MathError> {
    if !(-1.0..=1.0).contains(&argument) {
        return Err(MathError::Domain { function, argument });
    }
    unary(function, argument, f)
}

fn positive(function: &'static str, argument: f64, f: fn(f64) -> f64) -> Result<f64, MathError> {
    if argument <= 0.0 {
        return Err(MathError::Domain { function, argument });
    }
    unary(function, argument, f)
}

fn sqrt(args: &[f64]) -> Result<f64, MathError> {
    if args[0] < 0.0 {
        return Err(MathError::Domain { function: "sqrt",
                                       argument: args[0], });
    }
    Ok(args[0].sqrt())
}

fn average(args: &[f64]) -> Result<f64, MathError> {
    Ok(args.iter().sum::<f64>() / usize_to_f64(args.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::num::is_close;

    const AT: Position = Position { line: 1, column: 1 };

    #[test]
    fn table_matches_enum_order() {
        for (index, def) in BUILTIN_TABLE.iter().enumerate() {
            assert_eq!(def.builtin as usize, index);
            assert_eq!(Builtin::from_name(def.name), Some(def.builtin));
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Builtin::from_name("SQRT"), Some(Builtin::Sqrt));
        assert_eq!(Builtin::from_name("Log10"), Some(Builtin::Log10));
        assert_eq!(Builtin::from_name("square"), None);
    }

    #[test]
    fn evaluates_single_argument_builtins() {
        assert!(is_close(Builtin::Sin.call(&[0.0], AT).unwrap(), 0.0, 1e-12, 0.0));
        assert!(is_close(Builtin::Cos.call(&[0.0], AT).unwrap(), 1.0, 1e-12, 0.0));
        assert!(is_close(Builtin::Sqrt.call(&[9.0], AT).unwrap(), 3.0, 1e-12, 0.0));
        assert!(is_close(Builtin::Log.call(&[std::f64::consts::E], AT).unwrap(), 1.0, 1e-12, 0.0));
        assert!(is_close(Builtin::Log10.call(&[1000.0], AT).unwrap(), 3.0, 1e-12, 0.0));
        assert_eq!(Builtin::Abs.call(&[-2.5], AT).unwrap(), 2.5);
    }

    #[test]
    fn domain_violations_are_runtime_errors() {
        for (builtin, argument) in [(Builtin::Sqrt, -1.0),
                                    (Builtin::Asin, 1.5),
                                    (Builtin::Acos, -2.0),
                                    (Builtin::Ln, 0.0),
                                    (Builtin::Log, -3.0),
                                    (Builtin::Log10, 0.0)]
        {
            let error = builtin.call(&[argument], AT).unwrap_err();
            assert!(matches!(error,
                             RuntimeError::Math { source: MathError::Domain { .. },
                                                  .. }),
                    "{builtin} accepted {argument}");
        }
    }

    #[test]
    fn overflow_is_a_range_error() {
        let error = Builtin::Exp.call(&[1000.0], AT).unwrap_err();
        assert!(matches!(error,
                         RuntimeError::Math { source: MathError::Range { .. },
                                              .. }));
    }

    #[test]
    fn variadic_builtins_reject_a_single_argument() {
        for builtin in [Builtin::Max, Builtin::Min, Builtin::Aver] {
            assert_eq!(builtin.arity(), Arity::AtLeast(2));
            let error = builtin.call(&[1.0], AT).unwrap_err();
            assert_eq!(error,
                       RuntimeError::ArgumentCount { name:     builtin.name().to_string(),
                                                     expected: "at least 2".to_string(),
                                                     found:    1,
                                                     position: AT, });
        }
        assert_eq!(Builtin::Max.call(&[1.0, 4.0, 2.0], AT).unwrap(), 4.0);
        assert_eq!(Builtin::Min.call(&[1.0, 4.0, 2.0], AT).unwrap(), 1.0);
        assert_eq!(Builtin::Aver.call(&[1.0, 2.0], AT).unwrap(), 1.5);
    }

    #[test]
    fn power_follows_real_semantics() {
        assert_eq!(power(2.0, 10.0).unwrap(), 1024.0);
        assert_eq!(power(-2.0, 3.0).unwrap(), -8.0);
        assert!(matches!(power(-8.0, 1.0 / 3.0), Err(MathError::Domain { .. })));
        assert!(matches!(power(0.0, -1.0), Err(MathError::Domain { .. })));
        assert!(matches!(power(10.0, 400.0), Err(MathError::Range { .. })));
    }
}
