use std::fmt;

/// A location in the source text.
///
/// Lines start at 1. Columns count characters from the start of the line and
/// also start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line number in the source code.
    pub line:   usize,
    /// Column of the first character of the construct.
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The arithmetic operators that combine two sub-expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `**`
    Pow,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "**",
        };
        f.write_str(symbol)
    }
}

/// An abstract syntax tree node representing a numeric expression.
///
/// Trees are built once by the parser and never mutated afterwards. Every
/// node owns its children, so a tree has no sharing and no cycles. Nodes that
/// can fail during evaluation remember where they came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Constant {
        /// The literal value.
        value: f64,
    },
    /// Reference to a named formula, variable or constant.
    Variable {
        /// Name of the referenced binding, lower-cased.
        name:     String,
        /// Where the reference appears.
        position: Position,
    },
    /// A binary arithmetic operation.
    Binary {
        /// The operator.
        op:       BinaryOperator,
        /// Left operand.
        left:     Box<Self>,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the operator token.
        position: Position,
    },
    /// Prefix minus.
    Negate {
        /// The negated operand.
        expr: Box<Self>,
    },
    /// Single-argument call of a builtin function, such as `sin(t)`.
    Call {
        /// Name of the called function.
        name:     String,
        /// The only argument.
        argument: Box<Self>,
        /// Position of the function name.
        position: Position,
    },
}

impl Expr {
    /// Shorthand for a literal node.
    #[must_use]
    pub const fn constant(value: f64) -> Self {
        Self::Constant { value }
    }

    /// Shorthand for a binary node.
    #[must_use]
    pub fn binary(op: BinaryOperator, left: Self, right: Self, position: Position) -> Self {
        Self::Binary { op,
                       left: Box::new(left),
                       right: Box::new(right),
                       position }
    }

    /// Number of nodes on the longest path from this node down to a leaf.
    #[must_use]
    pub fn height(&self) -> usize {
        match self {
            Self::Constant { .. } | Self::Variable { .. } => 1,
            Self::Binary { left, right, .. } => 1 + left.height().max(right.height()),
            Self::Negate { expr } | Self::Call { argument: expr, .. } => 1 + expr.height(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant { value } => write!(f, "{value}"),
            Self::Variable { name, .. } => f.write_str(name),
            Self::Binary { op, left, right, .. } => write!(f, "({left} {op} {right})"),
            Self::Negate { expr } => write!(f, "-({expr})"),
            Self::Call { name, argument, .. } => write!(f, "{name}({argument})"),
        }
    }
}

/// What a `draw` statement plots.
///
/// The parser tells the two shapes apart only by the comma between the
/// expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// `draw f(x)`: the swept parameter is the x coordinate.
    Function(Expr),
    /// `draw fx(t), fy(t)`: both coordinates are computed.
    Parametric {
        /// Expression for the x coordinate.
        x: Expr,
        /// Expression for the y coordinate.
        y: Expr,
    },
}

/// A top-level statement of a program.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `param t from -1 to 1 step 0.1` or `param t [-1, 1, 0.1]`.
    ParamDecl {
        /// Name of the swept parameter.
        name:     String,
        /// Start of the range.
        min:      f64,
        /// End of the range.
        max:      f64,
        /// Increment between samples.
        step:     f64,
        /// Position of the `param` keyword.
        position: Position,
    },
    /// `x = expr`.
    Assign {
        /// Target variable.
        name:     String,
        /// Value expression, evaluated once.
        expr:     Expr,
        /// Position of the target name.
        position: Position,
    },
    /// `let k = expr`.
    ConstDecl {
        /// Name of the constant.
        name:     String,
        /// Value expression, evaluated once.
        expr:     Expr,
        /// Position of the `let` keyword.
        position: Position,
    },
    /// `def f = expr` or `<builtin> f = expr`.
    FormulaDecl {
        /// Name of the formula.
        name:     String,
        /// Body, stored unevaluated.
        expr:     Expr,
        /// Position of the declaration marker.
        position: Position,
    },
    /// `draw expr [, expr] [with color name]`.
    Draw {
        /// What is plotted.
        shape:    Shape,
        /// Optional color hint passed through to the renderer.
        color:    Option<String>,
        /// Position of the `draw` keyword.
        position: Position,
    },
    /// `show`.
    Show,
    /// `clear`.
    Clear,
}
