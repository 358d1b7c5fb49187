/// Parser entry points.
///
/// Parses a whole program into statements and exposes the expression entry
/// point used by every statement form.
pub mod core;

/// Statement parsing.
///
/// Dispatches on the leading token of each statement: parameter declarations,
/// assignments, constant and formula declarations, and the `draw`, `show` and
/// `clear` directives.
pub mod statement;

/// Binary operator parsing.
///
/// Implements the precedence levels for addition, multiplication and powers,
/// plus the reserved equality level.
pub mod binary;

/// Unary and primary expression parsing.
///
/// Handles prefix minus, literals, names, calls and parentheses.
pub mod unary;

/// Shared parsing helpers.
///
/// Token expectations, identifiers and the signed literals of parameter
/// ranges.
pub mod utils;
