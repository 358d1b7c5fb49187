/// Numeric helpers.
///
/// This module provides the small floating-point utilities shared by the
/// evaluator and the tests: tolerant comparison, integrality checks, and
/// count-to-float conversion.
pub mod num;
