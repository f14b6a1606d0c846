use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::EvaluationContext, value::core::Number},
};

/// Maps a comparison operator and the ordering of its operands to the
/// boolean result.
///
/// An unordered pair (a NaN operand) satisfies only `NotEqual`.
#[must_use]
pub fn comparison_result(op: BinaryOperator, ordering: Option<Ordering>) -> bool {
    match op {
        BinaryOperator::Equal => ordering == Some(Ordering::Equal),
        BinaryOperator::NotEqual => ordering != Some(Ordering::Equal),
        BinaryOperator::Less => ordering == Some(Ordering::Less),
        BinaryOperator::Greater => ordering == Some(Ordering::Greater),
        BinaryOperator::LessEqual => {
            matches!(ordering, Some(Ordering::Less | Ordering::Equal))
        },
        BinaryOperator::GreaterEqual => {
            matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
        },
        _ => false,
    }
}

impl EvaluationContext<'_> {
    /// Evaluates a comparison of the form `Number <Operator> Number`.
    ///
    /// Two integers compare exactly; otherwise both sides are promoted to
    /// real. The result is the integer `1` for true and `0` for false.
    ///
    /// # Example
    /// ```
    /// use numeval::{
    ///     Number, ast::BinaryOperator, interpreter::evaluator::core::EvaluationContext,
    /// };
    ///
    /// let result = EvaluationContext::eval_comparison(BinaryOperator::Less,
    ///                                                 Number::Real(3.0),
    ///                                                 Number::Integer(5));
    /// assert_eq!(result, Number::Integer(1));
    /// ```
    #[must_use]
    pub fn eval_comparison(op: BinaryOperator, left: Number, right: Number) -> Number {
        let ordering = match left.promote(right) {
            (Number::Integer(a), Number::Integer(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_real().partial_cmp(&b.as_real()),
        };
        Number::from(comparison_result(op, ordering))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn compare(op: BinaryOperator, left: Number, right: Number) -> i64 {
        match EvaluationContext::eval_comparison(op, left, right) {
            Number::Integer(n) => n,
            Number::Real(_) => panic!("comparison produced a real"),
        }
    }

    #[test]
    fn integers_compare_exactly() {
        let (a, b) = (Number::Integer(i64::MAX), Number::Integer(i64::MAX - 1));
        assert_eq!(compare(BinaryOperator::Greater, a, b), 1);
        assert_eq!(compare(BinaryOperator::Equal, a, b), 0);
        assert_eq!(compare(BinaryOperator::NotEqual, a, b), 1);
    }

    #[test]
    fn mixed_comparison() {
        assert_eq!(compare(BinaryOperator::Equal, Number::Integer(2), Number::Real(2.0)), 1);
        assert_eq!(compare(BinaryOperator::LessEqual, Number::Real(2.5), Number::Integer(2)), 0);
        assert_eq!(compare(BinaryOperator::GreaterEqual, Number::Real(2.5), Number::Integer(2)),
                   1);
    }

    #[test]
    fn nan_is_only_unequal() {
        let nan = Number::Real(f64::NAN);
        assert_eq!(compare(BinaryOperator::Equal, nan, nan), 0);
        assert_eq!(compare(BinaryOperator::Less, nan, Number::Integer(1)), 0);
        assert_eq!(compare(BinaryOperator::NotEqual, nan, nan), 1);
    }
}
