use crate::{
    ast::UnaryOperator,
    interpreter::{evaluator::core::EvaluationContext, value::core::Number},
};

impl EvaluationContext<'_> {
    /// Evaluates a unary operation.
    ///
    /// Negating `i64::MIN` wraps back to `i64::MIN`.
    ///
    /// # Example
    /// ```
    /// use numeval::{
    ///     Number, ast::UnaryOperator, interpreter::evaluator::core::EvaluationContext,
    /// };
    ///
    /// let value = EvaluationContext::eval_unary(UnaryOperator::Negate, Number::Real(2.5));
    /// assert_eq!(value, Number::Real(-2.5));
    /// ```
    #[must_use]
    pub const fn eval_unary(op: UnaryOperator, value: Number) -> Number {
        match (op, value) {
            (UnaryOperator::Negate, Number::Integer(n)) => Number::Integer(n.wrapping_neg()),
            (UnaryOperator::Negate, Number::Real(r)) => Number::Real(-r),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn negation_wraps() {
        assert_eq!(EvaluationContext::eval_unary(UnaryOperator::Negate, Number::Integer(i64::MIN)),
                   Number::Integer(i64::MIN));
        assert_eq!(EvaluationContext::eval_unary(UnaryOperator::Negate, Number::Integer(5)),
                   Number::Integer(-5));
    }
}
