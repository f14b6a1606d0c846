use crate::{
    ast::BinaryOperator,
    error::{ErrorKind, ExpressionError},
    interpreter::{
        evaluator::core::{EvalResult, EvaluationContext},
        source::SourceText,
        value::core::Number,
    },
};

impl EvaluationContext<'_> {
    /// Evaluates a scalar arithmetic operation.
    ///
    /// Mixed operands are promoted to real. Integer arithmetic wraps on
    /// overflow, and integer division truncates toward zero. Division by zero
    /// is checked for both integers and reals. The operator must be one of
    /// `Add`, `Sub`, `Mul` or `Div`.
    ///
    /// # Example
    /// ```
    /// use numeval::{
    ///     Number, SourceText, ast::BinaryOperator,
    ///     interpreter::evaluator::core::EvaluationContext,
    /// };
    ///
    /// let source = SourceText::new("i64 max + 1").unwrap();
    /// let result = EvaluationContext::eval_scalar_op(BinaryOperator::Add,
    ///                                                Number::Integer(i64::MAX),
    ///                                                Number::Integer(1),
    ///                                                &source,
    ///                                                8).unwrap();
    /// assert_eq!(result, Number::Integer(i64::MIN));
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator,
                          left: Number,
                          right: Number,
                          source: &SourceText,
                          offset: usize)
                          -> EvalResult<Number> {
        use BinaryOperator::{Add, Div, Mul, Sub};
        use Number::{Integer, Real};

        let divide_by_zero = || {
            ExpressionError::new(ErrorKind::DivideByZero, "Division by zero.", source, offset)
        };

        match left.promote(right) {
            (Integer(a), Integer(b)) => match op {
                Add => Ok(Integer(a.wrapping_add(b))),
                Sub => Ok(Integer(a.wrapping_sub(b))),
                Mul => Ok(Integer(a.wrapping_mul(b))),
                Div if b == 0 => Err(divide_by_zero()),
                _ => Ok(Integer(a.wrapping_div(b))),
            },
            (a, b) => {
                let (a, b) = (a.as_real(), b.as_real());
                match op {
                    Add => Ok(Real(a + b)),
                    Sub => Ok(Real(a - b)),
                    Mul => Ok(Real(a * b)),
                    Div if b == 0.0 => Err(divide_by_zero()),
                    _ => Ok(Real(a / b)),
                }
            },
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{
        ast::BinaryOperator,
        error::ErrorKind,
        interpreter::{
            evaluator::core::EvaluationContext, source::SourceText, value::core::Number,
        },
    };

    fn apply(op: BinaryOperator, left: Number, right: Number) -> Result<Number, ErrorKind> {
        let source = SourceText::new("a op b").unwrap();
        EvaluationContext::eval_scalar_op(op, left, right, &source, 2).map_err(|err| err.kind())
    }

    #[test]
    fn integer_overflow_wraps() {
        use Number::Integer;

        assert_eq!(apply(BinaryOperator::Sub, Integer(i64::MIN), Integer(1)),
                   Ok(Integer(i64::MAX)));
        assert_eq!(apply(BinaryOperator::Mul, Integer(i64::MAX), Integer(2)), Ok(Integer(-2)));
        assert_eq!(apply(BinaryOperator::Div, Integer(i64::MIN), Integer(-1)),
                   Ok(Integer(i64::MIN)));
    }

    #[test]
    fn division_by_zero() {
        use Number::{Integer, Real};

        assert_eq!(apply(BinaryOperator::Div, Integer(1), Integer(0)),
                   Err(ErrorKind::DivideByZero));
        assert_eq!(apply(BinaryOperator::Div, Real(1.0), Real(0.0)),
                   Err(ErrorKind::DivideByZero));
        assert_eq!(apply(BinaryOperator::Div, Integer(1), Real(-0.0)),
                   Err(ErrorKind::DivideByZero));
    }
}
