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
    /// Evaluates `%`, `&` or `|`.
    ///
    /// These operators are defined only on integers. The remainder takes the
    /// sign of the dividend and wraps for `i64::MIN % -1`.
    ///
    /// # Errors
    /// - `Domain` if either operand is real.
    /// - `DivideByZero` for a zero divisor of `%`.
    pub fn eval_integer_op(op: BinaryOperator,
                           left: Number,
                           right: Number,
                           source: &SourceText,
                           offset: usize)
                           -> EvalResult<Number> {
        let (Number::Integer(a), Number::Integer(b)) = (left, right) else {
            return Err(ExpressionError::new(ErrorKind::Domain,
                                            format!("Operator '{op}' requires integer operands."),
                                            source,
                                            offset));
        };

        match op {
            BinaryOperator::Mod if b == 0 => {
                Err(ExpressionError::new(ErrorKind::DivideByZero, "Division by zero.", source, offset))
            },
            BinaryOperator::Mod => Ok(Number::Integer(a.wrapping_rem(b))),
            BinaryOperator::BitAnd => Ok(Number::Integer(a & b)),
            _ => Ok(Number::Integer(a | b)),
        }
    }
}
