use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{EvalResult, EvaluationContext},
        source::SourceText,
        value::core::Number,
    },
};

impl EvaluationContext<'_> {
    /// Evaluates a binary operation between two values.
    ///
    /// Routes the operation to a specialized handler depending on the
    /// operator. Arithmetic operators promote mixed operands to real,
    /// integer-only operators reject reals and comparisons produce `0` or `1`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `source`: Text of the expression containing the operator.
    /// - `offset`: Byte offset of the operator, used for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Number>` containing the evaluated result.
    ///
    /// # Errors
    /// - `DivideByZero` for `/` or `%` with a zero divisor.
    /// - `Domain` for `%`, `&` or `|` with a real operand.
    ///
    /// # Example
    /// ```
    /// use numeval::{
    ///     Number, SourceText, ast::BinaryOperator,
    ///     interpreter::evaluator::core::EvaluationContext,
    /// };
    ///
    /// let source = SourceText::new("3 + 4").unwrap();
    /// let result = EvaluationContext::eval_binary(BinaryOperator::Add,
    ///                                             Number::Integer(3),
    ///                                             Number::Integer(4),
    ///                                             &source,
    ///                                             2);
    /// assert_eq!(result.unwrap(), Number::Integer(7));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: Number,
                       right: Number,
                       source: &SourceText,
                       offset: usize)
                       -> EvalResult<Number> {
        if op.is_integer_only() {
            return Self::eval_integer_op(op, left, right, source, offset);
        }
        if op.is_comparison() {
            return Ok(Self::eval_comparison(op, left, right));
        }

        match op {
            BinaryOperator::Pow => Ok(Self::eval_pow(left, right)),
            _ => Self::eval_scalar_op(op, left, right, source, offset),
        }
    }
}
