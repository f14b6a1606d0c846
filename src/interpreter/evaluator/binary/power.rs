use crate::interpreter::{evaluator::core::EvaluationContext, value::core::Number};

impl EvaluationContext<'_> {
    /// Evaluates an exponentiation operation.
    ///
    /// Integer bases raised to a non-negative integer exponent that fits in
    /// `u32` use wrapping integer power. Every other combination, including
    /// negative exponents, is computed in floating point with `powf`.
    ///
    /// # Example
    /// ```
    /// use numeval::{Number, interpreter::evaluator::core::EvaluationContext};
    ///
    /// let result = EvaluationContext::eval_pow(Number::Integer(2), Number::Integer(10));
    /// assert_eq!(result, Number::Integer(1024));
    ///
    /// let result = EvaluationContext::eval_pow(Number::Integer(2), Number::Integer(-1));
    /// assert_eq!(result, Number::Real(0.5));
    /// ```
    #[must_use]
    pub fn eval_pow(base: Number, exponent: Number) -> Number {
        if let (Number::Integer(b), Number::Integer(e)) = (base, exponent)
           && let Ok(e) = u32::try_from(e)
        {
            return Number::Integer(b.wrapping_pow(e));
        }
        Number::Real(base.as_real().powf(exponent.as_real()))
    }
}

#[cfg(test)]
mod test {
    use crate::interpreter::{evaluator::core::EvaluationContext, value::core::Number};

    #[test]
    fn integer_power_wraps() {
        assert_eq!(EvaluationContext::eval_pow(Number::Integer(2), Number::Integer(64)),
                   Number::Integer(0));
        assert_eq!(EvaluationContext::eval_pow(Number::Integer(-3), Number::Integer(3)),
                   Number::Integer(-27));
        assert_eq!(EvaluationContext::eval_pow(Number::Integer(5), Number::Integer(0)),
                   Number::Integer(1));
    }

    #[test]
    fn real_power() {
        let Number::Real(root) = EvaluationContext::eval_pow(Number::Integer(2),
                                                             Number::Real(0.5))
        else {
            panic!("expected a real");
        };
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-12);

        assert_eq!(EvaluationContext::eval_pow(Number::Real(1.5), Number::Integer(2)),
                   Number::Real(2.25));
    }

    #[test]
    fn exponent_beyond_u32_falls_back_to_real() {
        assert_eq!(EvaluationContext::eval_pow(Number::Integer(1), Number::Integer(1 << 40)),
                   Number::Real(1.0));
    }
}
