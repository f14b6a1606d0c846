/// Represents a runtime value in the interpreter.
///
/// Every expression evaluates to a `Number`. Literals without a fractional
/// part are integers; a real operand on either side of an arithmetic
/// operator promotes the other side to real.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// A 64-bit signed integer. Arithmetic on integers wraps.
    Integer(i64),
    /// A double precision floating-point number.
    Real(f64),
}

impl From<bool> for Number {
    fn from(v: bool) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl Number {
    /// Converts the value to an `f64`.
    ///
    /// Integers beyond `2^53` lose precision, exactly like a native cast.
    ///
    /// # Example
    /// ```
    /// use numeval::Number;
    ///
    /// assert_eq!(Number::Integer(10).as_real(), 10.0);
    /// assert_eq!(Number::Real(2.5).as_real(), 2.5);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_real(self) -> f64 {
        match self {
            Self::Integer(n) => n as f64,
            Self::Real(r) => r,
        }
    }

    /// Conditions treat any non-zero value as true.
    #[must_use]
    pub fn is_truthy(self) -> bool {
        match self {
            Self::Integer(n) => n != 0,
            Self::Real(r) => r != 0.0,
        }
    }

    /// Promotes both values to real if either of them is real.
    ///
    /// # Example
    /// ```
    /// use numeval::Number;
    ///
    /// let (a, b) = Number::Integer(1).promote(Number::Real(0.5));
    /// assert_eq!((a, b), (Number::Real(1.0), Number::Real(0.5)));
    ///
    /// let (a, b) = Number::Integer(1).promote(Number::Integer(2));
    /// assert_eq!((a, b), (Number::Integer(1), Number::Integer(2)));
    /// ```
    #[must_use]
    pub const fn promote(self, other: Self) -> (Self, Self) {
        match (self, other) {
            (Self::Integer(_), Self::Integer(_)) => (self, other),
            _ => (Self::Real(self.as_real()), Self::Real(other.as_real())),
        }
    }
}

/// Integral reals keep a trailing `.0` so that printing a value and lexing
/// it again yields the same variant.
impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) if r.is_finite() && r.fract() == 0.0 => write!(f, "{r:.1}"),
            Self::Real(r) => write!(f, "{r}"),
        }
    }
}
