use crate::{
    error::ExpressionError,
    interpreter::{
        definition::{DefinitionId, DefinitionTable},
        evaluator::core::EvaluationContext,
        source::SourceText,
        value::core::Number,
    },
};

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-x`
    Negate,
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => f.write_str("-"),
        }
    }
}

/// Infix operators, from arithmetic to comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    /// Integer remainder. Both operands must be integers.
    Mod,
    Pow,
    /// Bitwise and. Both operands must be integers.
    BitAnd,
    /// Bitwise or. Both operands must be integers.
    BitOr,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl BinaryOperator {
    /// Returns `true` for operators that yield `0` or `1`.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Equal
                 | Self::NotEqual
                 | Self::Less
                 | Self::Greater
                 | Self::LessEqual
                 | Self::GreaterEqual)
    }

    /// Returns `true` for operators that reject real operands.
    #[must_use]
    pub const fn is_integer_only(self) -> bool {
        matches!(self, Self::Mod | Self::BitAnd | Self::BitOr)
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
        };
        f.write_str(symbol)
    }
}

/// A node of a parsed expression tree.
///
/// Names are resolved while parsing: parameters become positional indexes
/// into the current call frame, and definitions become [`DefinitionId`]s
/// into the table the tree was parsed against. The `name` copies only serve
/// rendering. Offsets are byte positions of the token that produced the
/// node, used for runtime diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Literal {
        /// The constant value.
        value: Number,
    },
    /// A parameter of the function whose body contains this node.
    Parameter {
        /// Position of the parameter in the call frame.
        index:  usize,
        /// Parameter name.
        name:   String,
        /// Offset of the name in the source.
        offset: usize,
    },
    /// A reference to a constant definition.
    Global {
        /// The definition resolved at parse time.
        definition: DefinitionId,
        /// Name of the definition.
        name:       String,
        /// Offset of the name in the source.
        offset:     usize,
    },
    /// A unary operation (e.g. negation).
    UnaryOp {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Offset of the operator in the source.
        offset:  usize,
    },
    /// A binary operation (addition, comparison, etc.).
    BinaryOp {
        /// Left operand.
        left:   Box<Self>,
        /// The operator.
        op:     BinaryOperator,
        /// Right operand.
        right:  Box<Self>,
        /// Offset of the operator in the source.
        offset: usize,
    },
    /// `condition ? then_branch : else_branch`. Only the selected branch is
    /// evaluated.
    Conditional {
        condition:   Box<Self>,
        then_branch: Box<Self>,
        else_branch: Box<Self>,
    },
    /// A call of a function definition.
    Call {
        /// The function resolved at parse time.
        definition: DefinitionId,
        /// Name of the function.
        name:       String,
        /// Arguments, one per parameter.
        arguments:  Vec<Self>,
        /// Offset of the function name in the source.
        offset:     usize,
    },
}

/// Renders the tree back to source text.
///
/// Every operation is parenthesized, so the output parses back to a tree of
/// the same shape regardless of precedence.
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal { value } => write!(f, "{value}"),
            Self::Parameter { name, .. } | Self::Global { name, .. } => f.write_str(name),
            Self::UnaryOp { op, operand, .. } => write!(f, "{op}{operand}"),
            Self::BinaryOp { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::Conditional { condition,
                                then_branch,
                                else_branch, } => {
                write!(f, "({condition} ? {then_branch} : {else_branch})")
            },
            Self::Call { name, arguments, .. } => {
                write!(f, "{name}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(")")
            },
        }
    }
}

/// A parsed top-level expression together with the text it came from.
#[derive(Debug, Clone)]
pub struct Expression {
    root:   Expr,
    source: SourceText,
}

impl Expression {
    #[must_use]
    pub const fn new(root: Expr, source: SourceText) -> Self {
        Self { root, source }
    }

    #[must_use]
    pub const fn root(&self) -> &Expr {
        &self.root
    }

    #[must_use]
    pub const fn source(&self) -> &SourceText {
        &self.source
    }

    /// Evaluates the expression in a fresh context over `table`.
    ///
    /// `table` must be the table the expression was parsed against, or one
    /// that grew from it: definitions are referenced by id, never by name.
    ///
    /// # Errors
    /// Returns an [`ExpressionError`] for domain errors, division by zero or
    /// exceeding the recursion limit.
    ///
    /// # Example
    /// ```
    /// use numeval::{DefinitionTable, Number, parse};
    ///
    /// let table = DefinitionTable::new();
    /// let expression = parse("2 + 3 * 4", &table).unwrap();
    ///
    /// assert_eq!(expression.evaluate(&table).unwrap(), Number::Integer(14));
    /// ```
    pub fn evaluate(&self, table: &DefinitionTable) -> Result<Number, ExpressionError> {
        let mut context = EvaluationContext::new(table);
        self.evaluate_with(&mut context)
    }

    /// Evaluates the expression in a caller-provided context.
    ///
    /// # Errors
    /// Same as [`Expression::evaluate`].
    pub fn evaluate_with(&self,
                         context: &mut EvaluationContext<'_>)
                         -> Result<Number, ExpressionError> {
        tracing::trace!(source = %self.source, "evaluating expression");
        context.eval(&self.root, &self.source)
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)
    }
}
