use crate::{
    ast::Expr,
    error::{ErrorKind, ExpressionError},
    interpreter::{definition::DefinitionTable, source::SourceText, value::core::Number},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `ExpressionError` describing the failure.
pub type EvalResult<T> = Result<T, ExpressionError>;

/// Default limit on nested calls and constant references.
///
/// Each call takes several native frames, so this is kept low enough for a
/// debug build on a 2 MB thread.
pub const MAX_CALL_DEPTH: usize = 256;

/// Stores the runtime evaluation state.
///
/// Holds the definition table being evaluated against and a stack of
/// argument frames, one per active call. The bottom frame belongs to the
/// top-level expression and is empty.
///
/// ## Usage
///
/// A context is created per top-level evaluation. Contexts are never shared,
/// but any number of them may borrow the same table at once.
pub struct EvaluationContext<'t> {
    pub(crate) table:     &'t DefinitionTable,
    pub(crate) frames:    Vec<Vec<Number>>,
    pub(crate) max_depth: usize,
}

impl<'t> EvaluationContext<'t> {
    /// Creates a context with a single empty frame and the default depth
    /// limit, [`MAX_CALL_DEPTH`].
    ///
    /// The default fits the 2 MB stack of a spawned or test thread.
    #[must_use]
    pub fn new(table: &'t DefinitionTable) -> Self {
        Self { table,
               frames: vec![Vec::new()],
               max_depth: MAX_CALL_DEPTH }
    }

    /// Replaces the limit on nested calls.
    ///
    /// Deep recursion runs on the native stack, so a limit much larger than
    /// the default needs a thread with a correspondingly large stack.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub const fn table(&self) -> &'t DefinitionTable {
        self.table
    }

    /// Number of calls currently in progress.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. `source` is
    /// the text `expr` was parsed from and is attached to any error raised
    /// by this node.
    ///
    /// The conditional operator evaluates only the selected branch, so a
    /// failing or recursive expression in the other branch is never reached.
    ///
    /// # Errors
    /// Returns `Domain`, `DivideByZero` or `RecursionLimit` errors.
    ///
    /// # Example
    /// ```
    /// use numeval::{
    ///     DefinitionTable, Number, parse,
    ///     interpreter::evaluator::core::EvaluationContext,
    /// };
    ///
    /// let table = DefinitionTable::new();
    /// let expression = parse("0 ? 1 / 0 : 20", &table).unwrap();
    ///
    /// let mut context = EvaluationContext::new(&table);
    /// let value = context.eval(expression.root(), expression.source()).unwrap();
    /// assert_eq!(value, Number::Integer(20));
    /// ```
    pub fn eval(&mut self, expr: &Expr, source: &SourceText) -> EvalResult<Number> {
        match expr {
            Expr::Literal { value } => Ok(*value),
            Expr::Parameter { index, name, offset } => {
                self.frames
                    .last()
                    .and_then(|frame| frame.get(*index))
                    .copied()
                    .ok_or_else(|| {
                        ExpressionError::new(ErrorKind::Name,
                                             format!("Parameter '{name}' is not bound."),
                                             source,
                                             *offset)
                    })
            },
            Expr::Global { definition,
                           offset,
                           .. } => self.eval_global(*definition, source, *offset),
            Expr::UnaryOp { op, operand, .. } => {
                let value = self.eval(operand, source)?;
                Ok(Self::eval_unary(*op, value))
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             offset, } => {
                let left = self.eval(left, source)?;
                let right = self.eval(right, source)?;
                Self::eval_binary(*op, left, right, source, *offset)
            },
            Expr::Conditional { condition,
                                then_branch,
                                else_branch, } => {
                if self.eval(condition, source)?.is_truthy() {
                    self.eval(then_branch, source)
                } else {
                    self.eval(else_branch, source)
                }
            },
            Expr::Call { definition,
                         arguments,
                         offset,
                         .. } => self.eval_call(*definition, arguments, source, *offset),
        }
    }
}
