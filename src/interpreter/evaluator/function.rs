use crate::{
    ast::Expr,
    error::{ErrorKind, ExpressionError},
    interpreter::{
        definition::{Definition, DefinitionId, DefinitionTable},
        evaluator::core::{EvalResult, EvaluationContext},
        source::SourceText,
        value::core::Number,
    },
};

impl EvaluationContext<'_> {
    /// Evaluates a call to a user-defined function.
    ///
    /// Arguments are evaluated left to right in the caller's frame, then
    /// bound positionally to the callee's parameters in a fresh frame.
    /// Argument counts were checked when the call was parsed.
    ///
    /// # Errors
    /// Propagates argument and body errors, and returns `RecursionLimit` when
    /// the call would exceed the configured depth.
    pub(crate) fn eval_call(&mut self,
                            id: DefinitionId,
                            arguments: &[Expr],
                            source: &SourceText,
                            offset: usize)
                            -> EvalResult<Number> {
        let mut frame = Vec::with_capacity(arguments.len());
        for argument in arguments {
            frame.push(self.eval(argument, source)?);
        }
        self.invoke(id, frame, source, offset)
    }

    /// Evaluates a reference to a constant.
    ///
    /// The body is evaluated anew on every reference, so a constant whose
    /// body refers to itself hits the depth limit.
    pub(crate) fn eval_global(&mut self,
                              id: DefinitionId,
                              source: &SourceText,
                              offset: usize)
                              -> EvalResult<Number> {
        self.invoke(id, Vec::new(), source, offset)
    }

    /// Runs a definition's body in a new frame.
    ///
    /// The frame is popped whether or not the body succeeds, leaving the
    /// context reusable after an error.
    fn invoke(&mut self,
              id: DefinitionId,
              frame: Vec<Number>,
              source: &SourceText,
              offset: usize)
              -> EvalResult<Number> {
        let table = self.table;
        let definition = Self::definition(table, id, source, offset)?;

        if self.depth() >= self.max_depth {
            tracing::warn!(name = definition.name(),
                           max_depth = self.max_depth,
                           "recursion limit reached");
            return Err(ExpressionError::new(ErrorKind::RecursionLimit,
                                            format!("Recursion limit of {} exceeded in '{}'.",
                                                    self.max_depth,
                                                    definition.name()),
                                            source,
                                            offset));
        }

        self.frames.push(frame);
        let result = self.eval(definition.body(), definition.source());
        self.frames.pop();
        result
    }

    fn definition<'t>(table: &'t DefinitionTable,
                      id: DefinitionId,
                      source: &SourceText,
                      offset: usize)
                      -> EvalResult<&'t Definition> {
        table.get(id).ok_or_else(|| {
                          ExpressionError::new(ErrorKind::Name,
                                               format!("Definition #{} does not exist.",
                                                       id.index()),
                                               source,
                                               offset)
                      })
    }
}

#[cfg(test)]
mod test {
    use tracing_test::traced_test;

    use crate::{
        error::ErrorKind,
        interpreter::{
            definition::DefinitionTable,
            evaluator::core::{EvaluationContext, MAX_CALL_DEPTH},
            lexer::Lexer,
            parser::{core::Parser, definition::parse_definition},
            source::SourceText,
            value::core::Number,
        },
    };

    fn define(table: &mut DefinitionTable, input: &str) {
        let source = SourceText::new(input).unwrap();
        let mut lexer = Lexer::new(&source).unwrap();
        parse_definition(&mut lexer, table).unwrap();
    }

    fn run(context: &mut EvaluationContext<'_>, input: &str) -> Result<Number, ErrorKind> {
        let source = SourceText::new(input).unwrap();
        let mut lexer = Lexer::new(&source).unwrap();
        let expr = Parser::new(&mut lexer, context.table(), None).parse_full_expression()
                                                                  .unwrap();
        context.eval(&expr, &source).map_err(|err| err.kind())
    }

    #[test]
    fn arguments_bind_positionally() {
        let mut table = DefinitionTable::new();
        define(&mut table, "sub(a, b) => a - b");

        let mut context = EvaluationContext::new(&table);
        assert_eq!(run(&mut context, "sub(10, 3)"), Ok(Number::Integer(7)));
        assert_eq!(run(&mut context, "sub(3, 10)"), Ok(Number::Integer(-7)));
        assert_eq!(context.depth(), 0);
    }

    #[test]
    fn recursion() {
        let mut table = DefinitionTable::new();
        define(&mut table, "fact(n) => n < 2 ? 1 : n * fact(n - 1)");

        let mut context = EvaluationContext::new(&table);
        assert_eq!(run(&mut context, "fact(10)"), Ok(Number::Integer(3_628_800)));
    }

    #[test]
    #[traced_test]
    fn depth_limit_stops_runaway_recursion() {
        let mut table = DefinitionTable::new();
        define(&mut table, "loop(n) => loop(n + 1)");

        let mut context = EvaluationContext::new(&table).with_max_depth(64);
        assert_eq!(run(&mut context, "loop(0)"), Err(ErrorKind::RecursionLimit));
        assert_eq!(context.depth(), 0);
        assert!(logs_contain("recursion limit reached"));

        assert_eq!(run(&mut context, "1 + 1"), Ok(Number::Integer(2)));
    }

    #[test]
    fn self_referencing_constant_hits_the_limit() {
        let mut table = DefinitionTable::new();
        define(&mut table, "x => 1");
        define(&mut table, "x => x + 1");

        let mut context = EvaluationContext::new(&table).with_max_depth(32);
        assert_eq!(run(&mut context, "x"), Err(ErrorKind::RecursionLimit));
    }

    #[test]
    fn depth_exactly_at_the_limit_succeeds() {
        let mut table = DefinitionTable::new();
        define(&mut table, "down(n) => n < 1 ? 0 : down(n - 1)");

        let mut context = EvaluationContext::new(&table).with_max_depth(10);
        assert_eq!(run(&mut context, "down(9)"), Ok(Number::Integer(0)));
        assert_eq!(run(&mut context, "down(10)"), Err(ErrorKind::RecursionLimit));
    }

    #[test]
    fn default_limit_fits_a_test_thread() {
        let mut table = DefinitionTable::new();
        define(&mut table, "down(n) => n < 1 ? 0 : down(n - 1)");

        let mut context = EvaluationContext::new(&table);
        let deepest = format!("down({})", MAX_CALL_DEPTH - 1);
        assert_eq!(run(&mut context, &deepest), Ok(Number::Integer(0)));

        let too_deep = format!("down({MAX_CALL_DEPTH})");
        assert_eq!(run(&mut context, &too_deep), Err(ErrorKind::RecursionLimit));
        assert_eq!(context.depth(), 0);
    }

    #[test]
    fn body_errors_point_into_the_definition() {
        let mut table = DefinitionTable::new();
        define(&mut table, "inv(n) => 1 / n");

        let source = SourceText::new("inv(0)").unwrap();
        let mut lexer = Lexer::new(&source).unwrap();
        let expr = Parser::new(&mut lexer, &table, None).parse_full_expression().unwrap();

        let err = EvaluationContext::new(&table).eval(&expr, &source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivideByZero);
        assert_eq!(err.source().as_str(), "inv(n) => 1 / n");
        assert_eq!(err.offset(), 12);
    }
}
