use crate::{
    ast::Expr,
    error::{ErrorKind, ExpressionError},
    interpreter::{
        definition::{DefinitionId, DefinitionTable, PendingDefinition},
        lexer::{Lexer, Token},
    },
};

pub type ParseResult<T> = Result<T, ExpressionError>;

/// Deepest expression tree the parser will build.
///
/// Parsing, evaluation, rendering and dropping all recurse once per level,
/// so the bound keeps every one of them within a small native stack.
pub const MAX_NESTING: usize = 256;

/// A name resolved to a definition, either in the table or the one being
/// built.
#[derive(Debug, Clone, Copy)]
pub(in crate::interpreter::parser) struct Target {
    pub id:          DefinitionId,
    pub is_function: bool,
    pub arity:       usize,
}

/// Recursive-descent parser over a [`Lexer`].
///
/// Names are resolved while parsing, against the parameters and name of the
/// pending definition (when parsing a definition body) and then the
/// definition table.
///
/// Every nested construct (group, branch, argument, operand of a chain,
/// negation or exponent) counts one level against [`MAX_NESTING`].
pub struct Parser<'a, 's> {
    pub(in crate::interpreter::parser) lexer:   &'a mut Lexer<'s>,
    pub(in crate::interpreter::parser) table:   &'a DefinitionTable,
    pub(in crate::interpreter::parser) pending: Option<&'a PendingDefinition>,
    pub(in crate::interpreter::parser) depth:   usize,
}

impl<'a, 's> Parser<'a, 's> {
    /// Creates a parser positioned at the lexer's current token.
    ///
    /// `pending` is only set while parsing the body of a definition.
    pub fn new(lexer: &'a mut Lexer<'s>,
               table: &'a DefinitionTable,
               pending: Option<&'a PendingDefinition>)
               -> Self {
        Self { lexer,
               table,
               pending,
               depth: 0 }
    }

    /// Enters one more level of nesting.
    ///
    /// # Errors
    /// `Syntax` at the current token once [`MAX_NESTING`] levels are open.
    pub(in crate::interpreter::parser) fn descend(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_NESTING {
            return Err(self.lexer.fail(ErrorKind::Syntax, "Expression is nested too deeply."));
        }
        self.depth += 1;
        Ok(())
    }

    /// Leaves `levels` levels entered with [`Parser::descend`].
    pub(in crate::interpreter::parser) const fn ascend(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Parses one complete expression.
    ///
    /// The whole remaining input must be consumed; there are no statement
    /// separators.
    ///
    /// # Errors
    /// - `Syntax` if tokens remain after the expression, or on malformed
    ///   input.
    /// - `Name` for unknown names and `Arity` for calls with the wrong
    ///   number of arguments.
    /// - `Lex` for unrecognized characters.
    pub fn parse_full_expression(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_expression()?;
        if !self.lexer.at(&Token::End) {
            return Err(self.lexer.fail(ErrorKind::Syntax,
                                       format!("Unexpected {} after expression.",
                                               self.lexer.current().describe())));
        }
        Ok(expr)
    }

    /// Parses an expression.
    ///
    /// This is the entry point for nested expressions (groups, arguments and
    /// branches). It begins at the lowest-precedence level, the conditional
    /// operator.
    ///
    /// Grammar: `expression := conditional`
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_conditional()
    }

    /// Parses a conditional expression.
    ///
    /// Right-associative, so `a ? b : c ? d : e` parses as
    /// `a ? b : (c ? d : e)`.
    ///
    /// Grammar: `conditional := comparison ("?" conditional ":" conditional)?`
    fn parse_conditional(&mut self) -> ParseResult<Expr> {
        self.descend()?;
        let condition = self.parse_comparison()?;
        if !self.lexer.at(&Token::Question) {
            self.ascend(1);
            return Ok(condition);
        }
        self.lexer.advance()?;

        let then_branch = self.parse_conditional()?;
        self.lexer.expect(&Token::Colon, "':' expected.")?;
        let else_branch = self.parse_conditional()?;
        self.ascend(1);

        Ok(Expr::Conditional { condition:   Box::new(condition),
                               then_branch: Box::new(then_branch),
                               else_branch: Box::new(else_branch), })
    }

    /// Resolves `name` to a definition.
    ///
    /// The pending definition shadows a table entry of the same name, so a
    /// redefinition that recurses calls itself rather than its predecessor.
    pub(in crate::interpreter::parser) fn resolve(&self, name: &str) -> Option<Target> {
        if let Some(pending) = self.pending
           && pending.name() == name
        {
            return Some(Target { id:          pending.id(),
                                 is_function: pending.is_function(),
                                 arity:       pending.arity(), });
        }

        self.table.lookup(name).map(|def| Target { id:          def.id(),
                                                   is_function: def.is_function(),
                                                   arity:       def.arity(), })
    }
}
