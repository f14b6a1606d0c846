use crate::{
    error::ErrorKind,
    interpreter::{
        definition::{DefinitionId, DefinitionTable},
        lexer::{Lexer, Token},
        parser::{
            core::{ParseResult, Parser},
            utils::parse_parameter_list,
        },
    },
};

/// Parses a definition and inserts it into `table`.
///
/// The lexer must be positioned at the definition's name, i.e. after any
/// leading `def` keyword. Syntax:
/// ```text
///     definition := name ("(" parameters ")")? "=>" expression
/// ```
/// A parameter list, even an empty one, makes the definition a function.
/// The body may call the definition being parsed, which enables recursion.
///
/// # Errors
/// - `Syntax` for a malformed header or body.
/// - `Name` / `Arity` for unresolved names or bad calls in the body.
///
/// On error the table is left unchanged.
pub fn parse_definition(lexer: &mut Lexer<'_>,
                        table: &mut DefinitionTable)
                        -> ParseResult<DefinitionId> {
    let Token::Name(name) = lexer.current() else {
        return Err(lexer.fail(ErrorKind::Syntax, "Name expected."));
    };
    let name = name.clone();
    lexer.advance()?;

    let parameters = if lexer.at(&Token::LParen) {
        Some(parse_parameter_list(lexer)?)
    } else {
        None
    };

    lexer.expect(&Token::Arrow, "'=>' expected.")?;

    let source = lexer.source().clone();
    tracing::trace!(%name, "parsing definition body");

    table.define(name, parameters, source, |table, pending| {
             Parser::new(lexer, table, Some(pending)).parse_full_expression()
         })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        ast::Expr,
        error::ExpressionError,
        interpreter::{definition::Definition, source::SourceText},
    };

    fn define(table: &mut DefinitionTable, input: &str) -> Result<DefinitionId, ExpressionError> {
        let source = SourceText::new(input).unwrap();
        let mut lexer = Lexer::new(&source)?;
        parse_definition(&mut lexer, table)
    }

    #[test]
    fn constant() {
        let mut table = DefinitionTable::new();
        let id = define(&mut table, "answer => 6 * 7").unwrap();
        let def = table.get(id).unwrap();
        assert_eq!(def.name(), "answer");
        assert!(!def.is_function());
        assert_eq!(def.arity(), 0);
        assert_eq!(def.to_string(), "answer => (6 * 7)");
    }

    #[test]
    fn parameters_become_positional_references() {
        let mut table = DefinitionTable::new();
        let id = define(&mut table, "sub(a, b) => b - a").unwrap();
        let Expr::BinaryOp { left, right, .. } = table.get(id).unwrap().body() else {
            panic!("expected a binary operation");
        };
        assert!(matches!(**left, Expr::Parameter { index: 1, .. }));
        assert!(matches!(**right, Expr::Parameter { index: 0, .. }));
    }

    #[test]
    fn body_can_call_itself() {
        let mut table = DefinitionTable::new();
        let id = define(&mut table, "fact(n) => n < 2 ? 1 : n * fact(n - 1)").unwrap();

        let Expr::Conditional { else_branch, .. } = table.get(id).unwrap().body() else {
            panic!("expected a conditional");
        };
        let Expr::BinaryOp { right, .. } = &**else_branch else {
            panic!("expected a binary operation");
        };
        assert!(matches!(**right, Expr::Call { definition, .. } if definition == id));
    }

    #[test]
    fn redefinition_recurses_into_itself() {
        let mut table = DefinitionTable::new();
        let old = define(&mut table, "f(n) => n").unwrap();
        let new = define(&mut table, "f(n) => n < 1 ? 0 : f(n - 1)").unwrap();
        assert_ne!(old, new);

        let body = table.lookup("f").map(Definition::body).unwrap();
        let Expr::Conditional { else_branch, .. } = body else {
            panic!("expected a conditional");
        };
        assert!(matches!(**else_branch, Expr::Call { definition, .. } if definition == new));
    }

    #[test]
    fn parameters_shadow_definitions() {
        let mut table = DefinitionTable::new();
        define(&mut table, "x => 100").unwrap();
        let id = define(&mut table, "id(x) => x").unwrap();
        assert!(matches!(table.get(id).unwrap().body(), Expr::Parameter { index: 0, .. }));
    }

    #[test]
    fn header_errors() {
        let mut table = DefinitionTable::new();
        let cases = [("=> 1", "Name expected.", 0),
                     ("f 1", "'=>' expected.", 2),
                     ("f(1) => 1", "Expected name or ')' after '('.", 2),
                     ("f(a b) => 1", "Expected ',' or ')' after name.", 4),
                     ("f(a,) => 1", "Expected name after ','.", 4),
                     ("f(a, a) => 1", "Duplicate parameter 'a'.", 5)];

        for (input, message, offset) in cases {
            let err = define(&mut table, input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Syntax, "{input}");
            assert_eq!(err.message(), message, "{input}");
            assert_eq!(err.offset(), offset, "{input}");
        }
        assert!(table.is_empty());
    }

    #[test]
    fn body_errors_do_not_define() {
        let mut table = DefinitionTable::new();
        let err = define(&mut table, "f(n) => n + g(n)").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Name);
        assert_eq!(err.offset(), 12);
        assert!(table.lookup("f").is_none());
    }
}
