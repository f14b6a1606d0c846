use std::collections::HashMap;

use crate::{ast::Expr, error::ExpressionError, interpreter::source::SourceText};

/// Stable handle of a [`Definition`] inside a [`DefinitionTable`].
///
/// Handles are indexes into the table's append-only storage, so a handle
/// keeps naming the same definition even after its name is redefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefinitionId(usize);

impl DefinitionId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A named constant or fixed-arity function.
#[derive(Debug, Clone)]
pub struct Definition {
    id:          DefinitionId,
    name:        String,
    is_function: bool,
    parameters:  Vec<String>,
    body:        Expr,
    source:      SourceText,
}

impl Definition {
    #[must_use]
    pub const fn id(&self) -> DefinitionId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` for definitions declared with a parameter list, even an empty
    /// one.
    #[must_use]
    pub const fn is_function(&self) -> bool {
        self.is_function
    }

    #[must_use]
    pub const fn arity(&self) -> usize {
        self.parameters.len()
    }

    #[must_use]
    pub const fn body(&self) -> &Expr {
        &self.body
    }

    /// The text the body was parsed from.
    #[must_use]
    pub const fn source(&self) -> &SourceText {
        &self.source
    }
}

/// Writes `name(params) => body`, the form accepted by
/// [`crate::parse_definition`].
impl std::fmt::Display for Definition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        if self.is_function {
            write!(f, "({})", self.parameters.join(", "))?;
        }
        write!(f, " => {}", self.body)
    }
}

/// A definition whose header is known but whose body is still being parsed.
///
/// The id is reserved up front so the body can refer to the definition
/// itself, which is what makes recursive functions possible.
#[derive(Debug)]
pub struct PendingDefinition {
    id:          DefinitionId,
    name:        String,
    is_function: bool,
    parameters:  Vec<String>,
}

impl PendingDefinition {
    #[must_use]
    pub const fn id(&self) -> DefinitionId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_function(&self) -> bool {
        self.is_function
    }

    #[must_use]
    pub const fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Position of `name` in the parameter list.
    #[must_use]
    pub fn parameter_index(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p == name)
    }

    fn finish(self, body: Expr, source: SourceText) -> Definition {
        Definition { id: self.id,
                     name: self.name,
                     is_function: self.is_function,
                     parameters: self.parameters,
                     body,
                     source }
    }
}

/// The symbol table of user definitions.
///
/// Definitions are stored append-only in declaration order; a separate map
/// points each name at its current definition. Redefining a name appends a
/// new definition and repoints the name, leaving the old definition in place
/// for trees that already reference it.
#[derive(Debug, Default)]
pub struct DefinitionTable {
    definitions: Vec<Definition>,
    names:       HashMap<String, DefinitionId>,
}

impl DefinitionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the current definition of `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Definition> {
        self.names.get(name).and_then(|id| self.definitions.get(id.0))
    }

    /// Returns the definition behind `id`, including superseded ones.
    #[must_use]
    pub fn get(&self, id: DefinitionId) -> Option<&Definition> {
        self.definitions.get(id.0)
    }

    /// Number of names currently defined.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over the current definition of every name, in the order
    /// those definitions were made.
    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions
            .iter()
            .filter(|def| self.names.get(&def.name) == Some(&def.id))
    }

    /// Iterates over every definition ever made, superseded ones included.
    pub fn history(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter()
    }

    /// Builds and inserts a definition in two phases.
    ///
    /// First the header (`name`, and `parameters` for a function) is turned
    /// into a [`PendingDefinition`] with a reserved id. Then `parse_body` is
    /// called with the table and the pending definition, so the body can
    /// resolve the name being defined. On success the definition is
    /// appended and `name` is pointed at it; on failure the table is left
    /// untouched.
    ///
    /// # Errors
    /// Propagates the error returned by `parse_body`.
    pub fn define<F>(&mut self,
                     name: String,
                     parameters: Option<Vec<String>>,
                     source: SourceText,
                     parse_body: F)
                     -> Result<DefinitionId, ExpressionError>
        where F: FnOnce(&Self, &PendingDefinition) -> Result<Expr, ExpressionError>
    {
        let pending = PendingDefinition { id: DefinitionId(self.definitions.len()),
                                          name,
                                          is_function: parameters.is_some(),
                                          parameters: parameters.unwrap_or_default() };

        let body = parse_body(self, &pending)?;
        Ok(self.insert(pending.finish(body, source)))
    }

    fn insert(&mut self, definition: Definition) -> DefinitionId {
        let id = definition.id;
        match self.names.insert(definition.name.clone(), id) {
            Some(previous) => {
                tracing::debug!(name = %definition.name,
                                previous = previous.0,
                                id = id.0,
                                "redefined definition");
            },
            None => tracing::debug!(name = %definition.name, id = id.0, "added definition"),
        }
        self.definitions.push(definition);
        id
    }
}

#[cfg(test)]
mod test {
    use tracing_test::traced_test;

    use super::*;
    use crate::interpreter::value::core::Number;

    fn literal(value: i64) -> Expr {
        Expr::Literal { value: Number::Integer(value) }
    }

    fn define_constant(table: &mut DefinitionTable, name: &str, value: i64) -> DefinitionId {
        table.define(name.to_string(), None, SourceText::default(), |_, _| Ok(literal(value)))
             .unwrap()
    }

    #[test]
    fn pending_definition_is_visible_to_the_body_parser() {
        let mut table = DefinitionTable::new();
        let id = table.define("f".to_string(),
                              Some(vec!["a".to_string(), "b".to_string()]),
                              SourceText::default(),
                              |table, pending| {
                                  assert!(table.lookup("f").is_none());
                                  assert_eq!(pending.name(), "f");
                                  assert!(pending.is_function());
                                  assert_eq!(pending.arity(), 2);
                                  assert_eq!(pending.parameter_index("b"), Some(1));
                                  assert_eq!(pending.parameter_index("c"), None);
                                  Ok(literal(0))
                              })
                      .unwrap();
        assert_eq!(table.lookup("f").map(Definition::id), Some(id));
    }

    #[test]
    fn failed_body_leaves_table_unchanged() {
        let mut table = DefinitionTable::new();
        let source = SourceText::new("x => ?").unwrap();
        let result = table.define("x".to_string(), None, source.clone(), |_, _| {
                              Err(ExpressionError::new(crate::error::ErrorKind::Syntax,
                                                       "Unexpected '?'.",
                                                       &source,
                                                       5))
                          });
        assert!(result.is_err());
        assert!(table.is_empty());
        assert_eq!(table.history().count(), 0);
    }

    #[test]
    fn redefinition_repoints_name_and_keeps_old_definition() {
        let mut table = DefinitionTable::new();
        let first = define_constant(&mut table, "x", 1);
        define_constant(&mut table, "y", 2);
        let second = define_constant(&mut table, "x", 3);

        assert_ne!(first, second);
        assert_eq!(table.lookup("x").map(Definition::id), Some(second));
        assert_eq!(table.get(first).map(Definition::body), Some(&literal(1)));
        assert_eq!(table.len(), 2);

        let current = table.iter().map(Definition::name).collect::<Vec<_>>();
        assert_eq!(current, vec!["y", "x"]);
        assert_eq!(table.history().count(), 3);
    }

    #[test]
    fn display_matches_definition_syntax() {
        let mut table = DefinitionTable::new();
        define_constant(&mut table, "answer", 42);
        table.define("zero".to_string(), Some(Vec::new()), SourceText::default(), |_, _| {
                 Ok(literal(0))
             })
             .unwrap();

        let rendered = table.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(rendered, vec!["answer => 42", "zero() => 0"]);
    }

    #[test]
    #[traced_test]
    fn redefinition_is_logged() {
        let mut table = DefinitionTable::new();
        define_constant(&mut table, "x", 1);
        define_constant(&mut table, "x", 2);
        assert!(logs_contain("added definition"));
        assert!(logs_contain("redefined definition"));
    }
}
