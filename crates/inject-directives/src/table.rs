//! Directive registration table.

use std::collections::BTreeMap;
use std::fmt;

use crate::parser::is_valid_directive_name;
use crate::{Directive, DirectiveError, FnDirective, RegistrationError};

/// Mapping from directive name to handler.
///
/// Built once at startup and frozen when handed to an
/// [`Injector`](crate::Injector). Registering a name twice is an error;
/// [`replace`](Self::replace) is the explicit overwrite path.
///
/// # Example
///
/// ```
/// use inject_directives::{DirectiveTable, RegistrationError};
///
/// let mut table = DirectiveTable::new();
/// table.register_fn("shout", |arg| Ok(arg.to_uppercase())).unwrap();
///
/// let err = table.register_fn("shout", |arg| Ok(arg.to_owned())).unwrap_err();
/// assert_eq!(err, RegistrationError::Duplicate("shout".to_owned()));
/// ```
#[derive(Default)]
pub struct DirectiveTable {
    handlers: BTreeMap<String, Box<dyn Directive>>,
}

impl DirectiveTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directive handler under its [`Directive::name`].
    pub fn register<D: Directive + 'static>(
        &mut self,
        handler: D,
    ) -> Result<(), RegistrationError> {
        let name = validated_name(&handler)?;
        if self.handlers.contains_key(&name) {
            return Err(RegistrationError::Duplicate(name));
        }
        self.handlers.insert(name, Box::new(handler));
        Ok(())
    }

    /// Register a function of the argument as a directive.
    pub fn register_fn<F>(
        &mut self,
        name: impl Into<String>,
        handler: F,
    ) -> Result<(), RegistrationError>
    where
        F: Fn(&str) -> Result<String, DirectiveError> + Send + Sync + 'static,
    {
        self.register(FnDirective::new(name, handler))
    }

    /// Register a handler, replacing any handler with the same name.
    ///
    /// Returns the replaced handler, if any.
    pub fn replace<D: Directive + 'static>(
        &mut self,
        handler: D,
    ) -> Result<Option<Box<dyn Directive>>, RegistrationError> {
        let name = validated_name(&handler)?;
        Ok(self.handlers.insert(name, Box::new(handler)))
    }

    /// Look up a handler by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Directive> {
        self.handlers.get(name).map(AsRef::as_ref)
    }

    /// Whether a handler is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.handlers.keys().map(String::as_str)
    }

    /// Number of registered directives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the table has no directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for DirectiveTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

fn validated_name(handler: &dyn Directive) -> Result<String, RegistrationError> {
    let name = handler.name();
    if is_valid_directive_name(name) {
        Ok(name.to_owned())
    } else {
        Err(RegistrationError::InvalidName(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DirectiveContext, DirectiveOutput, DirectiveSyntax};

    fn expand(table: &DirectiveTable, name: &str, arg: &str) -> DirectiveOutput {
        let ctx = DirectiveContext {
            name,
            line: 1,
            syntax: DirectiveSyntax::Call,
            source: "",
        };
        table.get(name).unwrap().expand(arg, &ctx).unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut table = DirectiveTable::new();
        table.register_fn("shout", |arg| Ok(arg.to_uppercase())).unwrap();

        assert!(table.contains("shout"));
        assert_eq!(table.len(), 1);
        assert_eq!(
            expand(&table, "shout", "hey"),
            DirectiveOutput::Html("HEY".to_owned())
        );
    }

    #[test]
    fn test_unknown_name() {
        let table = DirectiveTable::new();
        assert!(table.get("missing").is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut table = DirectiveTable::new();
        table.register_fn("a", |_| Ok("first".to_owned())).unwrap();

        let err = table.register_fn("a", |_| Ok("second".to_owned())).unwrap_err();

        assert_eq!(err, RegistrationError::Duplicate("a".to_owned()));
        assert_eq!(expand(&table, "a", ""), DirectiveOutput::Html("first".to_owned()));
    }

    #[test]
    fn test_replace_overwrites() {
        let mut table = DirectiveTable::new();
        table.register_fn("a", |_| Ok("first".to_owned())).unwrap();

        let previous = table
            .replace(FnDirective::new("a", |_: &str| Ok("second".to_owned())))
            .unwrap();

        assert!(previous.is_some());
        assert_eq!(table.len(), 1);
        assert_eq!(expand(&table, "a", ""), DirectiveOutput::Html("second".to_owned()));
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut table = DirectiveTable::new();

        for name in ["", "1st", "with space", "dot.name"] {
            let err = table.register_fn(name, |_| Ok(String::new())).unwrap_err();
            assert_eq!(err, RegistrationError::InvalidName(name.to_owned()));
        }
        assert!(table.is_empty());
    }

    #[test]
    fn test_names_sorted() {
        let mut table = DirectiveTable::new();
        table.register_fn("zeta", |_| Ok(String::new())).unwrap();
        table.register_fn("alpha", |_| Ok(String::new())).unwrap();

        assert_eq!(table.names().collect::<Vec<_>>(), vec!["alpha", "zeta"]);
        assert_eq!(format!("{table:?}"), r#"{"alpha", "zeta"}"#);
    }
}
