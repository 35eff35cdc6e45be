//! T-SQL text and parameter emission.
//!
//! Everything that touches raw statement text lives here: literal and
//! identifier quoting, the ordered named-parameter binder, and the
//! [`Statement`] value that the rest of the workspace produces and
//! statement runners consume.
//!
//! Two transmission modes are supported by the callers of this crate:
//! parameterized statements carry [`SqlParam`] bindings rendered as
//! positional `@P1`-style placeholders, and literal statements inline
//! values via [`Lit`]/[`NLit`] with single quotes doubled.

use indexmap::IndexMap;
use std::fmt;

/// A T-SQL string literal wrapper.
///
/// Display writes the value quoted with single quotes, doubling any
/// embedded single quote.
///
/// # Example
/// ```
/// use rolodex_sql::Lit;
/// assert_eq!(format!("{}", Lit("foo")), "'foo'");
/// assert_eq!(format!("{}", Lit("it's")), "'it''s'");
/// ```
pub struct Lit<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> fmt::Display for Lit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'")?;
        for c in self.0.as_ref().chars() {
            if c == '\'' {
                write!(f, "''")?;
            } else {
                write!(f, "{}", c)?;
            }
        }
        write!(f, "'")
    }
}

/// A T-SQL unicode string literal wrapper (`N'...'`).
///
/// Same escaping as [`Lit`], with the `N` prefix that makes the literal
/// `nvarchar` rather than `varchar`.
///
/// # Example
/// ```
/// use rolodex_sql::NLit;
/// assert_eq!(format!("{}", NLit("it's")), "N'it''s'");
/// ```
pub struct NLit<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> fmt::Display for NLit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", Lit(self.0.as_ref()))
    }
}

/// A T-SQL identifier wrapper.
///
/// Display writes the value quoted with square brackets, doubling any
/// embedded closing bracket.
///
/// # Example
/// ```
/// use rolodex_sql::Ident;
/// assert_eq!(format!("{}", Ident("user")), "[user]");
/// assert_eq!(format!("{}", Ident("odd]name")), "[odd]]name]");
/// ```
pub struct Ident<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> fmt::Display for Ident<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for c in self.0.as_ref().chars() {
            if c == ']' {
                write!(f, "]]")?;
            } else {
                write!(f, "{}", c)?;
            }
        }
        write!(f, "]")
    }
}

/// Escape a string literal for T-SQL.
pub fn escape_string(s: &str) -> String {
    format!("{}", Lit(s))
}

/// Quote a T-SQL identifier.
pub fn quote_ident(name: &str) -> String {
    format!("{}", Ident(name))
}

/// A value bound to a statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Text(String),
}

impl SqlValue {
    /// Render this value as an inline T-SQL literal.
    ///
    /// Text values get the `N` unicode prefix and single-quote doubling,
    /// so they round-trip through statement text unchanged.
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Int(v) => v.to_string(),
            SqlValue::Text(v) => format!("{}", NLit(v)),
        }
    }
}

/// A named parameter binding.
///
/// The name is diagnostic; placeholders in statement text are positional
/// (`@P1`, `@P2`, ...) and map to the binding list by order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlParam {
    pub name: String,
    pub value: SqlValue,
}

/// Ordered parameter binder.
///
/// Assigns positional `@Pn` placeholders to named values as they are
/// bound. Binding a name twice returns the placeholder assigned by the
/// first binding.
///
/// # Example
/// ```
/// use rolodex_sql::{Params, SqlValue};
/// let mut params = Params::new();
/// assert_eq!(params.bind("id0", SqlValue::Int(1)), "@P1");
/// assert_eq!(params.bind("name0", SqlValue::Text("Red".into())), "@P2");
/// assert_eq!(params.bind("id0", SqlValue::Int(1)), "@P1");
/// ```
#[derive(Debug, Default)]
pub struct Params {
    slots: IndexMap<String, usize>,
    values: Vec<SqlParam>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a named value and return its placeholder.
    pub fn bind(&mut self, name: impl Into<String>, value: SqlValue) -> String {
        let name = name.into();
        if let Some(&idx) = self.slots.get(&name) {
            return format!("@P{idx}");
        }
        let idx = self.slots.len() + 1;
        self.slots.insert(name.clone(), idx);
        self.values.push(SqlParam { name, value });
        format!("@P{idx}")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Finish binding and return the ordered binding list.
    pub fn into_vec(self) -> Vec<SqlParam> {
        self.values
    }
}

/// A statement ready for execution: text plus its ordered bindings.
///
/// Statements emitted in literal mode carry an empty binding list.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl Statement {
    /// A statement with no parameters.
    pub fn text(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lit_doubles_single_quotes() {
        assert_eq!(escape_string("O'Brien"), "'O''Brien'");
        assert_eq!(escape_string(""), "''");
        assert_eq!(escape_string("''"), "''''''");
    }

    #[test]
    fn nlit_prefixes_and_escapes() {
        assert_eq!(format!("{}", NLit("Won't Fix")), "N'Won''t Fix'");
    }

    #[test]
    fn ident_doubles_closing_brackets() {
        assert_eq!(quote_ident("Enum_Colour"), "[Enum_Colour]");
        assert_eq!(quote_ident("odd]name"), "[odd]]name]");
    }

    #[test]
    fn params_assign_positional_placeholders_in_bind_order() {
        let mut params = Params::new();
        let a = params.bind("id0", SqlValue::Int(1));
        let b = params.bind("name0", SqlValue::Text("Red".into()));
        let c = params.bind("id1", SqlValue::Int(2));
        assert_eq!((a.as_str(), b.as_str(), c.as_str()), ("@P1", "@P2", "@P3"));

        let bound = params.into_vec();
        assert_eq!(
            bound.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            ["id0", "name0", "id1"]
        );
        assert_eq!(bound[2].value, SqlValue::Int(2));
    }

    #[test]
    fn rebinding_a_name_keeps_the_first_slot() {
        let mut params = Params::new();
        assert_eq!(params.bind("id0", SqlValue::Int(1)), "@P1");
        assert_eq!(params.bind("id0", SqlValue::Int(99)), "@P1");
        let bound = params.into_vec();
        assert_eq!(bound.len(), 1);
        assert_eq!(bound[0].value, SqlValue::Int(1));
    }

    #[test]
    fn literal_rendering_round_trips_quotes() {
        assert_eq!(SqlValue::Int(-3).to_literal(), "-3");
        assert_eq!(SqlValue::Text("it's".into()).to_literal(), "N'it''s'");
    }
}
