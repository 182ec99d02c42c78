//! Defines the `Dialect` trait for database-specific SQL syntax.

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - PostgreSQL and SQLite use double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL and SQLite use `?`
    fn placeholder(&self, index: usize) -> String;

    /// Whether the dialect can hand rows back from INSERT/UPDATE/DELETE
    /// via a RETURNING clause.
    fn supports_returning(&self) -> bool;

    /// The literal to emit for LIMIT when only an OFFSET was requested.
    /// `None` means the dialect accepts a bare OFFSET.
    fn unbounded_limit(&self) -> Option<&'static str>;

    /// Returns the name of the dialect (e.g., "PostgreSQL", "SQLite").
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident)
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index + 1)
    }

    fn supports_returning(&self) -> bool {
        true
    }

    fn unbounded_limit(&self) -> Option<&'static str> {
        None
    }

    fn name(&self) -> &'static str {
        "PostgreSQL"
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#"`{}`"#, ident)
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".into()
    }

    fn supports_returning(&self) -> bool {
        false
    }

    fn unbounded_limit(&self) -> Option<&'static str> {
        // MySQL has no bare OFFSET; the manual's recommended "all rows" limit.
        Some("18446744073709551615")
    }

    fn name(&self) -> &'static str {
        "MySQL"
    }
}

#[derive(Debug, Clone)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident)
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".into()
    }

    fn supports_returning(&self) -> bool {
        true
    }

    fn unbounded_limit(&self) -> Option<&'static str> {
        // LIMIT -1 disables the limit without disabling OFFSET.
        Some("-1")
    }

    fn name(&self) -> &'static str {
        "SQLite"
    }
}
