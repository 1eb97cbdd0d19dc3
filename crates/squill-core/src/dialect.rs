//! The capability contract between the compiler and a database.
//!
//! A [`Dialect`] describes how a database spells parameters, limits, literals
//! and identifiers. The compiler consults it while rendering; it never
//! branches on the database's name.

mod mssql;
pub use mssql::Mssql;

mod mysql;
pub use mysql::Mysql;

mod oracle;
pub use oracle::Oracle;

mod postgresql;
pub use postgresql::Postgresql;

mod sqlite;
pub use sqlite::Sqlite;

use crate::{
    stmt::{Type, Value},
    Error, Result,
};

use std::fmt;

pub trait Dialect: fmt::Debug + Send + Sync + 'static {
    /// Name of the dialect, e.g. `"sqlite"`.
    fn name(&self) -> &'static str;

    /// Whether compiled statements may be cached for this dialect.
    ///
    /// There is no default: a dialect must state whether its compiled output
    /// depends only on the statement's structure.
    fn supports_statement_cache(&self) -> bool;

    /// Whether `LIMIT` / `OFFSET` accept bound parameters. When they do not,
    /// limit parameters are rendered inline at execution time.
    fn supports_parameterized_limit(&self) -> bool;

    fn limit_style(&self) -> LimitStyle;

    fn paramstyle(&self) -> Paramstyle {
        Paramstyle::Qmark
    }

    fn update_from_style(&self) -> UpdateFromStyle {
        UpdateFromStyle::None
    }

    fn supports_returning(&self) -> bool {
        false
    }

    /// Keyword placed between a table factor and its alias.
    fn table_alias_keyword(&self) -> &'static str {
        " AS "
    }

    fn render_bool(&self, value: bool) -> &'static str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    /// Renders a value as an inline SQL literal.
    fn render_literal(&self, value: &Value) -> Result<String> {
        default_render_literal(self, value)
    }

    /// The column type used for `ty` in `CREATE TABLE`.
    fn type_name(&self, ty: &Type) -> Result<String> {
        default_type_name(ty)
    }

    /// A subquery returning no rows, rendered in place of an empty expanded
    /// `IN` list.
    fn empty_set_expr(&self) -> &'static str {
        "SELECT 1 WHERE 1!=1"
    }

    /// Table selected from when a `SELECT` has no `FROM` clause, for
    /// databases that require one.
    fn dual_table(&self) -> Option<&'static str> {
        None
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    /// Whether `ident` must be quoted: it is a reserved word, is not all
    /// lowercase, or contains characters outside `[a-z0-9_$]`.
    fn requires_quotes(&self, ident: &str) -> bool {
        let mut chars = ident.chars();

        let legal_start = matches!(chars.next(), Some('a'..='z' | '_'));
        let legal_rest = chars.all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '$'));

        !legal_start || !legal_rest || is_reserved_word(ident)
    }
}

/// How `LIMIT` / `OFFSET` are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStyle {
    /// `LIMIT n OFFSET m`. When only an offset is present, `unbounded` is
    /// rendered as the limit (e.g. `LIMIT -1 OFFSET m`); when `unbounded` is
    /// `None` a bare `OFFSET m` is rendered.
    LimitOffset { unbounded: Option<&'static str> },

    /// `SELECT TOP n ...` when there is no offset, otherwise
    /// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`, which requires `ORDER BY`.
    OffsetFetch,

    /// Wraps the query in a derived table filtered on `ROW_NUMBER()`, which
    /// requires `ORDER BY`.
    RowNumber,
}

/// How bind parameter placeholders are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paramstyle {
    /// `?`
    Qmark,

    /// `?1`, `?2`, ...
    NumericQmark,

    /// `$1`, `$2`, ...
    Numeric,

    /// `:name`
    Named,
}

impl Paramstyle {
    pub fn is_numbered(self) -> bool {
        matches!(self, Self::NumericQmark | Self::Numeric)
    }

    pub fn is_positional(self) -> bool {
        !matches!(self, Self::Named)
    }
}

/// How `UPDATE` statements reference tables other than the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateFromStyle {
    /// Only the target table may be referenced.
    None,

    /// `UPDATE t SET ... FROM other WHERE ...`
    From,

    /// `UPDATE t, other SET t.x = ..., other.y = ... WHERE ...`
    MultiTable,
}

/// The ANSI rendering of a literal, with booleans spelled by the dialect.
pub fn default_render_literal<D>(dialect: &D, value: &Value) -> Result<String>
where
    D: Dialect + ?Sized,
{
    match value {
        Value::Null => Ok("NULL".to_string()),
        Value::Bool(value) => Ok(dialect.render_bool(*value).to_string()),
        Value::I32(value) => Ok(value.to_string()),
        Value::I64(value) => Ok(value.to_string()),
        Value::F64(value) => render_float(*value),
        Value::String(value) => Ok(quote_string(value)),
        Value::Bytes(value) => Ok(format!("X'{}'", hex(value))),
        Value::List(_) => Err(Error::invalid_argument(
            "a list cannot be rendered as a single literal",
        )),
    }
}

/// The ANSI column type names.
pub fn default_type_name(ty: &Type) -> Result<String> {
    Ok(match ty {
        Type::Bool => "BOOLEAN",
        Type::I32 => "INTEGER",
        Type::I64 => "BIGINT",
        Type::F64 => "DOUBLE PRECISION",
        Type::String => "TEXT",
        Type::Bytes => "BLOB",
        _ => return Err(unsupported_column_type(ty)),
    }
    .to_string())
}

/// Quotes a string literal, doubling embedded quotes.
pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub(crate) fn render_float(value: f64) -> Result<String> {
    if !value.is_finite() {
        return Err(Error::invalid_argument(format!(
            "{value} cannot be rendered as a SQL literal"
        )));
    }

    Ok(format!("{value:?}"))
}

pub(crate) fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push_str(&format!("{byte:02X}"));
    }
    out
}

pub(crate) fn unsupported_column_type(ty: &Type) -> Error {
    Error::unsupported_feature(format!("no column type for {ty:?}"))
}

const RESERVED_WORDS: &[&str] = &[
    "all", "alter", "and", "any", "as", "asc", "between", "by", "case", "cast", "check", "column",
    "constraint", "create", "cross", "current_date", "current_time", "current_timestamp",
    "default", "delete", "desc", "distinct", "drop", "else", "end", "except", "exists", "false",
    "fetch", "for", "foreign", "from", "full", "grant", "group", "having", "in", "index", "inner",
    "insert", "intersect", "into", "is", "join", "key", "left", "like", "limit", "natural", "not",
    "null", "offset", "on", "or", "order", "outer", "primary", "references", "returning", "right",
    "rows", "select", "set", "table", "then", "to", "top", "true", "union", "unique", "update",
    "user", "using", "values", "when", "where", "with",
];

fn is_reserved_word(ident: &str) -> bool {
    RESERVED_WORDS.contains(&ident)
}
