use super::{Formatter, ToSql};

use squill_core::{
    stmt::{Alias, TableName},
    Result,
};

/// An identifier, quoted when the dialect requires it.
pub(super) struct Ident<S>(pub(super) S);

impl<'stmt, S: AsRef<str>> ToSql<'stmt> for Ident<S> {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        let ident = self.0.as_ref();
        if f.dialect.requires_quotes(ident) {
            let quoted = f.dialect.quote_identifier(ident);
            f.dst.push_str(&quoted);
        } else {
            f.dst.push_str(ident);
        }
        Ok(())
    }
}

impl<'stmt> ToSql<'stmt> for &TableName {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        if let Some(schema) = &self.schema {
            fmt!(f, Ident(schema) ".");
        }
        fmt!(f, Ident(&self.name));
        Ok(())
    }
}

impl<'stmt> ToSql<'stmt> for &Alias {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        match self {
            Alias::Named(name) => fmt!(f, Ident(name)),
            Alias::Anonymous(id) => {
                let n = f.anon_alias(*id);
                fmt!(f, "anon_" n);
            }
        }
        Ok(())
    }
}
