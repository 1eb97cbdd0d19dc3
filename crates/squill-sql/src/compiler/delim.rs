use super::{Formatter, ToSql};

use squill_core::Result;

/// Comma delimited
pub(super) struct Comma<L>(pub(super) L);

/// Delimited by an arbitrary string
pub(super) struct Delimited<L>(pub(super) L, pub(super) &'static str);

impl<'stmt, L> ToSql<'stmt> for Comma<L>
where
    L: IntoIterator,
    L::Item: ToSql<'stmt>,
{
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        fmt!(f, Delimited(self.0, ", "));
        Ok(())
    }
}

impl<'stmt, L> ToSql<'stmt> for Delimited<L>
where
    L: IntoIterator,
    L::Item: ToSql<'stmt>,
{
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        let mut s = "";
        for i in self.0 {
            fmt!(f, s i);
            s = self.1;
        }
        Ok(())
    }
}
