use super::Formatter;

use squill_core::Result;

macro_rules! fmt {
    ($f:expr, $( $fragments:expr )*) => {{
        $(
            $fragments.to_sql($f)?;
        )*
    }};
}

pub(super) trait ToSql<'stmt> {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()>;
}

impl<'stmt> ToSql<'stmt> for &str {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        f.dst.push_str(self);
        Ok(())
    }
}

impl<'stmt> ToSql<'stmt> for String {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        f.dst.push_str(&self);
        Ok(())
    }
}

impl<'stmt> ToSql<'stmt> for usize {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        use std::fmt::Write;

        write!(f.dst, "{self}")?;
        Ok(())
    }
}

impl<'stmt, T: ToSql<'stmt>> ToSql<'stmt> for Option<T> {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        if let Some(inner) = self {
            inner.to_sql(f)?;
        }
        Ok(())
    }
}

impl<'stmt, T1: ToSql<'stmt>, T2: ToSql<'stmt>> ToSql<'stmt> for (T1, T2) {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        fmt!(f, self.0 self.1);
        Ok(())
    }
}

impl<'stmt, T1: ToSql<'stmt>, T2: ToSql<'stmt>, T3: ToSql<'stmt>> ToSql<'stmt> for (T1, T2, T3) {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        fmt!(f, self.0 self.1 self.2);
        Ok(())
    }
}
