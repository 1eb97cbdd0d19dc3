use super::{expr::SelectColumn, Comma, Formatter, Ident, ToSql};

use squill_core::{
    dialect::UpdateFromStyle,
    stmt::{Delete, Expr, Insert, InsertSource, Qualifier, Update},
    Error, Result,
};

impl<'stmt> ToSql<'stmt> for &'stmt Insert {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        let table = self.table.table_name();
        fmt!(f, "INSERT INTO " table);

        if !self.columns.is_empty() {
            fmt!(f, " (" Comma(self.columns.iter().map(Ident)) ")");
        }

        match &self.source {
            InsertSource::DefaultValues => {
                if !self.columns.is_empty() {
                    return Err(Error::invalid_statement(
                        "INSERT with a column list requires values",
                    ));
                }
                fmt!(f, " DEFAULT VALUES");
            }
            InsertSource::Values(values) => {
                let width = if self.columns.is_empty() {
                    self.table.columns.len()
                } else {
                    self.columns.len()
                };

                if let Some(row) = values.rows.iter().find(|row| row.len() != width) {
                    return Err(Error::invalid_statement(format!(
                        "INSERT into `{}` expects {width} values per row, got {}",
                        self.table.name,
                        row.len()
                    )));
                }

                fmt!(f, " " values);
            }
            InsertSource::Query(query) => fmt!(f, " " query),
        }

        returning(f, &self.returning)
    }
}

impl<'stmt> ToSql<'stmt> for &'stmt Update {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        if self.assignments.is_empty() {
            return Err(Error::invalid_statement(
                "UPDATE requires at least one assignment",
            ));
        }

        let style = f.dialect.update_from_style();
        let target = self.table.table_name();

        let multi_table = self.assignments.iter().any(|assignment| {
            match &assignment.column.qualifier {
                Qualifier::None => false,
                Qualifier::Table(name) => *name != target,
                Qualifier::Alias(_) => true,
            }
        });

        if multi_table && style != UpdateFromStyle::MultiTable {
            return Err(Error::unsupported_feature(format!(
                "{} does not support UPDATE of columns of a table other than `{target}`",
                f.dialect.name()
            )));
        }

        if !self.from.is_empty() && style == UpdateFromStyle::None {
            return Err(Error::unsupported_feature(format!(
                "{} does not support UPDATE with additional FROM tables",
                f.dialect.name()
            )));
        }

        fmt!(f, "UPDATE " target);

        let qualify_set = style == UpdateFromStyle::MultiTable && !self.from.is_empty();
        if qualify_set {
            fmt!(f, ", " Comma(&self.from));
        }

        fmt!(f, " SET ");
        for (i, assignment) in self.assignments.iter().enumerate() {
            if i > 0 {
                fmt!(f, ", ");
            }

            if qualify_set {
                let mut column = assignment.column.clone();
                if column.qualifier.is_none() {
                    column.qualifier = Qualifier::Table(target.clone());
                }
                f.column(&column)?;
            } else {
                fmt!(f, Ident(&assignment.column.name));
            }

            fmt!(f, " = " assignment.value);
        }

        if style == UpdateFromStyle::From && !self.from.is_empty() {
            fmt!(f, " FROM " Comma(&self.from));
        }

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }

        returning(f, &self.returning)
    }
}

impl<'stmt> ToSql<'stmt> for &'stmt Delete {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        let table = self.table.table_name();
        fmt!(f, "DELETE FROM " table);

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }

        returning(f, &self.returning)
    }
}

/// Renders a `RETURNING` clause. Returned columns are not qualified.
fn returning<'stmt>(f: &mut Formatter<'_, 'stmt>, exprs: &'stmt [Expr]) -> Result<()> {
    if exprs.is_empty() {
        return Ok(());
    }

    if !f.dialect.supports_returning() {
        return Err(Error::unsupported_feature(format!(
            "{} does not support RETURNING",
            f.dialect.name()
        )));
    }

    f.qualified(false, |f| {
        fmt!(f, " RETURNING " Comma(exprs.iter().map(SelectColumn)));
        Ok(())
    })
}
