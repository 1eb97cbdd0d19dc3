use super::{Comma, Formatter, Ident, ToSql};

use squill_core::{
    schema::{Column, ForeignKey},
    stmt::{CreateTable, Ddl, DropTable},
    Error, Result,
};

impl<'stmt> ToSql<'stmt> for &'stmt Ddl {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        match self {
            Ddl::CreateTable(stmt) => fmt!(f, stmt),
            Ddl::DropTable(stmt) => fmt!(f, stmt),
        }
        Ok(())
    }
}

impl<'stmt> ToSql<'stmt> for &'stmt CreateTable {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        let table = &self.table;

        if table.columns.is_empty() {
            return Err(Error::invalid_statement(format!(
                "table `{}` has no columns",
                table.name
            )));
        }

        let name = table.table_name();
        fmt!(f, "CREATE TABLE ");
        if self.if_not_exists {
            fmt!(f, "IF NOT EXISTS ");
        }
        fmt!(f, name " (" Comma(&table.columns));

        let primary_key: Vec<_> = table.primary_key().map(|column| Ident(&column.name)).collect();
        if !primary_key.is_empty() {
            fmt!(f, ", PRIMARY KEY (" Comma(primary_key) ")");
        }

        for fk in &table.foreign_keys {
            fmt!(f, ", " fk);
        }

        fmt!(f, ")");
        Ok(())
    }
}

impl<'stmt> ToSql<'stmt> for &'stmt Column {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        let ty = f.dialect.type_name(&self.ty)?;
        fmt!(f, Ident(&self.name) " " ty);

        if !self.nullable {
            fmt!(f, " NOT NULL");
        }
        Ok(())
    }
}

impl<'stmt> ToSql<'stmt> for &'stmt ForeignKey {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        fmt!(
            f,
            "FOREIGN KEY (" Comma(self.columns.iter().map(Ident)) ") REFERENCES "
            self.references " (" Comma(self.referenced_columns.iter().map(Ident)) ")"
        );
        Ok(())
    }
}

impl<'stmt> ToSql<'stmt> for &'stmt DropTable {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        fmt!(f, "DROP TABLE ");
        if self.if_exists {
            fmt!(f, "IF EXISTS ");
        }
        fmt!(f, self.name);
        Ok(())
    }
}
