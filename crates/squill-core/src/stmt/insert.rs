use super::{Expr, Query, Values};
use crate::schema::Table;

use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Table to insert into
    pub table: Arc<Table>,

    /// Target columns, in the order values are supplied.
    pub columns: Vec<String>,

    /// Source of the inserted rows
    pub source: InsertSource,

    /// Expressions to return from the inserted rows. Empty for no
    /// `RETURNING` clause.
    pub returning: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// `DEFAULT VALUES`
    DefaultValues,

    Values(Values),

    /// `INSERT INTO ... SELECT ...`
    Query(Box<Query>),
}

impl Insert {
    pub fn new(table: Arc<Table>) -> Self {
        Self {
            table,
            columns: vec![],
            source: InsertSource::DefaultValues,
            returning: vec![],
        }
    }

    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a row of values. Anonymous bind parameters in the row are
    /// named and typed after the target column at the same position.
    pub fn values<I>(mut self, row: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        let mut row: Vec<Expr> = row.into_iter().map(Into::into).collect();

        for (expr, name) in row.iter_mut().zip(&self.columns) {
            let ty = self
                .table
                .column(name)
                .map(|column| column.ty.clone())
                .unwrap_or(super::Type::Unknown);
            expr.hint_from_column(name, &ty);
        }

        match &mut self.source {
            InsertSource::Values(values) => values.rows.push(row),
            source => *source = InsertSource::Values(Values { rows: vec![row] }),
        }
        self
    }

    pub fn from_query(mut self, query: impl Into<Query>) -> Self {
        self.source = InsertSource::Query(Box::new(query.into()));
        self
    }

    pub fn returning<I>(mut self, exprs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        self.returning.extend(exprs.into_iter().map(Into::into));
        self
    }
}
