use super::{Assignment, Expr, ExprColumn, TableWithJoins};
use crate::schema::Table;

use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// The table being updated.
    pub table: Arc<Table>,

    pub assignments: Vec<Assignment>,

    /// Additional tables the statement reads from or, on dialects with
    /// multi-table updates, writes to.
    pub from: Vec<TableWithJoins>,

    pub filter: Option<Expr>,

    pub returning: Vec<Expr>,
}

impl Update {
    pub fn new(table: Arc<Table>) -> Self {
        Self {
            table,
            assignments: vec![],
            from: vec![],
            filter: None,
            returning: vec![],
        }
    }

    /// Adds `column = value` to the `SET` clause.
    pub fn set(mut self, column: ExprColumn, value: impl Into<Expr>) -> Self {
        let mut value = value.into();
        value.hint_from_column(&column.name, &column.ty);
        self.assignments.push(Assignment { column, value });
        self
    }

    pub fn from(mut self, from: impl Into<TableWithJoins>) -> Self {
        self.from.push(from.into());
        self
    }

    pub fn filter(mut self, expr: impl Into<Expr>) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(filter) => Expr::and(filter, expr),
            None => expr.into(),
        });
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
