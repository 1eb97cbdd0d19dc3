use super::Expr;
use crate::schema::Table;

use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    /// Table to delete from
    pub table: Arc<Table>,

    /// WHERE
    pub filter: Option<Expr>,

    /// Optionally, return something
    pub returning: Vec<Expr>,
}

impl Delete {
    pub fn new(table: Arc<Table>) -> Self {
        Self {
            table,
            filter: None,
            returning: vec![],
        }
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
