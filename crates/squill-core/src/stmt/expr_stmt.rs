use super::{Expr, ExprSet, Query, Type};

/// A scalar subquery.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub query: Box<Query>,
}

impl ExprStmt {
    /// The type of the first selected column.
    pub fn ty(&self) -> Type {
        match &self.query.body {
            ExprSet::Select(select) => select
                .columns
                .first()
                .map(Expr::ty)
                .unwrap_or(Type::Unknown),
            _ => Type::Unknown,
        }
    }
}

impl Expr {
    pub fn scalar_subquery(query: impl Into<Query>) -> Self {
        ExprStmt {
            query: Box::new(query.into()),
        }
        .into()
    }
}

impl From<ExprStmt> for Expr {
    fn from(value: ExprStmt) -> Self {
        Self::Stmt(value)
    }
}
