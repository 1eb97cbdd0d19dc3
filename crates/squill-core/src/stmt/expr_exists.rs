use super::{Expr, Query};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprExists {
    pub query: Box<Query>,
}

impl Expr {
    pub fn exists(query: impl Into<Query>) -> Self {
        ExprExists {
            query: Box::new(query.into()),
        }
        .into()
    }
}

impl From<ExprExists> for Expr {
    fn from(value: ExprExists) -> Self {
        Self::Exists(value)
    }
}
