use super::OrderByExpr;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub exprs: Vec<OrderByExpr>,
}

impl OrderBy {
    pub fn new<I>(exprs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OrderByExpr>,
    {
        Self {
            exprs: exprs.into_iter().map(Into::into).collect(),
        }
    }
}
