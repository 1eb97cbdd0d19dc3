use super::Expr;

/// `LIMIT` / `OFFSET` of a query. At least one of the two is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Limit {
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
}
