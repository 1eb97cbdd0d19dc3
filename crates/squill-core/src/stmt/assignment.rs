use super::{Expr, ExprColumn};

/// `column = value` of an `UPDATE ... SET` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: ExprColumn,
    pub value: Expr,
}
