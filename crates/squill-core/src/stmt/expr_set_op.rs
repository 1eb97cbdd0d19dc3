use super::{ExprSet, Query, SetOp};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprSetOp {
    pub op: SetOp,
    pub operands: Vec<ExprSet>,
}

impl ExprSetOp {
    pub fn new<I>(op: SetOp, operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ExprSet>,
    {
        Self {
            op,
            operands: operands.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ExprSetOp> for ExprSet {
    fn from(value: ExprSetOp) -> Self {
        Self::SetOp(value)
    }
}

impl From<ExprSetOp> for Query {
    fn from(value: ExprSetOp) -> Self {
        Query::new(value)
    }
}
