use super::{ExprSetOp, Select, Values};

#[derive(Debug, Clone, PartialEq)]
pub enum ExprSet {
    /// A select query
    Select(Box<Select>),

    /// A set operation (union, intersection, ...) on two queries
    SetOp(ExprSetOp),

    /// A set of explicitly specified values.
    Values(Values),
}

impl ExprSet {
    /// The leftmost `SELECT` of the set. Its columns name the columns of the
    /// whole set.
    pub fn first_select(&self) -> Option<&Select> {
        match self {
            Self::Select(select) => Some(select),
            Self::SetOp(set_op) => set_op.operands.first().and_then(ExprSet::first_select),
            Self::Values(_) => None,
        }
    }
}

impl From<Select> for ExprSet {
    fn from(value: Select) -> Self {
        Self::Select(Box::new(value))
    }
}

impl From<Values> for ExprSet {
    fn from(value: Values) -> Self {
        Self::Values(value)
    }
}
