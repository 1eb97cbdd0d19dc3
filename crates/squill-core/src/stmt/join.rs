use super::{Expr, TableFactor};

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// The table to join
    pub table: TableFactor,

    pub kind: JoinKind,

    /// The join condition
    pub on: JoinOn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinOn {
    Expr(Expr),

    /// Inferred at compile time from the foreign keys between the joined
    /// table and the tables already in the `FROM` item.
    Infer,

    /// No condition, for `CROSS JOIN`.
    None,
}

impl Join {
    pub fn new(table: impl Into<TableFactor>, kind: JoinKind, on: JoinOn) -> Self {
        Self {
            table: table.into(),
            kind,
            on,
        }
    }
}
