use super::{Alias, TableName};

/// What a column reference is qualified by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// An unqualified column, e.g. a column of an `INSERT` target.
    None,

    /// A table referenced by name.
    Table(TableName),

    /// An aliased table, derived table, or CTE.
    Alias(Alias),
}

impl Qualifier {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<TableName> for Qualifier {
    fn from(value: TableName) -> Self {
        Self::Table(value)
    }
}

impl From<Alias> for Qualifier {
    fn from(value: Alias) -> Self {
        Self::Alias(value)
    }
}
