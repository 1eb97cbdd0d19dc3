use crate::stmt::Type;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name as it appears in SQL
    pub name: String,

    pub ty: Type,

    pub nullable: bool,

    /// True if the column is part of the table's primary key
    pub primary_key: bool,
}
