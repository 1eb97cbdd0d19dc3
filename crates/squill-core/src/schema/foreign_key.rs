use crate::stmt::TableName;

/// A foreign key constraint from `columns` of the owning table to
/// `referenced_columns` of `references`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub columns: Vec<String>,
    pub references: TableName,
    pub referenced_columns: Vec<String>,
}
