use super::TableName;
use crate::schema::Table;

use std::sync::Arc;

/// Schema definition statements. These are never cached.
#[derive(Debug, Clone, PartialEq)]
pub enum Ddl {
    CreateTable(CreateTable),
    DropTable(DropTable),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub table: Arc<Table>,
    pub if_not_exists: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    pub name: TableName,
    pub if_exists: bool,
}

impl Ddl {
    pub fn create_table(table: Arc<Table>) -> Self {
        Self::CreateTable(CreateTable {
            table,
            if_not_exists: false,
        })
    }

    pub fn drop_table(name: impl Into<TableName>) -> Self {
        Self::DropTable(DropTable {
            name: name.into(),
            if_exists: false,
        })
    }

    /// Adds `IF NOT EXISTS` / `IF EXISTS`.
    pub fn if_exists(mut self) -> Self {
        match &mut self {
            Self::CreateTable(stmt) => stmt.if_not_exists = true,
            Self::DropTable(stmt) => stmt.if_exists = true,
        }
        self
    }
}
