use super::{Column, ForeignKey, TableBuilder};
use crate::stmt::{
    Alias, Ddl, Delete, Expr, ExprColumn, Insert, Qualifier, Select, TableName, TableRef, Update,
};

use std::sync::Arc;

/// A database table.
///
/// Tables are built once with [`Table::builder`] and shared through `Arc`
/// by every statement that references them.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,

    /// Schema the table lives in, if not the default one.
    pub schema: Option<String>,

    pub columns: Vec<Column>,

    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    pub fn builder(name: impl Into<String>) -> TableBuilder {
        TableBuilder::new(name)
    }

    pub fn table_name(&self) -> TableName {
        TableName {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.primary_key)
    }

    /// Returns true if `name` names this table.
    pub fn is_named(&self, name: &TableName) -> bool {
        self.name == name.name && self.schema == name.schema
    }

    /// References a column, qualified by the table name.
    ///
    /// The column type is taken from the table definition; unknown columns
    /// get [`Type::Unknown`](crate::stmt::Type::Unknown).
    pub fn c(&self, name: &str) -> ExprColumn {
        let ty = self
            .column(name)
            .map(|column| column.ty.clone())
            .unwrap_or(crate::stmt::Type::Unknown);
        ExprColumn::new(Qualifier::Table(self.table_name()), name, ty)
    }

    /// All columns, in definition order.
    pub fn all_columns(&self) -> Vec<Expr> {
        self.columns
            .iter()
            .map(|column| self.c(&column.name).into())
            .collect()
    }

    /// References the table under a named alias.
    pub fn alias(self: &Arc<Self>, alias: impl Into<Alias>) -> TableRef {
        TableRef {
            table: self.clone(),
            alias: Some(alias.into()),
        }
    }

    /// References the table under an anonymous alias.
    pub fn anon_alias(self: &Arc<Self>) -> TableRef {
        TableRef {
            table: self.clone(),
            alias: Some(Alias::anonymous()),
        }
    }

    /// `SELECT <all columns> FROM <table>`
    pub fn select(self: &Arc<Self>) -> Select {
        Select::new(self.all_columns()).from(self)
    }

    pub fn insert(self: &Arc<Self>) -> Insert {
        Insert::new(self.clone())
    }

    pub fn update(self: &Arc<Self>) -> Update {
        Update::new(self.clone())
    }

    pub fn delete(self: &Arc<Self>) -> Delete {
        Delete::new(self.clone())
    }

    pub fn create_table(self: &Arc<Self>) -> Ddl {
        Ddl::create_table(self.clone())
    }

    pub fn drop_table(&self) -> Ddl {
        Ddl::drop_table(self.table_name())
    }
}
