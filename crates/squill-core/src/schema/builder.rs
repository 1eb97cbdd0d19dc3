use super::{Column, ForeignKey, Table};
use crate::{stmt::Type, Error, Result};

use std::{collections::HashSet, sync::Arc};

/// Builds a [`Table`].
#[derive(Debug)]
pub struct TableBuilder {
    table: Table,
    primary_key: Vec<String>,
}

impl TableBuilder {
    pub(super) fn new(name: impl Into<String>) -> Self {
        Self {
            table: Table {
                name: name.into(),
                schema: None,
                columns: vec![],
                foreign_keys: vec![],
            },
            primary_key: vec![],
        }
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.table.schema = Some(schema.into());
        self
    }

    /// Adds a `NOT NULL` column.
    pub fn column(mut self, name: impl Into<String>, ty: impl Into<Type>) -> Self {
        self.table.columns.push(Column {
            name: name.into(),
            ty: ty.into(),
            nullable: false,
            primary_key: false,
        });
        self
    }

    pub fn nullable_column(mut self, name: impl Into<String>, ty: impl Into<Type>) -> Self {
        self.table.columns.push(Column {
            name: name.into(),
            ty: ty.into(),
            nullable: true,
            primary_key: false,
        });
        self
    }

    pub fn primary_key<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a foreign key from `columns` to `referenced_columns` of
    /// `references`.
    pub fn foreign_key<C, R>(
        mut self,
        columns: C,
        references: impl Into<crate::stmt::TableName>,
        referenced_columns: R,
    ) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        self.table.foreign_keys.push(ForeignKey {
            columns: columns.into_iter().map(Into::into).collect(),
            references: references.into(),
            referenced_columns: referenced_columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn build(self) -> Result<Arc<Table>> {
        let mut table = self.table;

        let mut seen = HashSet::new();
        for column in &table.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(Error::invalid_argument(format!(
                    "table `{}` defines column `{}` more than once",
                    table.name, column.name
                )));
            }
        }

        for fk in &table.foreign_keys {
            if fk.columns.is_empty() || fk.columns.len() != fk.referenced_columns.len() {
                return Err(Error::invalid_argument(format!(
                    "foreign key of table `{}` to `{}` must pair each column with a referenced column",
                    table.name, fk.references
                )));
            }

            if let Some(name) = fk.columns.iter().find(|name| !seen.contains(name.as_str())) {
                return Err(Error::invalid_argument(format!(
                    "foreign key of table `{}` references unknown column `{name}`",
                    table.name
                )));
            }
        }

        for name in &self.primary_key {
            let Some(column) = table.columns.iter_mut().find(|c| &c.name == name) else {
                return Err(Error::invalid_argument(format!(
                    "primary key of table `{}` references unknown column `{name}`",
                    table.name
                )));
            };
            column.primary_key = true;
        }

        Ok(Arc::new(table))
    }
}
