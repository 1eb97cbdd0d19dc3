use super::{
    Alias, CteRef, Expr, ExprColumn, Join, JoinKind, JoinOn, Qualifier, Query, TableWithJoins, Type,
};
use crate::schema::Table;

use std::sync::Arc;

/// An item of a `FROM` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum TableFactor {
    /// A schema table, optionally aliased.
    Table(TableRef),

    /// An aliased subquery.
    Derived(TableDerived),

    /// A reference to a CTE of an enclosing `WITH` clause.
    Cte(CteRef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRef {
    pub table: Arc<Table>,
    pub alias: Option<Alias>,
}

/// A subquery in a `FROM` clause. Derived tables always carry an alias.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDerived {
    pub subquery: Box<Query>,
    pub alias: Alias,

    /// Explicit column names, rendered as `alias (a, b)`.
    pub columns: Vec<String>,
}

impl TableFactor {
    /// The qualifier columns of this factor are referenced by.
    pub fn qualifier(&self) -> Qualifier {
        match self {
            Self::Table(table_ref) => table_ref.qualifier(),
            Self::Derived(derived) => Qualifier::Alias(derived.alias.clone()),
            Self::Cte(cte_ref) => cte_ref.qualifier(),
        }
    }

    pub fn as_table(&self) -> Option<&TableRef> {
        match self {
            Self::Table(table_ref) => Some(table_ref),
            _ => None,
        }
    }
}

impl TableRef {
    pub fn new(table: Arc<Table>) -> Self {
        Self { table, alias: None }
    }

    pub fn qualifier(&self) -> Qualifier {
        match &self.alias {
            Some(alias) => Qualifier::Alias(alias.clone()),
            None => Qualifier::Table(self.table.table_name()),
        }
    }

    /// References a column of the table through this factor's qualifier.
    pub fn c(&self, name: &str) -> ExprColumn {
        let ty = self
            .table
            .column(name)
            .map(|column| column.ty.clone())
            .unwrap_or(Type::Unknown);
        ExprColumn::new(self.qualifier(), name, ty)
    }

    pub fn join(self, table: impl Into<TableFactor>, on: impl Into<Expr>) -> TableWithJoins {
        TableWithJoins::from(self).join(table, on)
    }

    pub fn join_inferred(self, table: impl Into<TableFactor>) -> TableWithJoins {
        TableWithJoins::from(self).join_inferred(table)
    }

    pub fn left_join(self, table: impl Into<TableFactor>, on: impl Into<Expr>) -> TableWithJoins {
        TableWithJoins::from(self).left_join(table, on)
    }
}

impl TableDerived {
    pub fn new(subquery: impl Into<Query>, alias: Alias) -> Self {
        Self {
            subquery: Box::new(subquery.into()),
            alias,
            columns: vec![],
        }
    }

    pub fn with_columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// References a column of the subquery through the alias.
    pub fn c(&self, name: &str) -> ExprColumn {
        let ty = match &self.subquery.body {
            super::ExprSet::Select(select) => select
                .columns
                .iter()
                .find(|column| column.output_name() == Some(name))
                .map(Expr::ty)
                .unwrap_or(Type::Unknown),
            _ => Type::Unknown,
        };
        ExprColumn::new(Qualifier::Alias(self.alias.clone()), name, ty)
    }

    pub fn join(self, table: impl Into<TableFactor>, on: impl Into<Expr>) -> TableWithJoins {
        TableWithJoins::from(self).join(table, on)
    }
}

impl TableWithJoins {
    pub fn join(mut self, table: impl Into<TableFactor>, on: impl Into<Expr>) -> Self {
        self.joins.push(Join::new(table, JoinKind::Inner, JoinOn::Expr(on.into())));
        self
    }

    /// Joins `table`, inferring the `ON` condition from foreign keys.
    pub fn join_inferred(mut self, table: impl Into<TableFactor>) -> Self {
        self.joins.push(Join::new(table, JoinKind::Inner, JoinOn::Infer));
        self
    }

    pub fn left_join(mut self, table: impl Into<TableFactor>, on: impl Into<Expr>) -> Self {
        self.joins.push(Join::new(table, JoinKind::Left, JoinOn::Expr(on.into())));
        self
    }

    pub fn left_join_inferred(mut self, table: impl Into<TableFactor>) -> Self {
        self.joins.push(Join::new(table, JoinKind::Left, JoinOn::Infer));
        self
    }

    pub fn full_join(mut self, table: impl Into<TableFactor>, on: impl Into<Expr>) -> Self {
        self.joins.push(Join::new(table, JoinKind::Full, JoinOn::Expr(on.into())));
        self
    }

    pub fn cross_join(mut self, table: impl Into<TableFactor>) -> Self {
        self.joins.push(Join::new(table, JoinKind::Cross, JoinOn::None));
        self
    }
}

impl From<TableRef> for TableFactor {
    fn from(value: TableRef) -> Self {
        Self::Table(value)
    }
}

impl From<Arc<Table>> for TableFactor {
    fn from(value: Arc<Table>) -> Self {
        Self::Table(TableRef::new(value))
    }
}

impl From<&Arc<Table>> for TableFactor {
    fn from(value: &Arc<Table>) -> Self {
        Self::Table(TableRef::new(value.clone()))
    }
}

impl From<TableDerived> for TableFactor {
    fn from(value: TableDerived) -> Self {
        Self::Derived(value)
    }
}

impl From<CteRef> for TableFactor {
    fn from(value: CteRef) -> Self {
        Self::Cte(value)
    }
}
