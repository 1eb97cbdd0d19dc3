use super::{CteRef, Join, TableDerived, TableFactor, TableRef};
use crate::schema::Table;

use std::sync::Arc;

/// A `FROM` item followed by its joins.
#[derive(Debug, Clone, PartialEq)]
pub struct TableWithJoins {
    pub relation: TableFactor,
    pub joins: Vec<Join>,
}

impl From<TableFactor> for TableWithJoins {
    fn from(value: TableFactor) -> Self {
        Self {
            relation: value,
            joins: vec![],
        }
    }
}

impl From<TableRef> for TableWithJoins {
    fn from(value: TableRef) -> Self {
        TableFactor::from(value).into()
    }
}

impl From<TableDerived> for TableWithJoins {
    fn from(value: TableDerived) -> Self {
        TableFactor::from(value).into()
    }
}

impl From<CteRef> for TableWithJoins {
    fn from(value: CteRef) -> Self {
        TableFactor::from(value).into()
    }
}

impl From<Arc<Table>> for TableWithJoins {
    fn from(value: Arc<Table>) -> Self {
        TableFactor::from(value).into()
    }
}

impl From<&Arc<Table>> for TableWithJoins {
    fn from(value: &Arc<Table>) -> Self {
        TableFactor::from(value).into()
    }
}
