//! The seam between compiled statements and a database connection.

use crate::{async_trait, stmt::Value, Result};

use indexmap::IndexMap;
use std::{fmt::Debug, sync::Arc};

/// Executes final SQL text against a database.
///
/// Implementations own timeouts, cancellation and connection management.
#[async_trait]
pub trait Connection: Debug + Send + Sync + 'static {
    async fn exec(&self, stmt: ExecutableStatement) -> Result<Response>;
}

/// SQL text with every parameter resolved, ready to send to a driver.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutableStatement {
    pub sql: Arc<str>,
    pub params: BoundParams,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundParams {
    /// Values in placeholder order, for `?`, `?N` and `$N` placeholders.
    Positional(Vec<Value>),

    /// Values by name, for `:name` placeholders.
    Named(IndexMap<String, Value>),
}

impl BoundParams {
    pub fn len(&self) -> usize {
        match self {
            Self::Positional(values) => values.len(),
            Self::Named(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_positional(&self) -> Option<&[Value]> {
        match self {
            Self::Positional(values) => Some(values),
            Self::Named(_) => None,
        }
    }

    pub fn as_named(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Named(values) => Some(values),
            Self::Positional(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Rows returned by the operation
    Values(Vec<Vec<Value>>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows: Rows::Values(rows),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }
}
