use super::{Ddl, Delete, ExprSetOp, Insert, Query, Select, Update};

use std::sync::OnceLock;

/// A statement, ready to be compiled.
///
/// Whether the statement can be cached is decided the first time a cache key
/// is derived from it and remembered for the statement's lifetime.
#[derive(Debug, Clone)]
pub struct Statement {
    kind: StatementKind,
    cacheability: OnceLock<Cacheability>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    Query(Query),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    Ddl(Ddl),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cacheability {
    Cacheable,
    Uncacheable,
}

impl Statement {
    pub fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            cacheability: OnceLock::new(),
        }
    }

    pub fn kind(&self) -> &StatementKind {
        &self.kind
    }

    pub fn into_kind(self) -> StatementKind {
        self.kind
    }

    /// The remembered cacheability, if a key has been derived before.
    pub fn cacheability(&self) -> Option<Cacheability> {
        self.cacheability.get().copied()
    }

    /// Records the cacheability. The first recorded value wins.
    pub fn set_cacheability(&self, cacheability: Cacheability) -> Cacheability {
        *self.cacheability.get_or_init(|| cacheability)
    }

    pub fn is_query(&self) -> bool {
        matches!(self.kind, StatementKind::Query(_))
    }

    pub fn is_ddl(&self) -> bool {
        matches!(self.kind, StatementKind::Ddl(_))
    }
}

impl PartialEq for Statement {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl From<StatementKind> for Statement {
    fn from(value: StatementKind) -> Self {
        Self::new(value)
    }
}

impl From<Query> for Statement {
    fn from(value: Query) -> Self {
        Self::new(StatementKind::Query(value))
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Query::from(value).into()
    }
}

impl From<ExprSetOp> for Statement {
    fn from(value: ExprSetOp) -> Self {
        Query::from(value).into()
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::new(StatementKind::Insert(value))
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::new(StatementKind::Update(value))
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::new(StatementKind::Delete(value))
    }
}

impl From<Ddl> for Statement {
    fn from(value: Ddl) -> Self {
        Self::new(StatementKind::Ddl(value))
    }
}
