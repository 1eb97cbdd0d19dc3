use super::Expr;
use crate::{Dialect, Result};

use std::{fmt, sync::Arc};

/// An expression rendered by user code.
pub trait CustomExpr: fmt::Debug + Send + Sync + 'static {
    /// A string identifying the SQL this expression renders, or `None` if
    /// the rendering cannot be described by a key. Statements containing an
    /// expression without a key are never cached.
    fn cache_key(&self) -> Option<String>;

    /// Renders the expression for the given dialect.
    fn to_sql(&self, dialect: &dyn Dialect) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct ExprCustom(pub Arc<dyn CustomExpr>);

impl PartialEq for ExprCustom {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Expr {
    pub fn custom(expr: impl CustomExpr) -> Self {
        Expr::Custom(ExprCustom(Arc::new(expr)))
    }
}

impl From<ExprCustom> for Expr {
    fn from(value: ExprCustom) -> Self {
        Self::Custom(value)
    }
}
