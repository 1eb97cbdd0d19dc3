use super::{Direction, Expr, OrderByExpr, Qualifier, Query, Type, Value};

/// A reference to a column of a table, alias, derived table, or CTE.
///
/// Columns are identified by their qualifier and name; two references with
/// the same qualifier and name are the same column.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprColumn {
    pub qualifier: Qualifier,
    pub name: String,
    pub ty: Type,
}

impl ExprColumn {
    pub fn new(qualifier: impl Into<Qualifier>, name: impl Into<String>, ty: impl Into<Type>) -> Self {
        Self {
            qualifier: qualifier.into(),
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// A column without a qualifier.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(Qualifier::None, name, Type::Unknown)
    }

    /// Returns true if `other` references the same column.
    pub fn is_same_column(&self, other: &ExprColumn) -> bool {
        self.qualifier == other.qualifier && self.name == other.name
    }

    pub fn eq(self, rhs: impl Into<Expr>) -> Expr {
        Expr::eq(self, rhs)
    }

    pub fn ne(self, rhs: impl Into<Expr>) -> Expr {
        Expr::ne(self, rhs)
    }

    pub fn lt(self, rhs: impl Into<Expr>) -> Expr {
        Expr::lt(self, rhs)
    }

    pub fn le(self, rhs: impl Into<Expr>) -> Expr {
        Expr::le(self, rhs)
    }

    pub fn gt(self, rhs: impl Into<Expr>) -> Expr {
        Expr::gt(self, rhs)
    }

    pub fn ge(self, rhs: impl Into<Expr>) -> Expr {
        Expr::ge(self, rhs)
    }

    pub fn like(self, pattern: impl Into<Expr>) -> Expr {
        Expr::like(self, pattern)
    }

    pub fn is_null(self) -> Expr {
        Expr::is_null(self)
    }

    pub fn is_not_null(self) -> Expr {
        Expr::is_not_null(self)
    }

    pub fn in_list<I>(self, list: I) -> Expr
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Expr::in_list(self, list)
    }

    pub fn in_expanding<I>(self, values: I) -> Expr
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Expr::in_expanding(self, values)
    }

    pub fn in_subquery(self, query: impl Into<Query>) -> Expr {
        Expr::in_subquery(self, query)
    }

    pub fn label(self, name: impl Into<String>) -> Expr {
        Expr::from(self).label(name)
    }

    pub fn asc(self) -> OrderByExpr {
        OrderByExpr::new(self, Some(Direction::Asc))
    }

    pub fn desc(self) -> OrderByExpr {
        OrderByExpr::new(self, Some(Direction::Desc))
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}

impl From<&ExprColumn> for Expr {
    fn from(value: &ExprColumn) -> Self {
        Self::Column(value.clone())
    }
}
