use super::{
    Alias, Expr, ExprSet, ExprSetOp, OrderByExpr, Query, SetOp, TableDerived, TableWithJoins,
};

/// A `SELECT` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub distinct: bool,

    /// The columns clause.
    pub columns: Vec<Expr>,

    /// The `FROM` clause. Empty for a `SELECT` without a `FROM`.
    pub from: Vec<TableWithJoins>,

    /// The `WHERE` clause.
    pub filter: Option<Expr>,

    pub group_by: Vec<Expr>,

    pub having: Option<Expr>,
}

impl Select {
    pub fn new<I>(columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self {
            distinct: false,
            columns: columns.into_iter().map(Into::into).collect(),
            from: vec![],
            filter: None,
            group_by: vec![],
            having: None,
        }
    }

    pub fn from(mut self, from: impl Into<TableWithJoins>) -> Self {
        self.from.push(from.into());
        self
    }

    /// Adds a `WHERE` condition, ANDed with any existing condition.
    pub fn filter(mut self, expr: impl Into<Expr>) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(filter) => Expr::and(filter, expr),
            None => expr.into(),
        });
        self
    }

    pub fn group_by<I>(mut self, exprs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        self.group_by.extend(exprs.into_iter().map(Into::into));
        self
    }

    pub fn having(mut self, expr: impl Into<Expr>) -> Self {
        self.having = Some(match self.having.take() {
            Some(having) => Expr::and(having, expr),
            None => expr.into(),
        });
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn order_by<I>(self, exprs: I) -> Query
    where
        I: IntoIterator,
        I::Item: Into<OrderByExpr>,
    {
        Query::from(self).order_by(exprs)
    }

    pub fn limit(self, limit: impl Into<Expr>) -> Query {
        Query::from(self).limit(limit)
    }

    pub fn offset(self, offset: impl Into<Expr>) -> Query {
        Query::from(self).offset(offset)
    }

    pub fn union(self, other: impl Into<ExprSet>) -> Query {
        ExprSetOp::new(SetOp::Union, [ExprSet::from(self), other.into()]).into()
    }

    pub fn union_all(self, other: impl Into<ExprSet>) -> Query {
        ExprSetOp::new(SetOp::UnionAll, [ExprSet::from(self), other.into()]).into()
    }

    /// Wraps the select in an anonymously aliased derived table.
    pub fn subquery(self) -> TableDerived {
        Query::from(self).subquery()
    }

    /// Wraps the select in a derived table with the given alias.
    pub fn alias(self, alias: impl Into<Alias>) -> TableDerived {
        Query::from(self).alias(alias)
    }
}
