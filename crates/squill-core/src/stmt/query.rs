use super::{
    Alias, Cte, Expr, ExprSet, Limit, OrderBy, OrderByExpr, Select, TableDerived, With,
};

/// A query: a set expression with optional `WITH`, `ORDER BY` and
/// `LIMIT`/`OFFSET` clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Any CTEs
    pub with: Option<With>,

    /// The body of the query. Either `SELECT`, `UNION`, `VALUES`, ...
    pub body: ExprSet,

    /// ORDER BY
    pub order_by: Option<OrderBy>,

    /// LIMIT and OFFSET (count or keyset)
    pub limit: Option<Limit>,
}

impl Query {
    pub fn new(body: impl Into<ExprSet>) -> Self {
        Self {
            with: None,
            body: body.into(),
            order_by: None,
            limit: None,
        }
    }

    pub fn with(mut self, cte: Cte) -> Self {
        self.with.get_or_insert_with(With::default).ctes.push(cte);
        self
    }

    /// Appends `ORDER BY` terms.
    pub fn order_by<I>(mut self, exprs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OrderByExpr>,
    {
        let exprs = exprs.into_iter().map(Into::into);
        match &mut self.order_by {
            Some(order_by) => order_by.exprs.extend(exprs),
            None => self.order_by = Some(OrderBy::new(exprs)),
        }
        self
    }

    /// Sets `LIMIT`. Plain integers become anonymous bind parameters.
    pub fn limit(mut self, limit: impl Into<Expr>) -> Self {
        let limit = Some(limit.into());
        match &mut self.limit {
            Some(existing) => existing.limit = limit,
            None => self.limit = Some(Limit { limit, offset: None }),
        }
        self
    }

    /// Sets `OFFSET`. Plain integers become anonymous bind parameters.
    pub fn offset(mut self, offset: impl Into<Expr>) -> Self {
        let offset = Some(offset.into());
        match &mut self.limit {
            Some(existing) => existing.offset = offset,
            None => self.limit = Some(Limit { limit: None, offset }),
        }
        self
    }

    /// Returns the body as a `SELECT`, if it is one.
    pub fn as_select(&self) -> Option<&Select> {
        match &self.body {
            ExprSet::Select(select) => Some(select),
            _ => None,
        }
    }

    /// Wraps the query in an anonymously aliased derived table.
    pub fn subquery(self) -> TableDerived {
        TableDerived::new(self, Alias::anonymous())
    }

    /// Wraps the query in a derived table with the given alias.
    pub fn alias(self, alias: impl Into<Alias>) -> TableDerived {
        TableDerived::new(self, alias.into())
    }
}

impl From<Select> for Query {
    fn from(value: Select) -> Self {
        Query::new(value)
    }
}

impl From<ExprSet> for Query {
    fn from(value: ExprSet) -> Self {
        Query::new(value)
    }
}
