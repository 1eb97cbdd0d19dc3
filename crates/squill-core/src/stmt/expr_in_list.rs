use super::{BindParam, Expr, Value};

/// `expr IN (list)`.
///
/// A list holding a single expanding bind parameter is expanded when the
/// statement is executed; any other list is fixed and its length is part of
/// the statement's shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub expr: Box<Expr>,
    pub list: Vec<Expr>,
}

impl Expr {
    pub fn in_list<I>(expr: impl Into<Self>, list: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        let expr = expr.into();
        let mut list: Vec<Expr> = list.into_iter().map(Into::into).collect();

        if let Expr::Column(column) = &expr {
            for item in &mut list {
                item.hint_from_column(&column.name, &column.ty);
            }
        }

        ExprInList {
            expr: Box::new(expr),
            list,
        }
        .into()
    }

    /// `expr IN (...)` with a single expanding parameter.
    pub fn in_expanding<I>(expr: impl Into<Self>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Expr::in_list(expr, [BindParam::expanding(values)])
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Self::InList(value)
    }
}
