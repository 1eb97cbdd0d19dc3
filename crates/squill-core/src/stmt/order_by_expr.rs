use super::{Direction, Expr, ExprColumn};

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub direction: Option<Direction>,
}

impl OrderByExpr {
    pub fn new(expr: impl Into<Expr>, direction: Option<Direction>) -> Self {
        Self {
            expr: expr.into(),
            direction,
        }
    }
}

impl Expr {
    pub fn asc(self) -> OrderByExpr {
        OrderByExpr::new(self, Some(Direction::Asc))
    }

    pub fn desc(self) -> OrderByExpr {
        OrderByExpr::new(self, Some(Direction::Desc))
    }
}

impl From<Expr> for OrderByExpr {
    fn from(value: Expr) -> Self {
        Self::new(value, None)
    }
}

impl From<ExprColumn> for OrderByExpr {
    fn from(value: ExprColumn) -> Self {
        Self::new(value, None)
    }
}
