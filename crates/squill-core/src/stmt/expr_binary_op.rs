use super::{BinaryOp, Expr};

/// A binary operation between two expressions.
///
/// # Examples
///
/// ```text
/// eq(a, b)   // a = b
/// ne(a, b)   // a != b
/// lt(a, b)   // a < b
/// add(a, b)  // a + b
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinaryOp {
    /// The left-hand side expression.
    pub lhs: Box<Expr>,

    /// The operator to apply.
    pub op: BinaryOp,

    /// The right-hand side expression.
    pub rhs: Box<Expr>,
}

impl Expr {
    /// Builds a binary operation.
    ///
    /// Comparing against the `NULL` constant with `=` or `!=` produces
    /// `IS NULL` / `IS NOT NULL`. When one side is a column, anonymous bind
    /// parameters and template arguments on the other side take the column's
    /// name as their naming hint and the column's type.
    pub fn binary_op(lhs: impl Into<Self>, op: BinaryOp, rhs: impl Into<Self>) -> Self {
        let mut lhs = lhs.into();
        let mut rhs = rhs.into();

        if matches!(op, BinaryOp::Eq | BinaryOp::Ne) {
            let operand = if rhs.is_null_constant() {
                Some(lhs.clone())
            } else if lhs.is_null_constant() {
                Some(rhs.clone())
            } else {
                None
            };

            if let Some(operand) = operand {
                return match op {
                    BinaryOp::Eq => Expr::is_null(operand),
                    _ => Expr::is_not_null(operand),
                };
            }
        }

        if let Expr::Column(column) = &lhs {
            rhs.hint_from_column(&column.name, &column.ty);
        } else if let Expr::Column(column) = &rhs {
            lhs.hint_from_column(&column.name, &column.ty);
        }

        ExprBinaryOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
        .into()
    }

    pub fn eq(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Eq, rhs)
    }

    /// Returns true if the expression is a binary expression with the equality operator
    pub fn is_eq(&self) -> bool {
        matches!(
            self,
            Self::BinaryOp(ExprBinaryOp {
                op: BinaryOp::Eq,
                ..
            })
        )
    }

    pub fn ge(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Ge, rhs)
    }

    pub fn gt(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Gt, rhs)
    }

    pub fn le(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Le, rhs)
    }

    pub fn lt(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Lt, rhs)
    }

    pub fn ne(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Ne, rhs)
    }

    pub fn like(lhs: impl Into<Self>, pattern: impl Into<Self>) -> Self {
        Expr::binary_op(lhs, BinaryOp::Like, pattern)
    }

    /// Applies a column's name and type to an anonymous bind or an untyped
    /// template argument.
    pub(crate) fn hint_from_column(&mut self, name: &str, ty: &super::Type) {
        match self {
            Expr::Bind(bind) => bind.hint_from_column(name, ty),
            Expr::Arg(arg) if arg.ty.is_unknown() => arg.ty = ty.clone(),
            _ => {}
        }
    }
}

impl From<ExprBinaryOp> for Expr {
    fn from(value: ExprBinaryOp) -> Self {
        Self::BinaryOp(value)
    }
}
