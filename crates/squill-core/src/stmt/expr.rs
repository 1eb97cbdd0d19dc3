use super::{
    BinaryOp, BindParam, ExprAnd, ExprArg, ExprBinaryOp, ExprCast, ExprColumn, ExprCustom,
    ExprExists, ExprFunc, ExprInList, ExprInSubquery, ExprIsNull, ExprLabel, ExprNot, ExprOr,
    ExprStmt, Qualifier, Type, Value,
};

/// A SQL expression.
///
/// Converting a plain Rust value into an `Expr` produces an anonymous bind
/// parameter, not an inline literal. Use [`Expr::literal`] to render a value
/// directly into the SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND a set of binary expressions
    And(ExprAnd),

    /// A template argument, supplied at execution time.
    Arg(ExprArg),

    /// Binary expression
    BinaryOp(ExprBinaryOp),

    /// Bind parameter
    Bind(BindParam),

    /// Cast an expression to a different type
    Cast(ExprCast),

    /// References a column
    Column(ExprColumn),

    /// An expression rendered by user code
    Custom(ExprCustom),

    /// `EXISTS (subquery)`
    Exists(ExprExists),

    /// A SQL function call
    Func(ExprFunc),

    /// `expr IN (a, b, ...)`
    InList(ExprInList),

    /// `expr IN (subquery)`
    InSubquery(ExprInSubquery),

    /// `IS NULL` / `IS NOT NULL`
    IsNull(ExprIsNull),

    /// `expr AS label`
    Label(ExprLabel),

    /// A value rendered inline into the SQL text
    Literal(Value),

    /// Boolean negation
    Not(ExprNot),

    /// OR a set of binary expressions
    Or(ExprOr),

    /// A scalar subquery
    Stmt(ExprStmt),

    /// `*` or `qualifier.*`
    Wildcard(Qualifier),
}

impl Expr {
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    pub fn null() -> Self {
        Self::Literal(Value::Null)
    }

    /// `*`
    pub fn wildcard() -> Self {
        Self::Wildcard(Qualifier::None)
    }

    /// Returns the type the expression evaluates to, if it can be determined
    /// without a schema.
    pub fn ty(&self) -> Type {
        match self {
            Self::And(_) | Self::Or(_) | Self::Not(_) | Self::IsNull(_) => Type::Bool,
            Self::Exists(_) | Self::InList(_) | Self::InSubquery(_) => Type::Bool,
            Self::Arg(expr) => expr.ty.clone(),
            Self::BinaryOp(expr) => {
                if expr.op.is_comparison() {
                    Type::Bool
                } else {
                    expr.lhs.ty()
                }
            }
            Self::Bind(bind) => bind.ty.clone(),
            Self::Cast(expr) => expr.ty.clone(),
            Self::Column(expr) => expr.ty.clone(),
            Self::Func(expr) => expr.ty.clone(),
            Self::Label(expr) => expr.expr.ty(),
            Self::Literal(value) => value.ty(),
            Self::Stmt(expr) => expr.ty(),
            Self::Custom(_) | Self::Wildcard(_) => Type::Unknown,
        }
    }

    /// Returns `true` if the expression is the `NULL` constant, either as a
    /// literal or as an anonymous bind holding `NULL`.
    pub fn is_null_constant(&self) -> bool {
        match self {
            Self::Literal(Value::Null) => true,
            Self::Bind(bind) => bind.key.is_anonymous() && bind.value == Some(Value::Null),
            _ => false,
        }
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }

    pub fn as_column(&self) -> Option<&ExprColumn> {
        match self {
            Self::Column(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn as_bind(&self) -> Option<&BindParam> {
        match self {
            Self::Bind(bind) => Some(bind),
            _ => None,
        }
    }

    /// Adds `self` to `rhs`.
    pub fn add(self, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(self, BinaryOp::Add, rhs)
    }

    pub fn sub(self, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(self, BinaryOp::Sub, rhs)
    }

    pub fn mul(self, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(self, BinaryOp::Mul, rhs)
    }

    pub fn div(self, rhs: impl Into<Self>) -> Self {
        Expr::binary_op(self, BinaryOp::Div, rhs)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Bind(BindParam::anonymous(value))
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Value::from(value).into()
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Value::from(value).into()
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Value::from(value).into()
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Value::from(value).into()
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Value::from(value).into()
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Value::from(value).into()
    }
}

impl<T: Into<Value>> From<Option<T>> for Expr {
    fn from(value: Option<T>) -> Self {
        Value::from(value).into()
    }
}

impl From<&Expr> for Expr {
    fn from(value: &Expr) -> Self {
        value.clone()
    }
}
