use super::{Expr, Type};

/// A SQL function call, e.g. `lower(name)` or `COUNT(*)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprFunc {
    pub name: String,
    pub args: Vec<Expr>,

    /// Return type of the function.
    pub ty: Type,
}

impl Expr {
    pub fn func<I>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        ExprFunc {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            ty: Type::Unknown,
        }
        .into()
    }

    /// `COUNT(*)`
    pub fn count_star() -> Self {
        ExprFunc {
            name: "COUNT".to_string(),
            args: vec![Expr::wildcard()],
            ty: Type::I64,
        }
        .into()
    }
}

impl ExprFunc {
    pub fn returns(mut self, ty: impl Into<Type>) -> Self {
        self.ty = ty.into();
        self
    }
}

impl From<ExprFunc> for Expr {
    fn from(value: ExprFunc) -> Self {
        Self::Func(value)
    }
}
