use super::{Expr, Type};

/// A positional argument of a statement template.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprArg {
    /// Which template argument this references.
    pub position: usize,

    pub ty: Type,
}

impl Expr {
    pub fn arg(position: usize) -> Self {
        ExprArg {
            position,
            ty: Type::Unknown,
        }
        .into()
    }

    pub fn arg_typed(position: usize, ty: impl Into<Type>) -> Self {
        ExprArg {
            position,
            ty: ty.into(),
        }
        .into()
    }
}

impl From<ExprArg> for Expr {
    fn from(value: ExprArg) -> Self {
        Self::Arg(value)
    }
}
